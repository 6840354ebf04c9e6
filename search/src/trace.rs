//! Trace sink: observational expansion events.
//!
//! The driver reports every processed decision as an edge from the popped
//! state to either its successor or a failure marker, and closes the run
//! with one [`TraceEvent::Finished`]. Sinks never feed anything back into
//! the search.

use crate::digest::{canonical_hash, ContentHash, HashDomain};
use crate::node::NodeId;
use crate::search::TerminationReason;

/// Node highlight classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeColor {
    /// Created, not (yet) expanded.
    Open,
    /// Moves were enumerated and pushed.
    Expanded,
    /// A failed move execution.
    Failed,
    /// A terminal state.
    Solution,
    /// The last node of a run that ended without a solution.
    Final,
}

impl NodeColor {
    /// Graphviz fill color name.
    #[must_use]
    pub fn dot_color(self) -> &'static str {
        match self {
            Self::Open => "white",
            Self::Expanded => "lightblue",
            Self::Failed => "red",
            Self::Solution => "green",
            Self::Final => "orange",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Expanded => "expanded",
            Self::Failed => "failed",
            Self::Solution => "solution",
            Self::Final => "final",
        }
    }
}

/// Where a processed decision led.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeTarget {
    /// The move executed and produced this node.
    Node { node: NodeId, label: String },
    /// The move failed to execute.
    Failed,
}

/// One observation emitted by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// The initial state entered the arena.
    Root { node: NodeId, label: String },
    /// A decision was popped and processed.
    Edge {
        /// Decision counter value for this decision (1-based).
        decision: u64,
        from: NodeId,
        to: EdgeTarget,
        move_label: String,
        /// Depth of the popped (source) state.
        depth: u32,
    },
    /// A node changed highlight class.
    Highlight {
        node: NodeId,
        label: String,
        color: NodeColor,
    },
    /// The run ended. `final_node` is the solution if one was retained,
    /// otherwise the most recently created node.
    Finished {
        termination: TerminationReason,
        final_node: Option<NodeId>,
    },
}

/// Receiver of trace events.
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _event: TraceEvent) {}
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn record(&mut self, event: TraceEvent) {
        (**self).record(event);
    }
}

/// Fan out every event to both sinks.
impl<A: TraceSink, B: TraceSink> TraceSink for (A, B) {
    fn record(&mut self, event: TraceEvent) {
        self.0.record(event.clone());
        self.1.record(event);
    }
}

/// In-memory audit log of a run.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    events: Vec<TraceEvent>,
}

impl TraceLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events in emission order.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Edge events only.
    pub fn edges(&self) -> impl Iterator<Item = &TraceEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Edge { .. }))
    }

    /// Serialize the log to JSON bytes.
    ///
    /// `serde_json` objects are key-sorted by default, so equal logs produce
    /// equal bytes.
    #[must_use]
    pub fn to_json_bytes(&self) -> Vec<u8> {
        let value = serde_json::Value::Array(self.events.iter().map(event_to_json).collect());
        value.to_string().into_bytes()
    }

    /// Content hash of [`TraceLog::to_json_bytes`].
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(HashDomain::TraceLog, &self.to_json_bytes())
    }
}

impl TraceSink for TraceLog {
    fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

fn event_to_json(event: &TraceEvent) -> serde_json::Value {
    match event {
        TraceEvent::Root { node, label } => {
            serde_json::json!({"label": label, "node": node.index(), "type": "root"})
        }
        TraceEvent::Edge {
            decision,
            from,
            to,
            move_label,
            depth,
        } => {
            let to = match to {
                EdgeTarget::Node { node, label } => {
                    serde_json::json!({"label": label, "node": node.index()})
                }
                EdgeTarget::Failed => serde_json::json!("failed"),
            };
            serde_json::json!({
                "decision": decision,
                "depth": depth,
                "from": from.index(),
                "move": move_label,
                "to": to,
                "type": "edge",
            })
        }
        TraceEvent::Highlight { node, label, color } => {
            serde_json::json!({"color": color.name(), "label": label, "node": node.index(), "type": "highlight"})
        }
        TraceEvent::Finished {
            termination,
            final_node,
        } => serde_json::json!({
            "final_node": final_node.map(NodeId::index),
            "termination": termination.name(),
            "type": "finished",
        }),
    }
}
