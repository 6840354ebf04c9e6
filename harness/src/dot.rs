//! Graphviz rendering of a search trace.
//!
//! `DotGraph` is a [`TraceSink`]: it accumulates nodes, edges and highlight
//! colors while the search runs and renders one `digraph` afterwards. Node
//! identifiers are arena handles (`n0`, `n1`, ...), so equal labels never
//! merge nodes. Each failed move gets its own marker node `f<decision>`.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use lodestar_search::{
    canonical_hash, ContentHash, EdgeTarget, HashDomain, NodeColor, NodeId, TerminationReason,
    TraceEvent, TraceSink,
};

use crate::atomic::write_atomic;

/// Error writing a DOT file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotWriteError {
    Io { detail: String },
}

impl std::fmt::Display for DotWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
        }
    }
}

impl std::error::Error for DotWriteError {}

#[derive(Debug, Clone)]
struct DotNode {
    label: String,
    color: NodeColor,
}

#[derive(Debug, Clone)]
struct DotEdge {
    from: NodeId,
    to: String,
    label: String,
}

/// Trace sink that renders a Graphviz directed graph.
#[derive(Debug, Clone, Default)]
pub struct DotGraph {
    nodes: BTreeMap<NodeId, DotNode>,
    failures: Vec<u64>,
    edges: Vec<DotEdge>,
    termination: Option<TerminationReason>,
}

impl DotGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of state nodes seen.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, failed moves included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Render the graph. Output depends only on the recorded events.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("digraph search {\n    node [shape=box, style=filled];\n");
        if let Some(termination) = self.termination {
            let _ = writeln!(out, "    // termination: {}", termination.name());
        }
        for (id, node) in &self.nodes {
            let _ = writeln!(
                out,
                "    {id} [label=\"{}\", fillcolor={}];",
                escape(&node.label),
                node.color.dot_color()
            );
        }
        for decision in &self.failures {
            let _ = writeln!(
                out,
                "    f{decision} [label=\"failed\", shape=octagon, fillcolor={}];",
                NodeColor::Failed.dot_color()
            );
        }
        for edge in &self.edges {
            let _ = writeln!(
                out,
                "    {} -> {} [label=\"{}\"];",
                edge.from,
                edge.to,
                escape(&edge.label)
            );
        }
        out.push_str("}\n");
        out
    }

    /// Write the rendered graph to `path` (temp file, then rename) and
    /// return its content hash.
    ///
    /// # Errors
    ///
    /// Returns [`DotWriteError::Io`] if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<ContentHash, DotWriteError> {
        let rendered = self.render();
        write_atomic(path, rendered.as_bytes()).map_err(|e| DotWriteError::Io {
            detail: format!("write {}: {e}", path.display()),
        })?;
        Ok(canonical_hash(HashDomain::DotArtifact, rendered.as_bytes()))
    }

    /// Content hash of [`DotGraph::render`].
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        canonical_hash(HashDomain::DotArtifact, self.render().as_bytes())
    }
}

impl TraceSink for DotGraph {
    fn record(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::Root { node, label } => {
                self.nodes.insert(
                    node,
                    DotNode {
                        label,
                        color: NodeColor::Open,
                    },
                );
            }
            TraceEvent::Edge {
                decision,
                from,
                to,
                move_label,
                ..
            } => {
                let to = match to {
                    EdgeTarget::Node { node, label } => {
                        self.nodes.entry(node).or_insert(DotNode {
                            label,
                            color: NodeColor::Open,
                        });
                        node.to_string()
                    }
                    EdgeTarget::Failed => {
                        self.failures.push(decision);
                        format!("f{decision}")
                    }
                };
                self.edges.push(DotEdge {
                    from,
                    to,
                    label: move_label,
                });
            }
            TraceEvent::Highlight { node, label, color } => {
                self.nodes
                    .entry(node)
                    .and_modify(|n| n.color = color)
                    .or_insert(DotNode { label, color });
            }
            TraceEvent::Finished { termination, .. } => {
                self.termination = Some(termination);
            }
        }
    }
}

fn escape(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
