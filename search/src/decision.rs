//! Pending branching decisions and their frontier ordering key.

use std::cmp::Ordering;

use crate::node::NodeId;

/// A not-yet-applied `(state, move)` pairing.
///
/// `depth` and `objective` belong to the referenced state, captured when the
/// decision was formed, so the frontier can order decisions without touching
/// the arena.
#[derive(Debug, Clone)]
pub struct Decision<M> {
    /// The state the move will be applied to.
    pub node: NodeId,
    /// The candidate move.
    pub mv: M,
    /// Depth of the referenced state.
    pub depth: u32,
    /// Objective of the referenced state (best-first only).
    pub objective: Option<f64>,
    /// Global counter for deterministic tie-breaking.
    pub creation_order: u64,
}

/// Best-first ordering key: `(objective, creation_order)`.
///
/// Lower objective first, then older creation order. Objectives compare by
/// IEEE total order so the key is a total order even for NaN. A missing
/// objective sorts after every present one.
#[derive(Debug, Clone, Copy)]
pub struct DecisionKey {
    pub objective: Option<f64>,
    pub creation_order: u64,
}

impl PartialEq for DecisionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DecisionKey {}

impl PartialOrd for DecisionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DecisionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let objective = match (self.objective, other.objective) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        objective.then(self.creation_order.cmp(&other.creation_order))
    }
}

impl<M> From<&Decision<M>> for DecisionKey {
    fn from(decision: &Decision<M>) -> Self {
        Self {
            objective: decision.objective,
            creation_order: decision.creation_order,
        }
    }
}
