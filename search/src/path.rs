//! Solution path reconstruction.
//!
//! Walks the transition chain from a solution node back to the root. The
//! walk is iterative, so path length is bounded only by memory.

use crate::contract::SearchState;
use crate::node::{NodeArena, NodeId};
use crate::policy::PathOrder;

/// One state on a solution path.
#[derive(Debug, Clone)]
pub struct PathStep<S: SearchState> {
    pub state: S,
    /// The move that produced `state` (`None` for the initial state).
    pub mv: Option<S::Move>,
    pub depth: u32,
}

/// States from the initial state to a solution, in the requested order.
#[derive(Debug, Clone)]
pub struct SolutionPath<S: SearchState> {
    steps: Vec<PathStep<S>>,
    order: PathOrder,
}

impl<S: SearchState> SolutionPath<S> {
    #[must_use]
    pub fn steps(&self) -> &[PathStep<S>] {
        &self.steps
    }

    #[must_use]
    pub fn order(&self) -> PathOrder {
        self.order
    }

    /// Number of states, initial and solution included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The terminal state.
    #[must_use]
    pub fn solution(&self) -> Option<&S> {
        let step = match self.order {
            PathOrder::SolutionFirst => self.steps.first(),
            PathOrder::InitialFirst => self.steps.last(),
        };
        step.map(|s| &s.state)
    }

    /// The initial state.
    #[must_use]
    pub fn initial(&self) -> Option<&S> {
        let step = match self.order {
            PathOrder::SolutionFirst => self.steps.last(),
            PathOrder::InitialFirst => self.steps.first(),
        };
        step.map(|s| &s.state)
    }

    /// Applied moves in replay order (initial state first).
    #[must_use]
    pub fn moves(&self) -> Vec<&S::Move> {
        let mut moves: Vec<&S::Move> = self.steps.iter().filter_map(|s| s.mv.as_ref()).collect();
        if self.order == PathOrder::SolutionFirst {
            moves.reverse();
        }
        moves
    }

    /// The same path in the opposite order.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.steps.reverse();
        self.order = match self.order {
            PathOrder::SolutionFirst => PathOrder::InitialFirst,
            PathOrder::InitialFirst => PathOrder::SolutionFirst,
        };
        self
    }
}

/// Reconstruct the path ending at `solution`.
///
/// # Panics
///
/// Panics if `solution` does not belong to `arena`.
#[must_use]
pub fn reconstruct<S: SearchState>(
    arena: &NodeArena<S>,
    solution: NodeId,
    order: PathOrder,
) -> SolutionPath<S> {
    let mut steps = Vec::new();
    let mut current = Some(solution);

    while let Some(id) = current {
        let node = arena.get(id);
        steps.push(PathStep {
            state: node.state.clone(),
            mv: node.transition.as_ref().map(|t| t.mv.clone()),
            depth: node.depth(),
        });
        current = node.transition.as_ref().map(|t| t.previous);
    }

    if order == PathOrder::InitialFirst {
        steps.reverse();
    }
    SolutionPath { steps, order }
}
