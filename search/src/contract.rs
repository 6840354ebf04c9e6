//! User problem contract trait.

use std::fmt::{Debug, Display};

/// Trait for problem states that can be explored.
///
/// The engine never mutates a state it has stored. Every expansion clones
/// the parent and calls [`SearchState::execute`] on the private copy; a copy
/// whose move fails is dropped immediately.
///
/// # Contract
///
/// - `moves` must be deterministic: the same state yields the same moves in
///   the same order. Depth-first exploration tries them left to right.
/// - `execute` returns `false` for an infeasible move. This prunes one branch
///   and is counted as a failed decision; it is not an error.
/// - `objective` must return `Some` for every state when best-first
///   exploration is selected. Lower is better.
/// - [`crate::search::Explorer::explore`] requires `Eq + Hash` on
///   the state and its moves in both search modes. Only graph search looks
///   at them, to build the closed set; tree-search worlds can simply derive
///   them.
pub trait SearchState: Clone {
    /// A branching choice applicable to this state.
    type Move: Clone + Debug + Display;

    /// Enumerate candidate moves from this state, in preferred order.
    fn moves(&self) -> Vec<Self::Move>;

    /// Apply `mv` in place. Returns `false` if the move is infeasible.
    fn execute(&mut self, mv: &Self::Move) -> bool;

    /// Test whether this state terminates the search, optionally relative to
    /// a caller-supplied goal state.
    fn is_terminate(&self, goal: Option<&Self>) -> bool;

    /// Numeric quality used by best-first ordering (lower is better).
    fn objective(&self) -> Option<f64> {
        None
    }

    /// Label for trace output.
    fn label(&self, decision_count: u64, _depth: u32) -> String {
        decision_count.to_string()
    }
}
