//! Closed-set storage for graph search.
//!
//! Membership is `(state, move)` equality: a decision is "already visited"
//! when an equal move has already been popped from an equal state. Reaching
//! an equal state through a different path and trying a different move is
//! still explored.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Set of decisions already popped from the frontier.
///
/// Keyed state-first so that `contains` borrows both halves of the key and
/// only `insert` clones.
#[derive(Debug)]
pub struct ClosedSet<S, M> {
    by_state: HashMap<S, HashSet<M>>,
    len: usize,
}

impl<S: Eq + Hash + Clone, M: Eq + Hash + Clone> ClosedSet<S, M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_state: HashMap::new(),
            len: 0,
        }
    }

    /// Mark `(state, mv)` visited.
    ///
    /// Returns `false` if it was already present (set not modified).
    pub fn insert(&mut self, state: &S, mv: &M) -> bool {
        if self.contains(state, mv) {
            return false;
        }
        self.by_state
            .entry(state.clone())
            .or_default()
            .insert(mv.clone());
        self.len += 1;
        true
    }

    /// Whether `(state, mv)` has been visited.
    #[must_use]
    pub fn contains(&self, state: &S, mv: &M) -> bool {
        self.by_state
            .get(state)
            .is_some_and(|moves| moves.contains(mv))
    }

    /// Number of visited decisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<S: Eq + Hash + Clone, M: Eq + Hash + Clone> Default for ClosedSet<S, M> {
    fn default() -> Self {
        Self::new()
    }
}
