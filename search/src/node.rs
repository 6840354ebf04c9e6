//! Expanded states, their transitions, and the per-run arena that owns them.
//!
//! Every successful expansion allocates one independent state value, but a
//! successor refers to its parent by [`NodeId`] instead of embedding a copy.
//! A node is freed as soon as no pending decision, live child or pin holds
//! it, so states cut by the depth bound and finished subtrees do not
//! outlive their last use.

use std::collections::HashMap;

use crate::contract::SearchState;

/// Handle of a node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Creation index of the node within its run (root = 0).
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// How a successor was produced: the move applied to `previous`.
///
/// Created once when the successor enters the arena and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<M> {
    /// The state the move was applied to.
    pub previous: NodeId,
    /// The applied move.
    pub mv: M,
    /// Depth of the successor (parent depth + 1).
    pub depth: u32,
}

/// An expanded state.
#[derive(Debug, Clone)]
pub struct SearchNode<S: SearchState> {
    pub id: NodeId,
    pub state: S,
    /// `None` only for the initial state.
    pub transition: Option<Transition<S::Move>>,
    /// Trace label assigned when the node was created.
    pub label: String,
}

impl<S: SearchState> SearchNode<S> {
    /// Transition depth (root = 0).
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.transition.as_ref().map_or(0, |t| t.depth)
    }

    /// Whether this is the initial state of the run.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.transition.is_none()
    }
}

/// Stored node plus the references that keep it alive.
#[derive(Debug)]
struct Slot<S: SearchState> {
    node: SearchNode<S>,
    /// Pending decisions on this node plus its live children.
    refs: usize,
    /// Held regardless of `refs` (the retained solution).
    pinned: bool,
}

/// Per-run store of the nodes a search can still reach.
///
/// A node stays while a pending decision or a live child refers to it, or
/// while it is pinned. Releasing the last reference frees the node and
/// walks up its transition chain. Handles are never reused within a run.
#[derive(Debug)]
pub struct NodeArena<S: SearchState> {
    slots: HashMap<NodeId, Slot<S>>,
    created: usize,
    last: Option<NodeId>,
    high_water: usize,
}

impl<S: SearchState> NodeArena<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            created: 0,
            last: None,
            high_water: 0,
        }
    }

    /// Insert the initial state. Only the first node may be a root.
    ///
    /// # Panics
    ///
    /// Panics if the arena already created a node.
    pub fn push_root(&mut self, state: S, label: String) -> NodeId {
        assert!(self.created == 0, "root must be the first node");
        self.push(state, None, label)
    }

    /// Insert a successor of `previous` produced by `mv`. The successor
    /// holds a reference on `previous` until it is freed.
    ///
    /// # Panics
    ///
    /// Panics if `previous` is not live in this arena.
    pub fn push_child(&mut self, previous: NodeId, mv: S::Move, state: S, label: String) -> NodeId {
        let parent = self.slot_mut(previous);
        parent.refs += 1;
        let depth = parent.node.depth() + 1;
        self.push(
            state,
            Some(Transition {
                previous,
                mv,
                depth,
            }),
            label,
        )
    }

    fn push(&mut self, state: S, transition: Option<Transition<S::Move>>, label: String) -> NodeId {
        let id = NodeId(self.created);
        self.created += 1;
        self.slots.insert(
            id,
            Slot {
                node: SearchNode {
                    id,
                    state,
                    transition,
                    label,
                },
                refs: 0,
                pinned: false,
            },
        );
        self.last = Some(id);
        self.high_water = self.high_water.max(self.slots.len());
        id
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut Slot<S> {
        match self.slots.get_mut(&id) {
            Some(slot) => slot,
            None => panic!("node {id} is not live"),
        }
    }

    /// Look up a live node by handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was freed or issued by a different arena.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        match self.slots.get(&id) {
            Some(slot) => &slot.node,
            None => panic!("node {id} is not live"),
        }
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Add `count` pending decisions on `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not live.
    pub fn retain(&mut self, id: NodeId, count: usize) {
        self.slot_mut(id).refs += count;
    }

    /// Drop one reference on `id`, freeing it if nothing else holds it.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not live or holds no reference.
    pub fn release(&mut self, id: NodeId) {
        let slot = self.slot_mut(id);
        assert!(slot.refs > 0, "node {id} released without a reference");
        slot.refs -= 1;
        self.collect(id);
    }

    /// Keep `id` alive regardless of references.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not live.
    pub fn pin(&mut self, id: NodeId) {
        self.slot_mut(id).pinned = true;
    }

    /// Undo [`NodeArena::pin`] and free `id` if nothing else holds it.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not live.
    pub fn unpin(&mut self, id: NodeId) {
        self.slot_mut(id).pinned = false;
        self.collect(id);
    }

    /// Free `id` if it is unreferenced and unpinned, then every ancestor
    /// left unreferenced by that.
    pub fn collect(&mut self, id: NodeId) {
        let mut current = id;
        loop {
            match self.slots.get(&current) {
                Some(slot) if slot.refs == 0 && !slot.pinned => {}
                _ => return,
            }
            let Some(slot) = self.slots.remove(&current) else {
                return;
            };
            let Some(transition) = slot.node.transition else {
                return;
            };
            if let Some(parent) = self.slots.get_mut(&transition.previous) {
                parent.refs -= 1;
            }
            current = transition.previous;
        }
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Nodes created so far, freed ones included.
    #[must_use]
    pub fn created(&self) -> usize {
        self.created
    }

    /// Largest number of simultaneously live nodes.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Handle of the most recently created node, live or not.
    #[must_use]
    pub fn last_id(&self) -> Option<NodeId> {
        self.last
    }
}

impl<S: SearchState> Default for NodeArena<S> {
    fn default() -> Self {
        Self::new()
    }
}
