//! Open-set storage: the exploration strategy.
//!
//! Each [`ExplorationType`] maps to one removal policy:
//!
//! | exploration    | storage            | removes first                      |
//! |----------------|--------------------|------------------------------------|
//! | depth-first    | [`StackFrontier`]    | last inserted                      |
//! | breadth-first  | [`QueueFrontier`]    | first inserted                     |
//! | best-first     | [`PriorityFrontier`] | lowest objective, then oldest      |

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::decision::{Decision, DecisionKey};
use crate::policy::ExplorationType;

/// Container of pending decisions.
///
/// `remove` returns `None` only when the frontier is empty; no variant
/// blocks or drops entries.
pub trait Frontier<M> {
    /// Add a decision.
    fn insert(&mut self, decision: Decision<M>);

    /// Remove the next decision under this frontier's policy.
    fn remove(&mut self) -> Option<Decision<M>>;

    /// Current number of pending decisions.
    fn len(&self) -> usize;

    /// Whether no decision is pending.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest size this frontier has reached.
    fn high_water(&self) -> u64;
}

/// Build the frontier for an exploration strategy.
#[must_use]
pub fn new_frontier<M: 'static>(exploration: ExplorationType) -> Box<dyn Frontier<M>> {
    match exploration {
        ExplorationType::DepthFirst => Box::new(StackFrontier::new()),
        ExplorationType::BreadthFirst => Box::new(QueueFrontier::new()),
        ExplorationType::BestFirst => Box::new(PriorityFrontier::new()),
    }
}

fn bump(high_water: &mut u64, len: usize) {
    let len = len as u64;
    if len > *high_water {
        *high_water = len;
    }
}

/// Last-in, first-out storage (depth-first).
#[derive(Debug)]
pub struct StackFrontier<M> {
    items: Vec<Decision<M>>,
    high_water: u64,
}

impl<M> StackFrontier<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            high_water: 0,
        }
    }
}

impl<M> Default for StackFrontier<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Frontier<M> for StackFrontier<M> {
    fn insert(&mut self, decision: Decision<M>) {
        self.items.push(decision);
        bump(&mut self.high_water, self.items.len());
    }

    fn remove(&mut self) -> Option<Decision<M>> {
        self.items.pop()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}

/// First-in, first-out storage (breadth-first).
#[derive(Debug)]
pub struct QueueFrontier<M> {
    items: VecDeque<Decision<M>>,
    high_water: u64,
}

impl<M> QueueFrontier<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            high_water: 0,
        }
    }
}

impl<M> Default for QueueFrontier<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Frontier<M> for QueueFrontier<M> {
    fn insert(&mut self, decision: Decision<M>) {
        self.items.push_back(decision);
        bump(&mut self.high_water, self.items.len());
    }

    fn remove(&mut self) -> Option<Decision<M>> {
        self.items.pop_front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}

/// A heap entry wrapping a decision with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<DecisionKey>` to get
/// min-heap behavior (lowest objective first).
#[derive(Debug)]
struct HeapEntry<M> {
    key: Reverse<DecisionKey>,
    decision: Decision<M>,
}

impl<M> PartialEq for HeapEntry<M> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<M> Eq for HeapEntry<M> {}

impl<M> PartialOrd for HeapEntry<M> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<M> Ord for HeapEntry<M> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Lowest-objective-first storage (best-first).
///
/// Ties on objective are removed in insertion order, which the driver
/// guarantees through `creation_order`.
#[derive(Debug)]
pub struct PriorityFrontier<M> {
    heap: BinaryHeap<HeapEntry<M>>,
    high_water: u64,
}

impl<M> PriorityFrontier<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            high_water: 0,
        }
    }
}

impl<M> Default for PriorityFrontier<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Frontier<M> for PriorityFrontier<M> {
    fn insert(&mut self, decision: Decision<M>) {
        self.heap.push(HeapEntry {
            key: Reverse(DecisionKey::from(&decision)),
            decision,
        });
        bump(&mut self.high_water, self.heap.len());
    }

    fn remove(&mut self) -> Option<Decision<M>> {
        self.heap.pop().map(|e| e.decision)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn high_water(&self) -> u64 {
        self.high_water
    }
}
