//! Search policy types.

use std::time::Duration;

use crate::error::SearchError;

/// Frontier removal policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExplorationType {
    /// Stack: the most recent decision first. Moves are pushed in reverse so
    /// the state's first move is tried first.
    DepthFirst,
    /// Queue: decisions in the order they were formed.
    BreadthFirst,
    /// Priority queue on the referenced state's objective (lower first).
    BestFirst,
}

impl ExplorationType {
    /// Stable lowercase name used in reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DepthFirst => "depth_first",
            Self::BreadthFirst => "breadth_first",
            Self::BestFirst => "best_first",
        }
    }
}

/// Whether visited decisions are deduplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Every expansion is explored, revisits included.
    Tree,
    /// A closed set suppresses decisions that were already popped.
    Graph,
}

impl SearchMode {
    #[must_use]
    pub fn is_graph_search(self) -> bool {
        matches!(self, Self::Graph)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Graph => "graph",
        }
    }
}

/// Order of a reconstructed solution path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathOrder {
    /// Solution state first, initial state last.
    #[default]
    SolutionFirst,
    /// Initial state first, solution state last.
    InitialFirst,
}

/// Search strategy and resource bounds.
///
/// Handed to [`crate::search::Explorer::new`]; nothing in the engine reads
/// ambient configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPolicy {
    pub exploration: ExplorationType,
    pub mode: SearchMode,
    /// Reconstruct the solution path when a solution is found.
    pub return_path: bool,
    pub path_order: PathOrder,
    /// States at this depth or deeper are not expanded.
    pub max_depth: u32,
    /// Hard cap on processed decisions.
    pub max_moves: u64,
    /// Wall-clock cap, checked once per decision.
    pub max_runtime: Option<Duration>,
}

impl SearchPolicy {
    /// Validate bounds before any exploration starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBound`] if `max_depth` or `max_moves` is
    /// zero, or `max_runtime` is a zero duration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_depth == 0 {
            return Err(SearchError::InvalidBound {
                field: "max_depth",
                detail: "must be at least 1".into(),
            });
        }
        if self.max_moves == 0 {
            return Err(SearchError::InvalidBound {
                field: "max_moves",
                detail: "must be at least 1".into(),
            });
        }
        if self.max_runtime.is_some_and(|d| d.is_zero()) {
            return Err(SearchError::InvalidBound {
                field: "max_runtime",
                detail: "must be a positive duration".into(),
            });
        }
        Ok(())
    }

    /// JSON echo of the policy for run reports.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "exploration": self.exploration.name(),
            "max_depth": self.max_depth,
            "max_moves": self.max_moves,
            "max_runtime_ms": self.max_runtime.map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
            "mode": self.mode.name(),
            "path_order": match self.path_order {
                PathOrder::SolutionFirst => "solution_first",
                PathOrder::InitialFirst => "initial_first",
            },
            "return_path": self.return_path,
        })
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            exploration: ExplorationType::DepthFirst,
            mode: SearchMode::Tree,
            return_path: true,
            path_order: PathOrder::SolutionFirst,
            max_depth: 100,
            max_moves: 10_000,
            max_runtime: None,
        }
    }
}
