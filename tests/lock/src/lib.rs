//! Shared fixtures for the lock tests and the `search_fixture` binary.
//!
//! Every fixture is a pure function of its arguments, so separate test
//! binaries and separate processes see identical worlds.

use std::sync::Arc;

use lodestar_harness::worlds::csp::Assignment;
use lodestar_harness::worlds::route::{RoadMap, RouteState};
use lodestar_harness::worlds::sat::SatState;
use lodestar_search::{ExplorationType, SearchMode, SearchPolicy};

/// `x ∈ {1, 2}`, `y ∈ {10, 20}`, `z ∈ {100, 200}`.
#[must_use]
pub fn three_variable_csp() -> Assignment {
    Assignment::new([("x", vec![1, 2]), ("y", vec![10, 20]), ("z", vec![100, 200])])
}

/// Start (Arad) and goal (Bucharest) on the Romania excerpt.
#[must_use]
pub fn arad_to_bucharest() -> (RouteState, RouteState) {
    let start = RouteState::new(Arc::new(RoadMap::romania_excerpt()), "Arad");
    let goal = start.goal("Bucharest");
    (start, goal)
}

/// `(x1 ∨ x2) ∧ (¬x1 ∨ x3) ∧ (¬x2 ∨ ¬x3) ∧ (¬x1 ∨ ¬x3)`.
///
/// Its only model with `x1 = false` reached first is `{1: F, 2: T, 3: F}`.
#[must_use]
pub fn small_formula() -> SatState {
    SatState::new(vec![vec![1, 2], vec![-1, 3], vec![-2, -3], vec![-1, -3]])
}

/// Default policy with the given strategy and mode.
#[must_use]
pub fn policy(exploration: ExplorationType, mode: SearchMode) -> SearchPolicy {
    SearchPolicy {
        exploration,
        mode,
        ..SearchPolicy::default()
    }
}

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`
/// (default `warn`). Safe to call more than once.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
