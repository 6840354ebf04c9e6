//! Shared helpers for lodestar benchmark suites.

use std::sync::Arc;

use lodestar_harness::worlds::csp::Assignment;
use lodestar_harness::worlds::route::{RoadMap, RouteState};

/// `vars` variables, each with `values` candidates.
#[must_use]
pub fn uniform_csp(vars: usize, values: i64) -> Assignment {
    Assignment::new((0..vars).map(|i| (format!("v{i}"), (0..values).collect())))
}

/// A `side × side` grid of unit roads, from the top-left corner to the
/// bottom-right corner. Every interior road closes a cycle.
///
/// # Panics
///
/// Panics if `side` is zero.
#[must_use]
pub fn grid_route(side: usize) -> (RouteState, RouteState) {
    assert!(side > 0, "grid needs at least one city");
    let city = |r: usize, c: usize| format!("r{r}c{c}");
    let mut map = RoadMap::new();
    for r in 0..side {
        for c in 0..side {
            if c + 1 < side {
                map.road(&city(r, c), &city(r, c + 1), 1);
            }
            if r + 1 < side {
                map.road(&city(r, c), &city(r + 1, c), 1);
            }
        }
    }
    let start = RouteState::new(Arc::new(map), &city(0, 0));
    let goal = start.goal(&city(side - 1, side - 1));
    (start, goal)
}
