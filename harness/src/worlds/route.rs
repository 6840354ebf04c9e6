//! Weighted road graph: shortest-route search between cities.
//!
//! Roads are undirected. Each declared road appends to both endpoints'
//! neighbor lists, so move order follows declaration order. A route state
//! is identified by its city alone; accumulated cost does not make two
//! visits distinct, which is what lets graph search cut cycles.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use lodestar_search::SearchState;

/// Read-only road network shared by every state of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadMap {
    neighbors: BTreeMap<String, Vec<(String, u32)>>,
    heuristic: BTreeMap<String, u32>,
}

impl RoadMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an undirected road.
    pub fn road(&mut self, a: &str, b: &str, distance: u32) -> &mut Self {
        self.neighbors
            .entry(a.to_string())
            .or_default()
            .push((b.to_string(), distance));
        self.neighbors
            .entry(b.to_string())
            .or_default()
            .push((a.to_string(), distance));
        self
    }

    /// Set the straight-line estimate from `city` to the goal.
    pub fn estimate(&mut self, city: &str, distance: u32) -> &mut Self {
        self.heuristic.insert(city.to_string(), distance);
        self
    }

    /// Neighbors of `city` in declaration order.
    #[must_use]
    pub fn neighbors(&self, city: &str) -> &[(String, u32)] {
        self.neighbors.get(city).map(Vec::as_slice).unwrap_or_default()
    }

    /// Heuristic estimate for `city` (0 when none was declared).
    #[must_use]
    pub fn heuristic(&self, city: &str) -> u32 {
        self.heuristic.get(city).copied().unwrap_or(0)
    }

    /// Cities that appear on at least one road, sorted.
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.neighbors.keys().map(String::as_str)
    }

    /// Eight cities of the Romania road map, with straight-line distances
    /// to Bucharest.
    #[must_use]
    pub fn romania_excerpt() -> Self {
        let mut map = Self::new();
        map.road("Arad", "Sibiu", 140)
            .road("Arad", "Timisoara", 118)
            .road("Sibiu", "Fagaras", 99)
            .road("Sibiu", "Rimnicu Vilcea", 80)
            .road("Timisoara", "Lugoj", 111)
            .road("Rimnicu Vilcea", "Pitesti", 97)
            .road("Fagaras", "Bucharest", 211)
            .road("Pitesti", "Bucharest", 101);
        for (city, h) in [
            ("Arad", 366),
            ("Bucharest", 0),
            ("Fagaras", 176),
            ("Lugoj", 244),
            ("Pitesti", 100),
            ("Rimnicu Vilcea", 193),
            ("Sibiu", 253),
            ("Timisoara", 329),
        ] {
            map.estimate(city, h);
        }
        map
    }
}

/// Drive to a neighboring city.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Travel {
    pub to: String,
    pub distance: u32,
}

impl fmt::Display for Travel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.to, self.distance)
    }
}

/// Current city and distance driven so far.
#[derive(Debug, Clone)]
pub struct RouteState {
    map: Arc<RoadMap>,
    city: String,
    cost: u32,
}

impl RouteState {
    #[must_use]
    pub fn new(map: Arc<RoadMap>, city: &str) -> Self {
        Self {
            map,
            city: city.to_string(),
            cost: 0,
        }
    }

    /// A goal marker for [`SearchState::is_terminate`].
    #[must_use]
    pub fn goal(&self, city: &str) -> Self {
        Self::new(Arc::clone(&self.map), city)
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl PartialEq for RouteState {
    fn eq(&self, other: &Self) -> bool {
        self.city == other.city
    }
}

impl Eq for RouteState {}

impl Hash for RouteState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.city.hash(state);
    }
}

impl SearchState for RouteState {
    type Move = Travel;

    fn moves(&self) -> Vec<Travel> {
        self.map
            .neighbors(&self.city)
            .iter()
            .map(|(to, distance)| Travel {
                to: to.clone(),
                distance: *distance,
            })
            .collect()
    }

    fn execute(&mut self, mv: &Travel) -> bool {
        let Some(cost) = self.cost.checked_add(mv.distance) else {
            return false;
        };
        self.cost = cost;
        self.city.clone_from(&mv.to);
        true
    }

    fn is_terminate(&self, goal: Option<&Self>) -> bool {
        goal.is_some_and(|g| g.city == self.city)
    }

    /// Accumulated cost plus the straight-line estimate.
    fn objective(&self) -> Option<f64> {
        Some(f64::from(self.cost) + f64::from(self.map.heuristic(&self.city)))
    }

    fn label(&self, _decision_count: u64, _depth: u32) -> String {
        format!("{} ({})", self.city, self.cost)
    }
}
