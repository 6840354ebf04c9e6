//! Route-finding lock tests on the Romania excerpt: breadth-first shortest
//! hop count, depth-first order, best-first cost, cycle termination, and
//! the move budget on cyclic tree search.

use std::collections::HashMap;

use lock_tests::{arad_to_bucharest, policy};
use lodestar_harness::worlds::route::{RoadMap, RouteState};
use lodestar_search::{
    EdgeTarget, ExplorationType, Explorer, NodeId, NullSink, PathOrder, SearchMode,
    SearchOutcome, SearchPolicy, SearchState, TerminationReason, TraceEvent, TraceLog,
};

fn explore(policy: SearchPolicy) -> SearchOutcome<RouteState> {
    let (start, goal) = arad_to_bucharest();
    Explorer::new(policy)
        .explore(start, Some(&goal), &mut NullSink)
        .unwrap()
}

fn cities_and_costs(outcome: &SearchOutcome<RouteState>) -> Vec<(String, u32)> {
    let path = outcome.path.clone().unwrap();
    let path = match path.order() {
        PathOrder::SolutionFirst => path.reversed(),
        PathOrder::InitialFirst => path,
    };
    path.steps()
        .iter()
        .map(|step| (step.state.city().to_string(), step.state.cost()))
        .collect()
}

fn owned(route: &[(&str, u32)]) -> Vec<(String, u32)> {
    route.iter().map(|(c, g)| ((*c).to_string(), *g)).collect()
}

// ---------------------------------------------------------------------------
// Breadth-first
// ---------------------------------------------------------------------------

#[test]
fn breadth_first_graph_search_takes_nine_decisions() {
    let outcome = explore(policy(ExplorationType::BreadthFirst, SearchMode::Graph));
    assert_eq!(outcome.termination, TerminationReason::SolutionFound);
    assert_eq!(outcome.stats.decisions, 9);
    assert_eq!(outcome.stats.failed_decisions, 0);
    assert_eq!(
        cities_and_costs(&outcome),
        owned(&[("Arad", 0), ("Sibiu", 140), ("Fagaras", 239), ("Bucharest", 450)])
    );
}

#[test]
fn breadth_first_tree_search_revisits_and_takes_eleven() {
    let outcome = explore(policy(ExplorationType::BreadthFirst, SearchMode::Tree));
    assert_eq!(outcome.stats.decisions, 11);
    assert_eq!(outcome.solution.unwrap().cost(), 450);
}

#[test]
fn default_path_order_is_solution_first() {
    let outcome = explore(policy(ExplorationType::BreadthFirst, SearchMode::Graph));
    let path = outcome.path.unwrap();
    assert_eq!(path.order(), PathOrder::SolutionFirst);
    assert_eq!(path.steps()[0].state.city(), "Bucharest");
    assert_eq!(path.steps().last().unwrap().state.city(), "Arad");
}

#[test]
fn initial_first_path_order_on_request() {
    let outcome = explore(SearchPolicy {
        path_order: PathOrder::InitialFirst,
        ..policy(ExplorationType::BreadthFirst, SearchMode::Graph)
    });
    let path = outcome.path.unwrap();
    assert_eq!(path.steps()[0].state.city(), "Arad");
    let depths: Vec<u32> = path.steps().iter().map(|s| s.depth).collect();
    assert_eq!(depths, vec![0, 1, 2, 3]);
}

// ---------------------------------------------------------------------------
// Depth-first
// ---------------------------------------------------------------------------

#[test]
fn depth_first_graph_search_follows_move_order() {
    let outcome = explore(policy(ExplorationType::DepthFirst, SearchMode::Graph));
    assert_eq!(outcome.stats.decisions, 13);
    let cities: Vec<String> = cities_and_costs(&outcome).into_iter().map(|(c, _)| c).collect();
    assert_eq!(
        cities,
        vec!["Arad", "Sibiu", "Fagaras", "Sibiu", "Rimnicu Vilcea", "Pitesti", "Bucharest"]
    );
    assert_eq!(outcome.solution.unwrap().cost(), 616);
}

#[test]
fn depth_first_tree_search_on_cycles_is_stopped_by_move_budget() {
    let outcome = explore(SearchPolicy {
        max_moves: 50,
        ..policy(ExplorationType::DepthFirst, SearchMode::Tree)
    });
    assert_eq!(outcome.termination, TerminationReason::MoveBudgetExceeded);
    assert_eq!(outcome.stats.decisions, 50);
    assert!(outcome.solution.is_none());
}

// ---------------------------------------------------------------------------
// Best-first
// ---------------------------------------------------------------------------

#[test]
fn best_first_graph_search_finds_cheapest_route() {
    let outcome = explore(policy(ExplorationType::BestFirst, SearchMode::Graph));
    assert_eq!(outcome.termination, TerminationReason::SolutionFound);
    assert_eq!(outcome.stats.decisions, 14);
    assert_eq!(
        cities_and_costs(&outcome),
        owned(&[
            ("Arad", 0),
            ("Sibiu", 140),
            ("Rimnicu Vilcea", 220),
            ("Pitesti", 317),
            ("Bucharest", 418),
        ])
    );
}

#[test]
fn best_first_pops_in_non_decreasing_objective_order() {
    let (start, goal) = arad_to_bucharest();
    let map = RoadMap::romania_excerpt();
    let mut log = TraceLog::new();
    Explorer::new(policy(ExplorationType::BestFirst, SearchMode::Graph))
        .explore(start, Some(&goal), &mut log)
        .unwrap();

    // Route labels are "City (cost)".
    let mut labels: HashMap<NodeId, String> = HashMap::new();
    let mut popped = Vec::new();
    for event in log.events() {
        match event {
            TraceEvent::Root { node, label } => {
                labels.insert(*node, label.clone());
            }
            TraceEvent::Edge { from, to, .. } => {
                popped.push(*from);
                if let EdgeTarget::Node { node, label } = to {
                    labels.insert(*node, label.clone());
                }
            }
            _ => {}
        }
    }

    let objective = |id: &NodeId| {
        let label = &labels[id];
        let (city, cost) = label.rsplit_once(" (").unwrap();
        let cost: u32 = cost.trim_end_matches(')').parse().unwrap();
        cost + map.heuristic(city)
    };
    let objectives: Vec<u32> = popped.iter().map(objective).collect();
    assert!(!objectives.is_empty());
    assert!(
        objectives.windows(2).all(|w| w[0] <= w[1]),
        "objectives not monotone: {objectives:?}"
    );
}

// ---------------------------------------------------------------------------
// Cycle termination
// ---------------------------------------------------------------------------

#[test]
fn graph_search_terminates_on_unreachable_goal() {
    let (start, _) = arad_to_bucharest();
    let nowhere = start.goal("Zerind");
    for exploration in [
        ExplorationType::DepthFirst,
        ExplorationType::BreadthFirst,
        ExplorationType::BestFirst,
    ] {
        let outcome = Explorer::new(policy(exploration, SearchMode::Graph))
            .explore(start.clone(), Some(&nowhere), &mut NullSink)
            .unwrap();
        assert_eq!(
            outcome.termination,
            TerminationReason::FrontierExhausted,
            "{}",
            exploration.name()
        );
        // Eight two-way roads: every (city, road) decision runs once.
        assert_eq!(outcome.stats.decisions, 16, "{}", exploration.name());
    }
}

#[test]
fn terminal_initial_state_returns_without_decisions() {
    let (start, _) = arad_to_bucharest();
    let here = start.goal("Arad");
    let outcome = Explorer::new(SearchPolicy::default())
        .explore(start.clone(), Some(&here), &mut NullSink)
        .unwrap();
    assert_eq!(outcome.termination, TerminationReason::SolutionFound);
    assert_eq!(outcome.stats.decisions, 0);
    assert!(outcome.solution.unwrap().is_terminate(Some(&here)));
    assert_eq!(outcome.path.unwrap().len(), 1);
}
