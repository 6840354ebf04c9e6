//! Property tests over generated constraint problems: exhaustiveness,
//! breadth-first depth order, depth and move bounds, and path replay.

use lodestar_harness::worlds::csp::{Assignment, CspMove, Relation};
use lodestar_search::{
    ExplorationType, Explorer, NullSink, SearchMode, SearchPolicy, SearchState, TerminationReason,
    TraceEvent, TraceLog,
};
use proptest::prelude::*;

/// Decisions and failed decisions to enumerate domains of these sizes.
fn expected_counts(sizes: &[usize]) -> (u64, u64) {
    match sizes.split_first() {
        None => (0, 0),
        Some((&k, rest)) => branch_counts(k, rest),
    }
}

/// Counts below a state whose next variable has `k` candidates left.
fn branch_counts(k: usize, rest: &[usize]) -> (u64, u64) {
    let (rest_decisions, rest_failed) = expected_counts(rest);
    // `==` assigns, then the remaining variables are enumerated.
    let mut decisions = 1 + rest_decisions;
    let mut failed = rest_failed;
    // `!=` removes one candidate.
    decisions += 1;
    match k {
        1 => failed += 1,
        2 => {
            decisions += rest_decisions;
            failed += rest_failed;
        }
        _ => {
            let (d, f) = branch_counts(k - 1, rest);
            decisions += d;
            failed += f;
        }
    }
    (decisions, failed)
}

fn domains() -> impl Strategy<Value = Vec<usize>> {
    proptest::collection::vec(1usize..=3, 1..=4)
}

fn problem(sizes: &[usize]) -> Assignment {
    Assignment::new(sizes.iter().enumerate().map(|(i, &k)| {
        let values: Vec<i64> = (0..k as i64).map(|v| v * 10 + i as i64).collect();
        (format!("v{i}"), values)
    }))
}

fn edge_depths(log: &TraceLog) -> Vec<u32> {
    log.edges()
        .filter_map(|e| match e {
            TraceEvent::Edge { depth, .. } => Some(*depth),
            _ => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn tree_search_visits_the_whole_tree(sizes in domains(), breadth in any::<bool>()) {
        let exploration = if breadth {
            ExplorationType::BreadthFirst
        } else {
            ExplorationType::DepthFirst
        };
        let outcome = Explorer::new(SearchPolicy { exploration, ..SearchPolicy::default() })
            .explore(problem(&sizes), None, &mut NullSink)
            .unwrap();
        let (decisions, failed) = expected_counts(&sizes);
        prop_assert_eq!(outcome.termination, TerminationReason::FrontierExhausted);
        prop_assert_eq!(outcome.stats.decisions, decisions);
        prop_assert_eq!(outcome.stats.failed_decisions, failed);
    }

    #[test]
    fn breadth_first_pops_in_depth_order(sizes in domains(), graph in any::<bool>()) {
        let mode = if graph { SearchMode::Graph } else { SearchMode::Tree };
        let mut log = TraceLog::new();
        Explorer::new(SearchPolicy {
            exploration: ExplorationType::BreadthFirst,
            mode,
            ..SearchPolicy::default()
        })
        .explore(problem(&sizes), None, &mut log)
        .unwrap();
        let depths = edge_depths(&log);
        prop_assert!(depths.windows(2).all(|w| w[0] <= w[1]), "{:?}", depths);
    }

    #[test]
    fn move_budget_is_never_exceeded(sizes in domains(), max_moves in 1u64..40) {
        let outcome = Explorer::new(SearchPolicy { max_moves, ..SearchPolicy::default() })
            .explore(problem(&sizes), None, &mut NullSink)
            .unwrap();
        let (total, _) = expected_counts(&sizes);
        prop_assert!(outcome.stats.decisions <= max_moves);
        prop_assert_eq!(outcome.stats.decisions, total.min(max_moves));
        if total > max_moves {
            prop_assert_eq!(outcome.termination, TerminationReason::MoveBudgetExceeded);
        }
    }

    #[test]
    fn no_state_at_the_depth_bound_is_expanded(sizes in domains(), max_depth in 1u32..6) {
        let mut log = TraceLog::new();
        Explorer::new(SearchPolicy { max_depth, ..SearchPolicy::default() })
            .explore(problem(&sizes), None, &mut log)
            .unwrap();
        prop_assert!(edge_depths(&log).iter().all(|&d| d < max_depth));
    }

    #[test]
    fn replaying_a_solution_path_reproduces_the_solution(
        sizes in domains(),
        picks in proptest::collection::vec(0usize..3, 4),
        breadth in any::<bool>(),
    ) {
        // Goal: one candidate per variable.
        let initial = problem(&sizes);
        let mut goal = initial.clone();
        for (i, &k) in sizes.iter().enumerate() {
            let value = (picks[i] % k) as i64 * 10 + i as i64;
            let mv = CspMove {
                var: format!("v{i}"),
                relation: Relation::Eq,
                value,
            };
            prop_assert!(goal.execute(&mv));
        }

        let exploration = if breadth {
            ExplorationType::BreadthFirst
        } else {
            ExplorationType::DepthFirst
        };
        let outcome = Explorer::new(SearchPolicy { exploration, ..SearchPolicy::default() })
            .explore(initial.clone(), Some(&goal), &mut NullSink)
            .unwrap();
        prop_assert!(outcome.is_success());

        let mut replayed = initial;
        for mv in outcome.path.as_ref().unwrap().moves() {
            prop_assert!(replayed.execute(mv));
        }
        prop_assert_eq!(replayed.values(), goal.values());
        let solution = outcome.solution.unwrap();
        prop_assert_eq!(solution.values(), goal.values());
    }
}
