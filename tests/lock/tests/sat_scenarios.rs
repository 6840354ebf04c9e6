//! CNF satisfiability lock tests: failed assignments prune branches, and
//! each strategy reaches the same model with known decision counts.

use lock_tests::{policy, small_formula};
use lodestar_harness::worlds::sat::SatState;
use lodestar_search::{
    ExplorationType, Explorer, NullSink, SearchMode, SearchOutcome, SearchState,
    TerminationReason,
};

fn explore(exploration: ExplorationType, initial: SatState) -> SearchOutcome<SatState> {
    Explorer::new(policy(exploration, SearchMode::Tree))
        .explore(initial, None, &mut NullSink)
        .unwrap()
}

fn model(outcome: &SearchOutcome<SatState>) -> Vec<(u32, bool)> {
    outcome
        .solution
        .as_ref()
        .unwrap()
        .values()
        .iter()
        .map(|(k, v)| (*k, *v))
        .collect()
}

#[test]
fn every_strategy_finds_the_model() {
    for (exploration, decisions, failed) in [
        (ExplorationType::DepthFirst, 11, 5),
        (ExplorationType::BreadthFirst, 12, 6),
        (ExplorationType::BestFirst, 12, 6),
    ] {
        let outcome = explore(exploration, small_formula());
        let name = exploration.name();
        assert_eq!(outcome.termination, TerminationReason::SolutionFound, "{name}");
        assert_eq!(outcome.stats.decisions, decisions, "{name}");
        assert_eq!(outcome.stats.failed_decisions, failed, "{name}");
        assert_eq!(model(&outcome), vec![(1, false), (2, true), (3, false)], "{name}");
    }
}

#[test]
fn solution_satisfies_every_clause() {
    let outcome = explore(ExplorationType::DepthFirst, small_formula());
    let solution = outcome.solution.unwrap();
    assert_eq!(solution.unsatisfied(), 0);
    assert!(solution.is_terminate(None));
}

#[test]
fn contradiction_fails_both_branches() {
    let outcome = explore(
        ExplorationType::DepthFirst,
        SatState::new(vec![vec![1], vec![-1]]),
    );
    assert_eq!(outcome.termination, TerminationReason::FrontierExhausted);
    assert_eq!(outcome.stats.decisions, 2);
    assert_eq!(outcome.stats.failed_decisions, 2);
    assert!(outcome.solution.is_none());
}

#[test]
fn unsatisfiable_two_variable_formula_is_exhausted() {
    let formula = vec![vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]];
    let outcome = explore(ExplorationType::DepthFirst, SatState::new(formula));
    assert_eq!(outcome.termination, TerminationReason::FrontierExhausted);
    assert_eq!(outcome.stats.decisions, 6);
    assert_eq!(outcome.stats.failed_decisions, 4);
}

#[test]
fn replaying_the_path_reproduces_the_model() {
    let outcome = explore(ExplorationType::BreadthFirst, small_formula());
    let mut replayed = small_formula();
    for mv in outcome.path.as_ref().unwrap().moves() {
        assert!(replayed.execute(mv));
    }
    assert_eq!(&replayed, outcome.solution.as_ref().unwrap());
}
