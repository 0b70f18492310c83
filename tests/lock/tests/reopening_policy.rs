//! Successor-update policy on an inconsistent heuristic.
//!
//! On `Detour`, goal counting rates the hub `b` lower through the expensive
//! edge `s -> b` than through the cheap route via `a`, so A* closes `b`
//! before it learns the cheaper path. What happens next depends on
//! `reopen_closed_nodes` and `use_multi_path_dependence`.

use lock_tests::{init_logging, run, Fixture};
use orbit_harness::worlds::Detour;
use orbit_kernel::values::StateValues;
use orbit_search::statistics::Checkpoint;
use orbit_search::{NodeStatus, SearchPolicy, SearchStatus};

fn names(fixture: &Fixture, search: &orbit_search::EagerSearch<'_>) -> Vec<String> {
    search.plan().unwrap().operator_names(&fixture.task)
}

fn hub() -> StateValues {
    StateValues::discrete(vec![2, 1, 1])
}

fn checkpoint(g: i64, f: i64) -> (i64, i64) {
    (g, f)
}

fn checkpoints(search: &orbit_search::EagerSearch<'_>) -> Vec<(i64, i64)> {
    search
        .statistics()
        .checkpoints
        .iter()
        .map(|&Checkpoint { g, f, .. }| (g, f))
        .collect()
}

#[test]
fn reopening_finds_the_optimal_plan() {
    init_logging();
    let fixture = Fixture::new(&Detour, false);
    let policy = SearchPolicy {
        reopen_closed_nodes: true,
        ..SearchPolicy::default()
    };
    let mut search = fixture.astar(fixture.goal_count(), policy);
    assert_eq!(run(&mut search), SearchStatus::Solved);

    assert_eq!(names(&fixture, &search), vec!["s-a", "a-b", "b-g"]);
    assert_eq!(search.plan().unwrap().cost(&fixture.task), 22);
    let stats = search.statistics();
    assert_eq!(stats.reopened_states, 1);
    // s, b, a, b again, g
    assert_eq!(stats.expanded_states, 5);
    assert_eq!(checkpoints(&search), vec![checkpoint(3, 4), checkpoint(22, 22)]);
}

#[test]
fn without_reopening_the_closed_hub_is_left_alone() {
    init_logging();
    let fixture = Fixture::new(&Detour, false);
    let mut search = fixture.astar(fixture.goal_count(), SearchPolicy::default());
    assert_eq!(run(&mut search), SearchStatus::Solved);

    assert_eq!(names(&fixture, &search), vec!["s-b", "b-g"]);
    assert_eq!(search.plan().unwrap().cost(&fixture.task), 23);
    assert_eq!(search.statistics().reopened_states, 0);
    assert_eq!(search.statistics().expanded_states, 4);
    assert_eq!(checkpoints(&search), vec![checkpoint(3, 4), checkpoint(23, 23)]);

    let b = search.registry().find(&hub()).unwrap();
    assert_eq!(search.search_space().info(b).g, 3);
}

#[test]
fn multi_path_dependence_rewires_provenance_only() {
    init_logging();
    let fixture = Fixture::new(&Detour, false);
    let policy = SearchPolicy {
        use_multi_path_dependence: true,
        ..SearchPolicy::default()
    };
    let mut search = fixture.astar(fixture.goal_count(), policy);
    assert_eq!(run(&mut search), SearchStatus::Solved);

    // The hub's parent now points through `a`, so the traced plan takes
    // the cheap route even though the goal was reached with g = 23.
    assert_eq!(names(&fixture, &search), vec!["s-a", "a-b", "b-g"]);
    assert_eq!(search.plan().unwrap().cost(&fixture.task), 22);
    assert_eq!(search.statistics().reopened_states, 0);
    assert_eq!(search.statistics().expanded_states, 4);

    let b = search.registry().find(&hub()).unwrap();
    let info = search.search_space().info(b);
    assert_eq!(info.status, NodeStatus::Closed);
    assert_eq!(info.g, 2);
    let goal = search
        .registry()
        .find(&StateValues::discrete(vec![3, 1, 1]))
        .unwrap();
    assert_eq!(search.search_space().info(goal).g, 23);
}

#[test]
fn reopening_takes_precedence_over_multi_path_dependence() {
    init_logging();
    let fixture = Fixture::new(&Detour, false);
    let policy = SearchPolicy {
        reopen_closed_nodes: true,
        use_multi_path_dependence: true,
        ..SearchPolicy::default()
    };
    let mut search = fixture.astar(fixture.goal_count(), policy);
    assert_eq!(run(&mut search), SearchStatus::Solved);
    assert_eq!(search.statistics().reopened_states, 1);
    assert_eq!(search.plan().unwrap().cost(&fixture.task), 22);
}

#[test]
fn consistent_heuristic_never_reopens() {
    init_logging();
    let fixture = Fixture::new(&Detour, false);
    let policy = SearchPolicy {
        reopen_closed_nodes: true,
        ..SearchPolicy::default()
    };
    let mut search = fixture.astar(fixture.blind(), policy);
    assert_eq!(run(&mut search), SearchStatus::Solved);
    assert_eq!(search.statistics().reopened_states, 0);
    assert_eq!(search.plan().unwrap().cost(&fixture.task), 22);
}

// ---------------------------------------------------------------------------
// Cost bound
// ---------------------------------------------------------------------------

#[test]
fn bound_excludes_plans_at_or_above_it() {
    init_logging();
    let fixture = Fixture::new(&Detour, false);
    let at_optimum = SearchPolicy {
        reopen_closed_nodes: true,
        bound: Some(22),
        ..SearchPolicy::default()
    };
    let mut search = fixture.astar(fixture.goal_count(), at_optimum);
    assert_eq!(run(&mut search), SearchStatus::Failed);

    let above_optimum = SearchPolicy {
        bound: Some(23),
        ..at_optimum
    };
    let mut search = fixture.astar(fixture.goal_count(), above_optimum);
    assert_eq!(run(&mut search), SearchStatus::Solved);
    assert_eq!(names(&fixture, &search), vec!["s-a", "a-b", "b-g"]);
}
