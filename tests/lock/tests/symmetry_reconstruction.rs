//! Plans found over canonical states must still run from the literal
//! initial state.

use lock_tests::{init_logging, run, Fixture};
use orbit_harness::contract::PlanningWorld;
use orbit_harness::runner::{run_world, HeuristicKind, RunConfig, Strategy};
use orbit_harness::worlds::{Gripper, TwinSwitches};
use orbit_kernel::symmetry::group::{GeneratorGroup, SymmetryGraph};
use orbit_kernel::symmetry::permutation::Permutation;
use orbit_kernel::values::StateValues;
use orbit_search::{SearchPolicy, SearchStatus};

// ---------------------------------------------------------------------------
// Identity laws
// ---------------------------------------------------------------------------

#[test]
fn identity_is_neutral_for_compose_and_apply() {
    let world = Gripper::new(3);
    let task = world.task().unwrap();
    let state = StateValues::discrete(vec![1, 0, 1, 2, 1, 0]);
    let identity = Permutation::identity();
    assert!(identity.apply(&state).same_values(&state));

    for generator in world.symmetry_generators(&task) {
        assert_eq!(Permutation::compose(&generator, &identity), generator);
        assert_eq!(Permutation::compose(&identity, &generator), generator);
        let round_trip = Permutation::compose(&generator, &generator.inverse());
        assert!(round_trip.apply(&state).same_values(&state));
    }
}

#[test]
fn accumulated_permutation_maps_canonical_to_literal() {
    let world = Gripper::new(3);
    let task = world.task().unwrap();
    let group = GeneratorGroup::new(&task, world.symmetry_generators(&task)).unwrap();
    let literal = StateValues::discrete(vec![1, 1, 0, 1, 3, 0]);
    let canonical = group.canonical_state(&literal);
    assert!(canonical.lex_cmp(&literal).is_le());
    let p = group
        .permutation_from_state_to_state(&canonical, &literal)
        .unwrap();
    assert!(p.apply(&canonical).same_values(&literal));
}

// ---------------------------------------------------------------------------
// Reconstruction through the engine
// ---------------------------------------------------------------------------

#[test]
fn twin_switch_plan_names_both_literal_switches() {
    init_logging();
    let fixture = Fixture::new(&TwinSwitches, true);
    let mut search = fixture.astar(fixture.goal_count(), SearchPolicy::default());
    assert_eq!(run(&mut search), SearchStatus::Solved);
    let mut names = search.plan().unwrap().operator_names(&fixture.task);
    names.sort();
    assert_eq!(names, vec!["turn-on-left", "turn-on-right"]);
}

#[test]
fn gripper_optimal_cost_is_unchanged_by_symmetry() {
    init_logging();
    for balls in [2, 3] {
        let world = Gripper::new(balls);
        let plain = Fixture::new(&world, false);
        let reduced = Fixture::new(&world, true);
        let mut plain_search = plain.astar(plain.blind(), SearchPolicy::default());
        let mut reduced_search = reduced.astar(reduced.blind(), SearchPolicy::default());
        assert_eq!(run(&mut plain_search), SearchStatus::Solved);
        assert_eq!(run(&mut reduced_search), SearchStatus::Solved);

        let plain_plan = plain_search.plan().unwrap();
        let reduced_plan = reduced_search.plan().unwrap();
        assert_eq!(
            plain_plan.cost(&plain.task),
            reduced_plan.cost(&reduced.task),
            "gripper_{balls}"
        );
        assert!(reduced.task.is_goal(&reduced.execute(reduced_plan)));
        assert!(
            reduced_search.registry().len() < plain_search.registry().len(),
            "gripper_{balls}: {} vs {}",
            reduced_search.registry().len(),
            plain_search.registry().len()
        );
    }
}

#[test]
fn gripper_optimal_costs() {
    init_logging();
    for (balls, cost) in [(2, 5), (3, 9), (4, 11)] {
        let report = run_world(&Gripper::new(balls), &RunConfig::default().with_symmetry()).unwrap();
        assert!(report.is_solved());
        assert_eq!(report.plan_cost, Some(cost), "gripper_{balls}");
    }
}

#[test]
fn every_strategy_yields_a_valid_symmetric_plan() {
    init_logging();
    for strategy in [Strategy::Astar, Strategy::Greedy, Strategy::GreedyPreferred] {
        let config = RunConfig::astar(HeuristicKind::GoalCount)
            .with_strategy(strategy)
            .with_symmetry();
        // run_world re-executes the plan and errors on an invalid one.
        let report = run_world(&Gripper::new(4), &config).unwrap();
        assert!(report.is_solved(), "{strategy:?}");
    }
}
