//! End-to-end scenarios: the engine on the smallest worlds that exercise
//! each termination path.

use lock_tests::{init_logging, run, Fixture};
use orbit_harness::worlds::{AlreadySolved, Disconnected, Gripper, SingleSwitch, TwinSwitches};
use orbit_kernel::task::model::OperatorId;
use orbit_kernel::values::StateValues;
use orbit_search::{NodeStatus, SearchPolicy, SearchStatus};

// ---------------------------------------------------------------------------
// Scenario 1: one operator to the goal
// ---------------------------------------------------------------------------

#[test]
fn single_switch_finds_the_one_operator_plan() {
    init_logging();
    let fixture = Fixture::new(&SingleSwitch, false);
    let mut search = fixture.astar(fixture.blind(), SearchPolicy::default());
    assert_eq!(run(&mut search), SearchStatus::Solved);

    assert_eq!(search.plan().unwrap().steps, vec![OperatorId(0)]);

    let registry = search.registry();
    let initial = registry.initial_state();
    let goal = registry.find(&StateValues::discrete(vec![1])).unwrap();
    assert_eq!(search.search_space().info(initial).g, 0);
    assert_eq!(search.search_space().info(goal).g, 1);
    assert_eq!(search.search_space().info(goal).parent_state_id, Some(initial));
}

#[test]
fn single_switch_dump_lists_both_nodes() {
    init_logging();
    let fixture = Fixture::new(&SingleSwitch, false);
    let mut search = fixture.astar(fixture.blind(), SearchPolicy::default());
    run(&mut search);
    assert_eq!(
        search.dump_search_space(),
        "#0 [CLOSED] [0] has no parent\n#1 [CLOSED] [1] created by turn-on from #0\n"
    );
}

// ---------------------------------------------------------------------------
// Scenario 2: initial state is a goal
// ---------------------------------------------------------------------------

#[test]
fn already_solved_on_first_step() {
    init_logging();
    let fixture = Fixture::new(&AlreadySolved, false);
    let mut search = fixture.astar(fixture.goal_count(), SearchPolicy::default());
    assert_eq!(search.step().unwrap(), SearchStatus::Solved);
    assert!(search.plan().unwrap().is_empty());
    assert_eq!(search.statistics().expanded_states, 1);

    // Terminal status is sticky.
    assert_eq!(search.step().unwrap(), SearchStatus::Solved);
    assert_eq!(search.statistics().expanded_states, 1);
}

// ---------------------------------------------------------------------------
// Scenario 3: goal unreachable
// ---------------------------------------------------------------------------

#[test]
fn disconnected_fails_after_exhausting_the_frontier() {
    init_logging();
    let fixture = Fixture::new(&Disconnected, false);
    let mut search = fixture.astar(fixture.blind(), SearchPolicy::default());
    assert_eq!(run(&mut search), SearchStatus::Failed);
    assert!(search.plan().is_none());
    // a and b are reachable; c and d are never generated.
    assert_eq!(search.registry().len(), 2);
    assert_eq!(search.statistics().expanded_states, 2);
    assert_eq!(search.search_space().count_status(NodeStatus::Closed), 2);
    assert_eq!(search.search_space().count_status(NodeStatus::Open), 0);

    assert_eq!(search.step().unwrap(), SearchStatus::Failed);
}

// ---------------------------------------------------------------------------
// Scenario 4: symmetric variables collapse
// ---------------------------------------------------------------------------

#[test]
fn twin_switches_collapse_but_plan_stays_concrete() {
    init_logging();
    let fixture = Fixture::new(&TwinSwitches, true);
    let mut search = fixture.astar(fixture.blind(), SearchPolicy::default());
    assert_eq!(run(&mut search), SearchStatus::Solved);

    // [0, 0], the canonical one-on state, and [1, 1].
    assert_eq!(search.searched_states(), 3);
    // Reconstruction interns the concrete [1, 0] the recorded operator produces.
    assert_eq!(search.registry().len(), 4);
    assert_eq!(search.search_space().count_status(NodeStatus::New), 0);

    let plan = search.plan().unwrap();
    assert_eq!(plan.len(), 2);
    assert_ne!(plan.steps[0], plan.steps[1]);
    let end = fixture.execute(plan);
    assert!(end.same_values(&StateValues::discrete(vec![1, 1])));
}

#[test]
fn twin_switches_without_symmetry_visit_both_orders() {
    init_logging();
    let fixture = Fixture::new(&TwinSwitches, false);
    let mut search = fixture.astar(fixture.blind(), SearchPolicy::default());
    assert_eq!(run(&mut search), SearchStatus::Solved);
    assert_eq!(search.registry().len(), 4);
    assert_eq!(search.plan().unwrap().steps, vec![OperatorId(0), OperatorId(1)]);
}

// ---------------------------------------------------------------------------
// Plan soundness without symmetry
// ---------------------------------------------------------------------------

#[test]
fn traced_plan_reaches_the_goal_state() {
    init_logging();
    let fixture = Fixture::new(&Gripper::new(2), false);
    let mut search = fixture.astar(fixture.goal_count(), SearchPolicy::default());
    assert_eq!(run(&mut search), SearchStatus::Solved);
    let plan = search.plan().unwrap();
    let end = fixture.execute(plan);
    assert!(fixture.task.is_goal(&end));
    let goal = search.registry().find(&end).unwrap();
    assert_eq!(search.search_space().info(goal).status, NodeStatus::Closed);
}
