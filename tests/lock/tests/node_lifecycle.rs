//! Search node status machine and cost bookkeeping.
//!
//! These tests drive `SearchSpace` and `SearchNode` directly, without the
//! engine, so every transition is explicit.

use orbit_harness::contract::PlanningWorld;
use orbit_harness::worlds::Detour;
use orbit_kernel::registry::{StateId, StateRegistry};
use orbit_kernel::task::cost::CostType;
use orbit_kernel::task::model::{OperatorId, Task};
use orbit_kernel::task::successor::SuccessorGenerator;
use orbit_search::{NodeStatus, PlanningContext, SearchNode, SearchSpace};

fn detour() -> Task {
    Detour.task().unwrap()
}

/// Registers the initial state and its two direct successors.
fn states(task: &Task) -> (StateRegistry, StateId, StateId, StateId) {
    let mut registry = StateRegistry::new(task);
    let s = registry.initial_state();
    let a = registry.successor_state(task, s, OperatorId(0));
    let b = registry.successor_state(task, s, OperatorId(2));
    (registry, s, a, b)
}

fn predicates(node: &SearchNode<'_>) -> [bool; 4] {
    [node.is_new(), node.is_open(), node.is_closed(), node.is_dead_end()]
}

// ---------------------------------------------------------------------------
// Status predicates
// ---------------------------------------------------------------------------

#[test]
fn status_predicates_are_exclusive_and_exhaustive() {
    lock_tests::init_logging();
    let task = detour();
    let (_registry, s, a, b) = states(&task);
    let mut space = SearchSpace::new(CostType::Normal);

    let node = space.get_node(s);
    assert_eq!(predicates(&node), [true, false, false, false]);
    assert_eq!(node.status(), NodeStatus::New);

    space.get_node(s).open_initial();
    assert_eq!(predicates(&space.get_node(s)), [false, true, false, false]);

    space.get_node(s).close();
    assert_eq!(predicates(&space.get_node(s)), [false, false, true, false]);

    let parent = space.get_node(s).snapshot();
    space.get_node(a).open(parent, OperatorId(0), task.operator(OperatorId(0)));
    space.get_node(a).mark_as_dead_end();
    assert_eq!(predicates(&space.get_node(a)), [false, false, false, true]);

    assert_eq!(space.count_status(NodeStatus::Closed), 1);
    assert_eq!(space.count_status(NodeStatus::DeadEnd), 1);
    assert_eq!(space.info(b).status, NodeStatus::New);
}

// ---------------------------------------------------------------------------
// Initial node
// ---------------------------------------------------------------------------

#[test]
fn initial_node_has_zero_cost_and_empty_trace() {
    lock_tests::init_logging();
    let task = detour();
    let successors = SuccessorGenerator::new(&task);
    let context = PlanningContext::new(&task, &successors);
    let (mut registry, s, _, _) = states(&task);
    let mut space = SearchSpace::new(CostType::Normal);

    space.get_node(s).open_initial();
    let node = space.get_node(s);
    assert_eq!(node.g(), 0);
    assert_eq!(node.real_g(), 0);
    assert_eq!(node.parent_state_id(), None);
    assert_eq!(node.creating_operator(), None);

    let plan = space.trace_path(s, &mut registry, &context).unwrap();
    assert!(plan.is_empty());
}

// ---------------------------------------------------------------------------
// Cost arithmetic
// ---------------------------------------------------------------------------

#[test]
fn open_adds_adjusted_and_true_costs() {
    let task = detour();
    let (_registry, s, _, b) = states(&task);
    let mut space = SearchSpace::new(CostType::PlusOne);
    space.get_node(s).open_initial();
    let parent = space.get_node(s).snapshot();

    // s-b costs 3.
    space.get_node(b).open(parent, OperatorId(2), task.operator(OperatorId(2)));
    let node = space.get_node(b);
    assert_eq!(node.g(), 4);
    assert_eq!(node.real_g(), 3);
    assert_eq!(node.parent_state_id(), Some(s));
    assert_eq!(node.creating_operator(), Some(OperatorId(2)));
}

#[test]
fn repeated_reopen_does_not_drift() {
    let task = detour();
    let (_registry, s, a, b) = states(&task);
    let mut space = SearchSpace::new(CostType::One);
    space.get_node(s).open_initial();
    let root = space.get_node(s).snapshot();
    space.get_node(a).open(root, OperatorId(0), task.operator(OperatorId(0)));
    let via_a = space.get_node(a).snapshot();
    space.get_node(b).open(root, OperatorId(2), task.operator(OperatorId(2)));

    for _ in 0..5 {
        space.get_node(b).close();
        // a-b costs 1.
        space.get_node(b).reopen(via_a, OperatorId(1), task.operator(OperatorId(1)));
        let node = space.get_node(b);
        assert!(node.is_open());
        assert_eq!(node.g(), 2);
        assert_eq!(node.real_g(), 2);
        assert_eq!(node.parent_state_id(), Some(a));
    }
}

#[test]
fn update_parent_keeps_status() {
    let task = detour();
    let (_registry, s, a, b) = states(&task);
    let mut space = SearchSpace::new(CostType::Normal);
    space.get_node(s).open_initial();
    let root = space.get_node(s).snapshot();
    space.get_node(a).open(root, OperatorId(0), task.operator(OperatorId(0)));
    space.get_node(b).open(root, OperatorId(2), task.operator(OperatorId(2)));
    space.get_node(b).close();

    let via_a = space.get_node(a).snapshot();
    space.get_node(b).update_parent(via_a, OperatorId(1), task.operator(OperatorId(1)));
    let info = space.info(b);
    assert_eq!(info.status, NodeStatus::Closed);
    assert_eq!(info.g, 2);
    assert_eq!(info.parent_state_id, Some(a));
    assert_eq!(info.creating_operator, Some(OperatorId(1)));
}

// ---------------------------------------------------------------------------
// Illegal transitions
// ---------------------------------------------------------------------------

#[test]
#[should_panic(expected = "reopen on #1 in status NEW")]
fn reopen_from_new_panics() {
    let task = detour();
    let (_registry, s, a, _) = states(&task);
    let mut space = SearchSpace::new(CostType::Normal);
    space.get_node(s).open_initial();
    let root = space.get_node(s).snapshot();
    space.get_node(a).reopen(root, OperatorId(0), task.operator(OperatorId(0)));
}

#[test]
#[should_panic(expected = "update_parent on #1 in status NEW")]
fn update_parent_from_new_panics() {
    let task = detour();
    let (_registry, s, a, _) = states(&task);
    let mut space = SearchSpace::new(CostType::Normal);
    space.get_node(s).open_initial();
    let root = space.get_node(s).snapshot();
    space.get_node(a).update_parent(root, OperatorId(0), task.operator(OperatorId(0)));
}

#[test]
#[should_panic(expected = "close on #0 in status NEW")]
fn close_from_new_panics() {
    let task = detour();
    let (_registry, s, _, _) = states(&task);
    let mut space = SearchSpace::new(CostType::Normal);
    space.get_node(s).close();
}

#[test]
#[should_panic(expected = "open on #0 in status CLOSED")]
fn open_twice_panics() {
    let task = detour();
    let (_registry, s, _, _) = states(&task);
    let mut space = SearchSpace::new(CostType::Normal);
    space.get_node(s).open_initial();
    space.get_node(s).close();
    let root = space.get_node(s).snapshot();
    space.get_node(s).open(root, OperatorId(0), task.operator(OperatorId(0)));
}
