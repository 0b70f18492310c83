//! Minimal single-purpose worlds: one operator, nothing to do, and no way
//! to the goal.

use orbit_kernel::task::model::{Fact, Operator, Task, TaskError, Variable};
use orbit_kernel::values::StateValues;

use crate::contract::PlanningWorld;

/// One boolean variable, one operator of cost 1 setting it; goal: set.
pub struct SingleSwitch;

impl PlanningWorld for SingleSwitch {
    fn world_id(&self) -> String {
        "single_switch".into()
    }

    fn task(&self) -> Result<Task, TaskError> {
        Task::new(
            vec![Variable::new("switch", &["0", "1"])],
            vec![],
            vec![Operator::new("turn-on", 1)
                .with_precondition(0, 0)
                .with_effect(0, 1)],
            StateValues::discrete(vec![0]),
            vec![Fact::new(0, 1)],
        )
    }
}

/// The initial state already satisfies the goal.
pub struct AlreadySolved;

impl PlanningWorld for AlreadySolved {
    fn world_id(&self) -> String {
        "already_solved".into()
    }

    fn task(&self) -> Result<Task, TaskError> {
        Task::new(
            vec![Variable::new("switch", &["0", "1"])],
            vec![],
            vec![Operator::new("turn-off", 1)
                .with_precondition(0, 1)
                .with_effect(0, 0)],
            StateValues::discrete(vec![1]),
            vec![Fact::new(0, 1)],
        )
    }
}

/// Two islands of a small graph; the goal lies on the unreachable one.
pub struct Disconnected;

impl PlanningWorld for Disconnected {
    fn world_id(&self) -> String {
        "disconnected".into()
    }

    fn task(&self) -> Result<Task, TaskError> {
        let road = |name: &str, from: u32, to: u32| {
            Operator::new(name, 1)
                .with_precondition(0, from)
                .with_effect(0, to)
        };
        Task::new(
            vec![Variable::new("at", &["a", "b", "c", "d"])],
            vec![],
            vec![
                road("a-b", 0, 1),
                road("b-a", 1, 0),
                road("c-d", 2, 3),
                road("d-c", 3, 2),
            ],
            StateValues::discrete(vec![0]),
            vec![Fact::new(0, 3)],
        )
    }
}
