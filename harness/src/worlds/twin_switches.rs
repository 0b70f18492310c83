//! `TwinSwitches`: two interchangeable switches that must both be on.
//!
//! The swap of the two switch variables is an automorphism, so under
//! symmetry reduction "left on" and "right on" are one search node.

use orbit_kernel::symmetry::permutation::Permutation;
use orbit_kernel::task::model::{Fact, Operator, Task, TaskError, Variable};
use orbit_kernel::values::StateValues;

use crate::contract::PlanningWorld;

pub struct TwinSwitches;

impl PlanningWorld for TwinSwitches {
    fn world_id(&self) -> String {
        "twin_switches".into()
    }

    fn task(&self) -> Result<Task, TaskError> {
        Task::new(
            vec![Variable::boolean("left"), Variable::boolean("right")],
            vec![],
            vec![
                Operator::new("turn-on-left", 1)
                    .with_precondition(0, 0)
                    .with_effect(0, 1),
                Operator::new("turn-on-right", 1)
                    .with_precondition(1, 0)
                    .with_effect(1, 1),
            ],
            StateValues::discrete(vec![0, 0]),
            vec![Fact::new(0, 1), Fact::new(1, 1)],
        )
    }

    fn symmetry_generators(&self, task: &Task) -> Vec<Permutation> {
        let domain_sizes: Vec<usize> = task.variables().iter().map(|v| v.domain_size()).collect();
        Permutation::swap_variables(&domain_sizes, 0, 1)
            .into_iter()
            .collect()
    }
}
