//! `Detour`: a task on which goal counting is inconsistent.
//!
//! Two flags start satisfied; the cheap route to the hub `b` passes through
//! `a`, which clears both flags (raising the goal count by two), while the
//! direct edge `s -> b` costs three. A* over goal counting expands `b`
//! through the direct edge first and only later finds the cheaper route, so
//! the optimal plan needs reopening (or, for provenance only, multi-path
//! parent updates).
//!
//! ```text
//!        1        1
//!   s ------> a ------> b ------> g
//!   |                   ^    20
//!   +---------3---------+
//! ```

use orbit_kernel::task::model::{Fact, Operator, Task, TaskError, Variable};
use orbit_kernel::values::StateValues;

use crate::contract::PlanningWorld;

const POS: usize = 0;
const FLAG_1: usize = 1;
const FLAG_2: usize = 2;

pub struct Detour;

impl PlanningWorld for Detour {
    fn world_id(&self) -> String {
        "detour".into()
    }

    fn task(&self) -> Result<Task, TaskError> {
        Task::new(
            vec![
                Variable::new("pos", &["s", "a", "b", "g"]),
                Variable::boolean("flag1"),
                Variable::boolean("flag2"),
            ],
            vec![],
            vec![
                Operator::new("s-a", 1)
                    .with_precondition(POS, 0)
                    .with_effect(POS, 1)
                    .with_effect(FLAG_1, 0)
                    .with_effect(FLAG_2, 0),
                Operator::new("a-b", 1)
                    .with_precondition(POS, 1)
                    .with_effect(POS, 2)
                    .with_effect(FLAG_1, 1)
                    .with_effect(FLAG_2, 1),
                Operator::new("s-b", 3)
                    .with_precondition(POS, 0)
                    .with_effect(POS, 2),
                Operator::new("b-g", 20)
                    .with_precondition(POS, 2)
                    .with_effect(POS, 3),
            ],
            StateValues::discrete(vec![0, 1, 1]),
            vec![Fact::new(POS, 3), Fact::new(FLAG_1, 1), Fact::new(FLAG_2, 1)],
        )
    }
}
