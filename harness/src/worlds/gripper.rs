//! `Gripper`: a robot with two grippers carries balls from room A to room B.
//!
//! # Variables
//!
//! | index | variable      | values                              |
//! |-------|---------------|-------------------------------------|
//! | 0     | `robot`       | `rooma`, `roomb`                    |
//! | 1     | `free-left`   | `false`, `true`                     |
//! | 2     | `free-right`  | `false`, `true`                     |
//! | 3 + i | `ball<i>`     | `rooma`, `roomb`, `left`, `right`   |
//!
//! Balls are interchangeable and so are the two grippers. The symmetry
//! generators are the adjacent ball transpositions plus the gripper swap
//! (which also exchanges the `left`/`right` values of every ball).

use orbit_kernel::symmetry::permutation::Permutation;
use orbit_kernel::task::model::{Fact, Operator, Task, TaskError, Variable};
use orbit_kernel::values::StateValues;

use crate::contract::PlanningWorld;

const ROOMS: [&str; 2] = ["rooma", "roomb"];
const GRIPPERS: [&str; 2] = ["left", "right"];
const ROBOT: usize = 0;
const FIRST_BALL: usize = 3;

/// Variable holding whether `gripper` (0 or 1) is free.
fn free_var(gripper: usize) -> usize {
    1 + gripper
}

/// Value of a ball variable meaning "held by `gripper`".
fn held_value(gripper: usize) -> u32 {
    2 + u32::try_from(gripper).unwrap_or(0)
}

#[derive(Debug, Clone, Copy)]
pub struct Gripper {
    pub balls: usize,
}

impl Gripper {
    #[must_use]
    pub fn new(balls: usize) -> Self {
        Self { balls }
    }

    fn ball_var(ball: usize) -> usize {
        FIRST_BALL + ball
    }
}

impl PlanningWorld for Gripper {
    fn world_id(&self) -> String {
        format!("gripper_{}", self.balls)
    }

    fn task(&self) -> Result<Task, TaskError> {
        let mut variables = vec![
            Variable::new("robot", &ROOMS),
            Variable::boolean("free-left"),
            Variable::boolean("free-right"),
        ];
        for ball in 0..self.balls {
            variables.push(Variable::new(
                format!("ball{ball}"),
                &["rooma", "roomb", "left", "right"],
            ));
        }

        let mut operators = Vec::new();
        for (from, to) in [(0u32, 1u32), (1, 0)] {
            operators.push(
                Operator::new(format!("move {} {}", ROOMS[from as usize], ROOMS[to as usize]), 1)
                    .with_precondition(ROBOT, from)
                    .with_effect(ROBOT, to),
            );
        }
        for ball in 0..self.balls {
            let var = Self::ball_var(ball);
            for (room, room_name) in (0u32..).zip(ROOMS) {
                for (gripper, gripper_name) in GRIPPERS.iter().enumerate() {
                    operators.push(
                        Operator::new(format!("pick ball{ball} {room_name} {gripper_name}"), 1)
                            .with_precondition(ROBOT, room)
                            .with_precondition(var, room)
                            .with_precondition(free_var(gripper), 1)
                            .with_effect(var, held_value(gripper))
                            .with_effect(free_var(gripper), 0),
                    );
                    operators.push(
                        Operator::new(format!("drop ball{ball} {room_name} {gripper_name}"), 1)
                            .with_precondition(ROBOT, room)
                            .with_precondition(var, held_value(gripper))
                            .with_effect(var, room)
                            .with_effect(free_var(gripper), 1),
                    );
                }
            }
        }

        let mut initial = vec![0, 1, 1];
        initial.resize(FIRST_BALL + self.balls, 0);
        let goal = (0..self.balls)
            .map(|ball| Fact::new(Self::ball_var(ball), 1))
            .collect();
        Task::new(
            variables,
            vec![],
            operators,
            StateValues::discrete(initial),
            goal,
        )
    }

    fn symmetry_generators(&self, task: &Task) -> Vec<Permutation> {
        let domain_sizes: Vec<usize> = task.variables().iter().map(|v| v.domain_size()).collect();
        let mut generators: Vec<Permutation> = (1..self.balls)
            .filter_map(|ball| {
                Permutation::swap_variables(
                    &domain_sizes,
                    Self::ball_var(ball - 1),
                    Self::ball_var(ball),
                )
                .ok()
            })
            .collect();

        let mut var_map: Vec<usize> = (0..domain_sizes.len()).collect();
        var_map.swap(free_var(0), free_var(1));
        let value_map: Vec<Vec<u32>> = (0..domain_sizes.len())
            .map(|var| {
                if var >= FIRST_BALL {
                    vec![0, 1, 3, 2]
                } else {
                    vec![0, 1]
                }
            })
            .collect();
        if let Ok(gripper_swap) = Permutation::new(var_map, value_map, Vec::new()) {
            generators.push(gripper_swap);
        }
        generators
    }
}
