//! Plans: ordered operator sequences.

use orbit_kernel::task::model::{OperatorId, Task};
use orbit_kernel::values::StateValues;

/// An operator sequence executable from the task's initial state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<OperatorId>,
}

/// A plan step whose operator is not applicable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanExecutionError {
    pub step: usize,
    pub operator: String,
    pub state: String,
}

impl std::fmt::Display for PlanExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "step {}: {} is not applicable in {}",
            self.step, self.operator, self.state
        )
    }
}

impl std::error::Error for PlanExecutionError {}

impl Plan {
    #[must_use]
    pub fn new(steps: Vec<OperatorId>) -> Self {
        Self { steps }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of true operator costs.
    #[must_use]
    pub fn cost(&self, task: &Task) -> i64 {
        self.steps.iter().map(|&id| task.operator(id).cost).sum()
    }

    /// Operator names in plan order.
    #[must_use]
    pub fn operator_names(&self, task: &Task) -> Vec<String> {
        self.steps
            .iter()
            .map(|&id| task.operator(id).name.clone())
            .collect()
    }

    /// Execute the plan from `start`, checking applicability at every step.
    ///
    /// # Errors
    ///
    /// Returns [`PlanExecutionError`] at the first inapplicable step.
    pub fn execute(&self, task: &Task, start: &StateValues) -> Result<StateValues, PlanExecutionError> {
        let mut state = start.clone();
        for (step, &id) in self.steps.iter().enumerate() {
            if !task.is_applicable(id, &state) {
                return Err(PlanExecutionError {
                    step,
                    operator: task.operator(id).name.clone(),
                    state: state.to_string(),
                });
            }
            state = task.apply(id, &state);
        }
        Ok(state)
    }
}
