//! Successor generator: enumerates the operators applicable in a state.
//!
//! Operators are bucketed by their first precondition fact so a state only
//! inspects operators whose first precondition it satisfies. Operators
//! without preconditions are always candidates.

use std::collections::HashMap;

use crate::task::model::{Fact, OperatorId, Task};
use crate::values::StateValues;

#[derive(Debug, Clone)]
pub struct SuccessorGenerator {
    unconditional: Vec<OperatorId>,
    by_first_fact: HashMap<Fact, Vec<OperatorId>>,
}

impl SuccessorGenerator {
    #[must_use]
    pub fn new(task: &Task) -> Self {
        let mut unconditional = Vec::new();
        let mut by_first_fact: HashMap<Fact, Vec<OperatorId>> = HashMap::new();
        for id in task.operator_ids() {
            match task.operator(id).preconditions.first() {
                None => unconditional.push(id),
                Some(&fact) => by_first_fact.entry(fact).or_default().push(id),
            }
        }
        Self {
            unconditional,
            by_first_fact,
        }
    }

    /// Applicable operators in ascending [`OperatorId`] order.
    #[must_use]
    pub fn generate_applicable_ops(&self, task: &Task, state: &StateValues) -> Vec<OperatorId> {
        let mut ops: Vec<OperatorId> = self.unconditional.clone();
        for (var, &value) in state.values().iter().enumerate() {
            if let Some(bucket) = self.by_first_fact.get(&Fact::new(var, value)) {
                ops.extend(
                    bucket
                        .iter()
                        .copied()
                        .filter(|&id| task.is_applicable(id, state)),
                );
            }
        }
        ops.sort_unstable();
        ops
    }
}
