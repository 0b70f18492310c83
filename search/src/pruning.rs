//! Operator pruning contract.

use orbit_kernel::task::model::OperatorId;
use orbit_kernel::values::StateValues;

/// Filters the applicable operators of a state before expansion.
///
/// Implementations must only remove entries; the remaining operators keep
/// their relative order.
pub trait PruningMethod {
    fn name(&self) -> &str;

    fn prune_operators(&mut self, state: &StateValues, operators: &mut Vec<OperatorId>);
}

/// Keeps every operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPruning;

impl PruningMethod for NullPruning {
    fn name(&self) -> &str {
        "null"
    }

    fn prune_operators(&mut self, _state: &StateValues, _operators: &mut Vec<OperatorId>) {}
}
