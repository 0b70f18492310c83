//! Plan extraction for search over canonical representatives.
//!
//! When states are canonicalized, a recorded `(parent, operator)` link only
//! says that the operator applied to the canonical parent reaches *some*
//! state symmetric to the canonical child. Reconstruction therefore:
//!
//! 1. walks the canonical parent chain, collecting for every step the
//!    permutation from the canonical child to the state the recorded
//!    operator actually produces (and, at the root, from the canonical
//!    initial state to the literal one);
//! 2. accumulates those permutations from the root downwards, turning every
//!    canonical state into the true state reachable from the literal
//!    initial state;
//! 3. re-derives the concrete operator for each consecutive pair of true
//!    states: the cheapest applicable operator reproducing the target,
//!    lowest [`OperatorId`] on equal cost.

use log::{debug, error};
use orbit_kernel::registry::{StateId, StateRegistry};
use orbit_kernel::symmetry::group::SymmetryGraph;
use orbit_kernel::symmetry::permutation::Permutation;
use orbit_kernel::task::model::OperatorId;

use crate::context::PlanningContext;
use crate::error::SearchError;
use crate::plan::Plan;
use crate::space::SearchSpace;

pub(crate) fn reconstruct(
    space: &SearchSpace,
    goal: StateId,
    registry: &mut StateRegistry,
    context: &PlanningContext<'_>,
    symmetry: &dyn SymmetryGraph,
) -> Result<Plan, SearchError> {
    let task = context.task;

    let mut canonical = Vec::new();
    let mut permutations = Vec::new();
    let mut current = goal;
    loop {
        let record = space.info(current);
        let produced = match (record.parent_state_id, record.creating_operator) {
            (Some(parent), Some(op)) => registry.successor_state(task, parent, op),
            _ => registry.initial_state(),
        };
        let permutation = if registry.same_values(current, produced) {
            Permutation::identity()
        } else {
            let from = registry.lookup_state(current);
            let to = registry.lookup_state(produced);
            symmetry
                .permutation_from_state_to_state(from, to)
                .ok_or_else(|| SearchError::MissingPermutation {
                    from: from.to_string(),
                    to: to.to_string(),
                })?
        };
        canonical.push(current);
        permutations.push(permutation);
        match record.parent_state_id {
            Some(parent) => current = parent,
            None => break,
        }
    }
    canonical.reverse();
    permutations.reverse();

    let mut accumulated = Permutation::identity();
    let mut trace = Vec::with_capacity(canonical.len());
    for (&state, step) in canonical.iter().zip(&permutations) {
        accumulated = Permutation::compose(step, &accumulated);
        let values = accumulated.apply(registry.lookup_state(state));
        trace.push(registry.register_state(values));
    }
    debug!("symmetry trace: {} true states", trace.len());

    let mut steps = Vec::with_capacity(trace.len().saturating_sub(1));
    for pair in trace.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let from_values = registry.lookup_state(from);
        let to_values = registry.lookup_state(to);
        let mut best: Option<(i64, OperatorId)> = None;
        for op in context
            .successor_generator
            .generate_applicable_ops(task, from_values)
        {
            if !task.apply(op, from_values).same_values(to_values) {
                continue;
            }
            let cost = task.operator(op).cost;
            if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                best = Some((cost, op));
            }
        }
        let Some((_, op)) = best else {
            error!("no operator reaches {to_values} from {from_values}");
            return Err(SearchError::PathReconstruction {
                from: from_values.to_string(),
                to: to_values.to_string(),
            });
        };
        steps.push(op);
    }
    Ok(Plan::new(steps))
}
