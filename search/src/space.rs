//! Search space: the arena of per-state search records.
//!
//! Records live in a dense `Vec<SearchNodeInfo>` indexed by
//! [`StateId::index`]. The arena grows on demand; a state that was never
//! touched reads as NEW. Records are never removed.

use log::info;
use orbit_kernel::registry::{StateId, StateRegistry};
use orbit_kernel::task::cost::CostType;
use orbit_kernel::task::model::Task;

use crate::context::PlanningContext;
use crate::error::SearchError;
use crate::node::{NodeStatus, SearchNode, SearchNodeInfo};
use crate::plan::Plan;
use crate::symmetry_path;

#[derive(Debug, Clone)]
pub struct SearchSpace {
    infos: Vec<SearchNodeInfo>,
    cost_type: CostType,
}

impl SearchSpace {
    #[must_use]
    pub fn new(cost_type: CostType) -> Self {
        Self {
            infos: Vec::new(),
            cost_type,
        }
    }

    #[must_use]
    pub fn cost_type(&self) -> CostType {
        self.cost_type
    }

    /// View of `state`'s record, creating a NEW record if absent.
    pub fn get_node(&mut self, state: StateId) -> SearchNode<'_> {
        let index = state.index();
        if index >= self.infos.len() {
            self.infos.resize(index + 1, SearchNodeInfo::default());
        }
        SearchNode::new(state, &mut self.infos[index], self.cost_type)
    }

    /// Read-only copy of `state`'s record (NEW if absent).
    #[must_use]
    pub fn info(&self, state: StateId) -> SearchNodeInfo {
        self.infos.get(state.index()).copied().unwrap_or_default()
    }

    /// Number of records allocated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Number of records currently in `status`.
    #[must_use]
    pub fn count_status(&self, status: NodeStatus) -> usize {
        self.infos.iter().filter(|i| i.status == status).count()
    }

    /// Operator sequence from the initial state to `goal`.
    ///
    /// Without a symmetry graph this follows parent links. With one, the
    /// recorded chain is only valid up to permutation and the plan is
    /// re-derived by [`symmetry_path::reconstruct`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingPermutation`] or
    /// [`SearchError::PathReconstruction`] if symmetry reconstruction cannot
    /// find a concrete operator for some step.
    pub fn trace_path(
        &self,
        goal: StateId,
        registry: &mut StateRegistry,
        context: &PlanningContext<'_>,
    ) -> Result<Plan, SearchError> {
        if let Some(symmetry) = context.symmetry {
            return symmetry_path::reconstruct(self, goal, registry, context, symmetry);
        }
        let mut steps = Vec::new();
        let mut current = goal;
        loop {
            let record = self.info(current);
            let (Some(op), Some(parent)) = (record.creating_operator, record.parent_state_id)
            else {
                debug_assert!(record.parent_state_id.is_none());
                break;
            };
            steps.push(op);
            current = parent;
        }
        steps.reverse();
        Ok(Plan::new(steps))
    }

    /// One line per record: `#id [STATUS] values created by <op> from #parent`.
    #[must_use]
    pub fn dump(&self, registry: &StateRegistry, task: &Task) -> String {
        let mut out = String::new();
        for id in registry.state_ids() {
            let record = self.info(id);
            if record.status == NodeStatus::New {
                continue;
            }
            out.push_str(&format!(
                "{id} [{}] {}",
                record.status.as_str(),
                registry.lookup_state(id)
            ));
            match (record.creating_operator, record.parent_state_id) {
                (Some(op), Some(parent)) => {
                    out.push_str(&format!(
                        " created by {} from {parent}\n",
                        task.operator(op).name
                    ));
                }
                _ => out.push_str(" has no parent\n"),
            }
        }
        out
    }

    pub fn print_statistics(&self, registry: &StateRegistry) {
        info!("Number of registered states: {}", registry.len());
    }
}
