//! Eager best-first search.
//!
//! `EagerSearch` expands one state per [`EagerSearch::step`]. Every successor
//! is evaluated when it is generated (eagerly), inserted into the open list,
//! and recorded in the [`SearchSpace`] with its parent link. With a symmetry
//! graph in the planning context, all states are replaced by their canonical
//! representative before they reach the search space, and plan extraction
//! goes through symmetry path reconstruction.
//!
//! # Run state machine
//!
//! ```text
//! Uninitialized --initialize--> InProgress --step*--> Solved | Failed
//! ```
//!
//! Terminal states are sticky: further calls to `step` return them
//! unchanged.

use std::collections::HashSet;

use log::{debug, info, warn};
use orbit_kernel::registry::{StateId, StateRegistry};
use orbit_kernel::task::model::OperatorId;
use orbit_kernel::values::StateValues;

use crate::context::PlanningContext;
use crate::error::SearchError;
use crate::evaluator::{EvaluationContext, EvaluatorRef, INFTY};
use crate::node::NodeStatus;
use crate::open_list::OpenList;
use crate::plan::Plan;
use crate::policy::SearchPolicy;
use crate::progress::SearchProgress;
use crate::pruning::{NullPruning, PruningMethod};
use crate::space::SearchSpace;
use crate::statistics::SearchStatistics;

/// Status of a search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Uninitialized,
    InProgress,
    Solved,
    Failed,
}

impl SearchStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::InProgress => "in_progress",
            Self::Solved => "solved",
            Self::Failed => "failed",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Solved | Self::Failed)
    }
}

/// The pluggable parts of an eager search.
pub struct SearchComponents {
    pub open_list: Box<dyn OpenList>,
    /// Evaluator whose value drives f-bound statistics (usually `g + h`).
    pub f_evaluator: Option<EvaluatorRef>,
    /// Heuristics whose best values are tracked for progress.
    pub heuristics: Vec<EvaluatorRef>,
    /// Heuristics consulted for preferred operators at every expansion.
    pub preferred_operator_heuristics: Vec<EvaluatorRef>,
    pub pruning: Box<dyn PruningMethod>,
}

impl SearchComponents {
    /// Components with the given open list, no statistics evaluator, no
    /// progress or preferred-operator heuristics, and no pruning.
    #[must_use]
    pub fn new(open_list: Box<dyn OpenList>) -> Self {
        Self {
            open_list,
            f_evaluator: None,
            heuristics: Vec::new(),
            preferred_operator_heuristics: Vec::new(),
            pruning: Box::new(NullPruning),
        }
    }

    #[must_use]
    pub fn with_f_evaluator(mut self, f_evaluator: EvaluatorRef) -> Self {
        self.f_evaluator = Some(f_evaluator);
        self
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: EvaluatorRef) -> Self {
        self.heuristics.push(heuristic);
        self
    }

    #[must_use]
    pub fn with_preferred_operator_heuristic(mut self, heuristic: EvaluatorRef) -> Self {
        self.preferred_operator_heuristics.push(heuristic);
        self
    }

    #[must_use]
    pub fn with_pruning(mut self, pruning: Box<dyn PruningMethod>) -> Self {
        self.pruning = pruning;
        self
    }
}

/// Eager best-first search engine.
pub struct EagerSearch<'a> {
    context: PlanningContext<'a>,
    policy: SearchPolicy,
    components: SearchComponents,
    registry: StateRegistry,
    space: SearchSpace,
    progress: SearchProgress,
    statistics: SearchStatistics,
    status: SearchStatus,
    plan: Option<Plan>,
    /// Registry size when the search terminated, before plan extraction.
    searched_states: Option<usize>,
}

impl<'a> EagerSearch<'a> {
    /// Create an engine over `context`'s task.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPolicy`] if `policy` fails
    /// validation. No search state is created in that case.
    pub fn new(
        context: PlanningContext<'a>,
        policy: SearchPolicy,
        components: SearchComponents,
    ) -> Result<Self, SearchError> {
        policy.validate()?;
        let progress = SearchProgress::new(components.heuristics.len());
        Ok(Self {
            context,
            policy,
            registry: StateRegistry::new(context.task),
            space: SearchSpace::new(policy.cost_type),
            progress,
            statistics: SearchStatistics::new(),
            status: SearchStatus::Uninitialized,
            plan: None,
            searched_states: None,
            components,
        })
    }

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// The plan, once the search is solved.
    #[must_use]
    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    #[must_use]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    #[must_use]
    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    /// Number of states registered by the search itself.
    ///
    /// Symmetry path reconstruction interns the true states along the plan,
    /// which may grow the registry after the goal was found; those are not
    /// counted here. Equals `registry().len()` while the search runs.
    #[must_use]
    pub fn searched_states(&self) -> usize {
        self.searched_states.unwrap_or_else(|| self.registry.len())
    }

    #[must_use]
    pub fn search_space(&self) -> &SearchSpace {
        &self.space
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Open and evaluate the initial state.
    ///
    /// A dead initial state is marked DEAD_END and not inserted; the first
    /// `step` then reports failure.
    ///
    /// # Panics
    ///
    /// Panics if called more than once.
    pub fn initialize(&mut self) {
        assert_eq!(
            self.status,
            SearchStatus::Uninitialized,
            "initialize on a search in status {}",
            self.status.as_str()
        );
        info!(
            "Conducting best first search {} reopening closed nodes, (real) bound = {}",
            if self.policy.reopen_closed_nodes { "with" } else { "without" },
            self.policy.bound.map_or_else(|| "infinity".to_string(), |b| b.to_string())
        );
        let task = self.context.task;
        let literal = self.registry.initial_state();
        let initial = match self.context.symmetry {
            Some(symmetry) => {
                let canonical = symmetry.canonical_state(self.registry.lookup_state(literal));
                self.registry.register_state(canonical)
            }
            None => literal,
        };

        let state = self.registry.lookup_state(initial);
        let mut ctx = EvaluationContext::new(initial, state, task, 0, true);
        self.statistics.evaluated_states += 1;
        for evaluator in self
            .components
            .heuristics
            .iter()
            .chain(&self.components.preferred_operator_heuristics)
            .chain(&self.components.f_evaluator)
        {
            let value = ctx.get_value(evaluator.as_ref());
            debug!("Initial heuristic value for {}: {value}", evaluator.name());
        }

        let mut improved = false;
        if self.components.open_list.is_dead_end(&mut ctx) {
            warn!("Initial state is a dead end.");
            self.space.get_node(initial).mark_as_dead_end();
            self.statistics.dead_end_states += 1;
        } else {
            improved = self.progress.check_progress(&mut ctx, &self.components.heuristics);
            if let Some(f) = &self.components.f_evaluator {
                let value = ctx.get_value(f.as_ref());
                self.statistics.report_initial_f_value(value);
            }
            self.space.get_node(initial).open_initial();
            self.components.open_list.insert(&mut ctx, initial);
        }
        self.statistics.evaluations += ctx.computations();
        drop(ctx);
        self.status = SearchStatus::InProgress;
        if improved {
            self.reward_progress();
        }
    }

    /// Notify the open list of progress.
    pub fn reward_progress(&mut self) {
        self.components.open_list.boost_preferred();
    }

    /// Remove entries from the open list until one is neither CLOSED nor a
    /// dead end, close it and count it as expanded. `None` once the open
    /// list is exhausted.
    fn fetch_next_node(&mut self) -> Option<StateId> {
        loop {
            let Some(id) = self.components.open_list.remove_min() else {
                info!("Completely explored state space -- no solution!");
                return None;
            };
            let mut node = self.space.get_node(id);
            if node.is_closed() || node.is_dead_end() {
                continue;
            }
            node.close();
            self.statistics.expanded_states += 1;
            return Some(id);
        }
    }

    /// One expansion.
    ///
    /// Initializes the search first if needed.
    ///
    /// # Errors
    ///
    /// Returns the fatal [`SearchError`] of symmetry path reconstruction if
    /// the goal's plan cannot be extracted.
    pub fn step(&mut self) -> Result<SearchStatus, SearchError> {
        match self.status {
            SearchStatus::Uninitialized => self.initialize(),
            SearchStatus::Solved | SearchStatus::Failed => return Ok(self.status),
            SearchStatus::InProgress => {}
        }

        let Some(id) = self.fetch_next_node() else {
            self.searched_states = Some(self.registry.len());
            self.status = SearchStatus::Failed;
            return Ok(self.status);
        };
        let task = self.context.task;
        let parent = self.space.get_node(id).snapshot();
        let state: StateValues = self.registry.lookup_state(id).clone();

        let mut ctx = EvaluationContext::new(id, &state, task, parent.g, false);
        let mut improved = false;
        if let Some(f) = &self.components.f_evaluator {
            let value = ctx.get_value(f.as_ref());
            if value != INFTY {
                improved = self.statistics.report_f_value_progress(parent.g, value);
            }
        }
        if task.is_goal(&state) {
            self.statistics.evaluations += ctx.computations();
            info!("Solution found!");
            self.searched_states = Some(self.registry.len());
            let plan = self.space.trace_path(id, &mut self.registry, &self.context)?;
            info!("Plan length: {} step(s).", plan.len());
            info!("Plan cost: {}", plan.cost(task));
            self.plan = Some(plan);
            self.status = SearchStatus::Solved;
            return Ok(self.status);
        }

        let mut preferred: HashSet<OperatorId> = HashSet::new();
        for heuristic in &self.components.preferred_operator_heuristics {
            preferred.extend(ctx.preferred_operators(heuristic.as_ref()));
        }
        self.statistics.evaluations += ctx.computations();
        drop(ctx);

        let mut operators = self
            .context
            .successor_generator
            .generate_applicable_ops(task, &state);
        self.components
            .pruning
            .prune_operators(&state, &mut operators);
        self.statistics.generated_ops += operators.len() as u64;

        for op_id in operators {
            let op = task.operator(op_id);
            if !self.policy.within_bound(parent.real_g.saturating_add(op.cost)) {
                continue;
            }
            let successor = task.apply(op_id, &state);
            let successor = match self.context.symmetry {
                Some(symmetry) => symmetry.canonical_state(&successor),
                None => successor,
            };
            let succ_id = self.registry.register_state(successor);
            self.statistics.generated_states += 1;
            let is_preferred = preferred.contains(&op_id);

            let succ_node = self.space.get_node(succ_id);
            let status = succ_node.status();
            let candidate_g = succ_node.g_via(parent, op);
            let succ_g = succ_node.g();
            match status {
                NodeStatus::DeadEnd => {}
                NodeStatus::New => {
                    let values = self.registry.lookup_state(succ_id);
                    let mut ctx =
                        EvaluationContext::new(succ_id, values, task, candidate_g, is_preferred);
                    self.statistics.evaluated_states += 1;
                    if self.components.open_list.is_dead_end(&mut ctx) {
                        self.space.get_node(succ_id).mark_as_dead_end();
                        self.statistics.dead_end_states += 1;
                    } else {
                        self.space.get_node(succ_id).open(parent, op_id, op);
                        self.components.open_list.insert(&mut ctx, succ_id);
                        improved |= self
                            .progress
                            .check_progress(&mut ctx, &self.components.heuristics);
                    }
                    self.statistics.evaluations += ctx.computations();
                }
                NodeStatus::Open | NodeStatus::Closed if candidate_g < succ_g => {
                    if status == NodeStatus::Open || self.policy.reopen_closed_nodes {
                        if status == NodeStatus::Closed {
                            self.statistics.reopened_states += 1;
                        }
                        self.space.get_node(succ_id).reopen(parent, op_id, op);
                        let values = self.registry.lookup_state(succ_id);
                        let mut ctx =
                            EvaluationContext::new(succ_id, values, task, candidate_g, is_preferred);
                        self.components.open_list.insert(&mut ctx, succ_id);
                        self.statistics.evaluations += ctx.computations();
                    } else if self.policy.use_multi_path_dependence {
                        self.space.get_node(succ_id).update_parent(parent, op_id, op);
                    }
                }
                NodeStatus::Open | NodeStatus::Closed => {}
            }
        }

        if improved {
            self.reward_progress();
        }
        Ok(self.status)
    }

    /// Step until the search is solved or failed.
    ///
    /// # Errors
    ///
    /// Propagates the first [`SearchError`] returned by [`Self::step`].
    pub fn run(&mut self) -> Result<SearchStatus, SearchError> {
        while !self.step()?.is_terminal() {}
        Ok(self.status)
    }

    pub fn print_statistics(&self) {
        self.statistics.print_basic_statistics();
        self.space.print_statistics(&self.registry);
    }

    /// Render the search space and log it at debug level.
    #[must_use]
    pub fn dump_search_space(&self) -> String {
        let dump = self.space.dump(&self.registry, self.context.task);
        debug!("search space:\n{dump}");
        dump
    }
}

impl std::fmt::Debug for EagerSearch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EagerSearch")
            .field("status", &self.status)
            .field("policy", &self.policy)
            .field("registered_states", &self.registry.len())
            .field("open", &self.components.open_list.len())
            .finish_non_exhaustive()
    }
}
