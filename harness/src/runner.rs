//! Harness runner: builds a search engine for a world, runs it, and checks
//! the result.
//!
//! # Pipeline
//!
//! ```text
//! world.task() → [GeneratorGroup::new()] → SuccessorGenerator::new()
//!   → build_components() → EagerSearch::run()
//!   → validate plan from the literal initial state → RunReport
//! ```
//!
//! The runner never trusts the engine's plan: every plan is re-executed
//! against the task before it is reported.

use std::rc::Rc;

use log::{error, info};
use serde_json::{json, Value};

use orbit_kernel::digest::{json_digest, ContentHash, DOMAIN_RUN_REPORT};
use orbit_kernel::symmetry::group::{GeneratorGroup, SymmetryError};
use orbit_kernel::task::model::{Task, TaskError};
use orbit_kernel::task::successor::SuccessorGenerator;
use orbit_search::evaluator::{BlindHeuristic, GEvaluator, GoalCountHeuristic, SumEvaluator};
use orbit_search::{
    AlternationOpenList, EagerSearch, EvaluatorRef, OpenList, Plan, PlanningContext,
    SearchComponents, SearchError, SearchPolicy, SearchStatus, TieBreakingOpenList,
};

use crate::contract::PlanningWorld;

/// Priority boost given to the preferred-only list after progress.
pub const PREFERRED_BOOST: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeuristicKind {
    #[default]
    Blind,
    GoalCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Open list `[g + h, h]`, with `g + h` driving f-bound statistics.
    #[default]
    Astar,
    /// Open list `[h]`.
    Greedy,
    /// Alternation between `[h]` and a preferred-only `[h]`.
    GreedyPreferred,
}

/// How to run a world.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunConfig {
    pub heuristic: HeuristicKind,
    pub strategy: Strategy,
    /// Search over canonical states under the world's symmetry generators.
    pub use_symmetry: bool,
    pub policy: SearchPolicy,
}

impl RunConfig {
    #[must_use]
    pub fn astar(heuristic: HeuristicKind) -> Self {
        Self {
            heuristic,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_symmetry(mut self) -> Self {
        self.use_symmetry = true;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The world described an invalid task.
    Task(TaskError),
    /// The world's symmetry generators are not automorphisms of its task.
    Symmetry(SymmetryError),
    /// Search configuration or plan extraction failed.
    Search(SearchError),
    /// The engine returned a plan that does not solve the task.
    InvalidPlan { detail: String },
    /// Report hashing failed.
    Digest { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task(e) => write!(f, "invalid task: {e}"),
            Self::Symmetry(e) => write!(f, "invalid symmetry: {e}"),
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::InvalidPlan { detail } => write!(f, "invalid plan: {detail}"),
            Self::Digest { detail } => write!(f, "digest error: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

impl From<TaskError> for RunError {
    fn from(e: TaskError) -> Self {
        Self::Task(e)
    }
}

impl From<SymmetryError> for RunError {
    fn from(e: SymmetryError) -> Self {
        Self::Symmetry(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

/// Outcome of one world run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub world_id: String,
    /// `"solved"` or `"failed"`.
    pub status: String,
    /// Operator names in plan order; empty when the run failed.
    pub plan: Vec<String>,
    /// True cost of the plan; `None` when the run failed.
    pub plan_cost: Option<i64>,
    /// [`EagerSearch::searched_states`]: excludes states interned only by
    /// symmetry path reconstruction.
    pub registered_states: usize,
    /// [`orbit_search::statistics::SearchStatistics::to_json_value`].
    pub statistics: Value,
}

impl RunReport {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.status == SearchStatus::Solved.as_str()
    }

    #[must_use]
    pub fn to_json_value(&self) -> Value {
        json!({
            "world_id": self.world_id,
            "status": self.status,
            "plan": self.plan,
            "plan_cost": self.plan_cost,
            "registered_states": self.registered_states,
            "statistics": self.statistics,
        })
    }

    /// Inverse of [`Self::to_json_value`]; `None` if a field is missing or
    /// has the wrong type.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Option<Self> {
        let plan = value
            .get("plan")?
            .as_array()?
            .iter()
            .map(|name| name.as_str().map(str::to_string))
            .collect::<Option<Vec<String>>>()?;
        let plan_cost = match value.get("plan_cost")? {
            Value::Null => None,
            cost => Some(cost.as_i64()?),
        };
        Some(Self {
            world_id: value.get("world_id")?.as_str()?.to_string(),
            status: value.get("status")?.as_str()?.to_string(),
            plan,
            plan_cost,
            registered_states: usize::try_from(value.get("registered_states")?.as_u64()?).ok()?,
            statistics: value.get("statistics")?.clone(),
        })
    }

    /// Content hash of the report's JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Digest`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, RunError> {
        json_digest(DOMAIN_RUN_REPORT, &self.to_json_value()).map_err(|e| RunError::Digest {
            detail: e.to_string(),
        })
    }
}

fn heuristic(task: &Task, config: &RunConfig) -> EvaluatorRef {
    match config.heuristic {
        HeuristicKind::Blind => Rc::new(BlindHeuristic::new(task, config.policy.cost_type)),
        HeuristicKind::GoalCount if config.strategy == Strategy::GreedyPreferred => {
            Rc::new(GoalCountHeuristic::new().with_preferred_operators())
        }
        HeuristicKind::GoalCount => Rc::new(GoalCountHeuristic::new()),
    }
}

/// Open list and evaluators for `config`.
#[must_use]
pub fn build_components(task: &Task, config: &RunConfig) -> SearchComponents {
    let h = heuristic(task, config);
    match config.strategy {
        Strategy::Astar => {
            let g: EvaluatorRef = Rc::new(GEvaluator::new());
            let f: EvaluatorRef = Rc::new(SumEvaluator::new(vec![g, h.clone()]));
            let open_list = TieBreakingOpenList::new(vec![f.clone(), h.clone()]);
            SearchComponents::new(Box::new(open_list))
                .with_f_evaluator(f)
                .with_heuristic(h)
        }
        Strategy::Greedy => {
            let open_list = TieBreakingOpenList::new(vec![h.clone()]);
            SearchComponents::new(Box::new(open_list)).with_heuristic(h)
        }
        Strategy::GreedyPreferred => {
            let sublists: Vec<Box<dyn OpenList>> = vec![
                Box::new(TieBreakingOpenList::new(vec![h.clone()])),
                Box::new(TieBreakingOpenList::new(vec![h.clone()]).preferred_only()),
            ];
            SearchComponents::new(Box::new(AlternationOpenList::new(sublists, PREFERRED_BOOST)))
                .with_heuristic(h.clone())
                .with_preferred_operator_heuristic(h)
        }
    }
}

/// Execute `plan` from the task's literal initial state and require a goal
/// state at the end.
fn validate_plan(task: &Task, plan: &Plan) -> Result<(), RunError> {
    let end = plan
        .execute(task, task.initial_state())
        .map_err(|e| RunError::InvalidPlan {
            detail: e.to_string(),
        })?;
    if !task.is_goal(&end) {
        return Err(RunError::InvalidPlan {
            detail: format!("plan ends in non-goal state {end}"),
        });
    }
    Ok(())
}

/// Run `world` under `config`.
///
/// A run that exhausts the frontier is a successful call with a `"failed"`
/// report, not an error.
///
/// # Errors
///
/// Returns [`RunError`] if the world is malformed, the search is
/// misconfigured or aborts, or the returned plan does not solve the task.
pub fn run_world(world: &dyn PlanningWorld, config: &RunConfig) -> Result<RunReport, RunError> {
    let world_id = world.world_id();
    let task = world.task()?;
    let group = if config.use_symmetry {
        Some(GeneratorGroup::new(&task, world.symmetry_generators(&task))?)
    } else {
        None
    };
    let successors = SuccessorGenerator::new(&task);
    let mut context = PlanningContext::new(&task, &successors);
    if let Some(group) = &group {
        info!(
            "{world_id}: searching with {} symmetry generator(s)",
            group.generators().len()
        );
        context = context.with_symmetry(group);
    }

    let mut search = EagerSearch::new(context, config.policy, build_components(&task, config))?;
    let status = search.run()?;
    search.print_statistics();

    let (plan, plan_cost) = match search.plan() {
        Some(plan) => {
            if let Err(e) = validate_plan(&task, plan) {
                error!("{world_id}: {e}");
                return Err(e);
            }
            let cost = plan.cost(&task);
            info!("{world_id}: plan length {}, plan cost {cost}", plan.len());
            (plan.operator_names(&task), Some(cost))
        }
        None => (Vec::new(), None),
    };

    Ok(RunReport {
        world_id,
        status: status.as_str().to_string(),
        plan,
        plan_cost,
        registered_states: search.searched_states(),
        statistics: search.statistics().to_json_value(),
    })
}
