//! Shared helpers for the acceptance tests.

use std::rc::Rc;

use orbit_harness::contract::PlanningWorld;
use orbit_kernel::symmetry::group::GeneratorGroup;
use orbit_kernel::task::model::Task;
use orbit_kernel::task::successor::SuccessorGenerator;
use orbit_kernel::values::StateValues;
use orbit_search::evaluator::{BlindHeuristic, GEvaluator, GoalCountHeuristic, SumEvaluator};
use orbit_search::{
    EagerSearch, EvaluatorRef, Plan, PlanningContext, SearchComponents, SearchPolicy, SearchStatus,
    TieBreakingOpenList,
};

/// Install `env_logger` in test mode. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Everything a search borrows, owned in one place so a test can build an
/// [`EagerSearch`] over it.
pub struct Fixture {
    pub task: Task,
    pub successors: SuccessorGenerator,
    pub group: Option<GeneratorGroup>,
}

impl Fixture {
    /// # Panics
    ///
    /// Panics if the world's task or symmetry generators are invalid.
    #[must_use]
    pub fn new(world: &dyn PlanningWorld, use_symmetry: bool) -> Self {
        let task = world.task().unwrap();
        let successors = SuccessorGenerator::new(&task);
        let group = use_symmetry
            .then(|| GeneratorGroup::new(&task, world.symmetry_generators(&task)).unwrap());
        Self {
            task,
            successors,
            group,
        }
    }

    #[must_use]
    pub fn context(&self) -> PlanningContext<'_> {
        let context = PlanningContext::new(&self.task, &self.successors);
        match &self.group {
            Some(group) => context.with_symmetry(group),
            None => context,
        }
    }

    /// A* over `h` with `policy`.
    ///
    /// # Panics
    ///
    /// Panics if `policy` is rejected.
    #[must_use]
    pub fn astar(&self, h: EvaluatorRef, policy: SearchPolicy) -> EagerSearch<'_> {
        let g: EvaluatorRef = Rc::new(GEvaluator::new());
        let f: EvaluatorRef = Rc::new(SumEvaluator::new(vec![g, h.clone()]));
        let components =
            SearchComponents::new(Box::new(TieBreakingOpenList::new(vec![f.clone(), h.clone()])))
                .with_f_evaluator(f)
                .with_heuristic(h);
        EagerSearch::new(self.context(), policy, components).unwrap()
    }

    #[must_use]
    pub fn blind(&self) -> EvaluatorRef {
        Rc::new(BlindHeuristic::new(&self.task, SearchPolicy::default().cost_type))
    }

    #[must_use]
    pub fn goal_count(&self) -> EvaluatorRef {
        Rc::new(GoalCountHeuristic::new())
    }

    /// Execute `plan` from the literal initial state.
    ///
    /// # Panics
    ///
    /// Panics if some step is not applicable.
    #[must_use]
    pub fn execute(&self, plan: &Plan) -> StateValues {
        plan.execute(&self.task, self.task.initial_state()).unwrap()
    }
}

/// Run `search` to completion and return its status.
///
/// # Panics
///
/// Panics on a fatal search error.
pub fn run(search: &mut EagerSearch<'_>) -> SearchStatus {
    search.run().unwrap()
}
