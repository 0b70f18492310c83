//! Evaluator contract, per-state evaluation context, and reference
//! evaluators.
//!
//! An [`EvaluationContext`] is created once per state evaluation and caches
//! every evaluator result it computes, keyed by evaluator identity. Composite
//! evaluators (sum, weighted) query their components through the same
//! context, so a heuristic shared by the ranking evaluator and the open list
//! is still computed only once.

use std::collections::HashMap;
use std::rc::Rc;

use orbit_kernel::registry::StateId;
use orbit_kernel::task::cost::{adjusted_cost, CostType};
use orbit_kernel::task::model::{OperatorId, Task};
use orbit_kernel::values::StateValues;

/// Value reported for proven dead ends.
pub const INFTY: i64 = i64::MAX;

/// Result of one evaluator on one state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationResult {
    pub value: i64,
    /// Operators this evaluator recommends in the state (heuristics only).
    pub preferred_operators: Vec<OperatorId>,
}

impl EvaluationResult {
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self {
            value,
            preferred_operators: Vec::new(),
        }
    }

    #[must_use]
    pub fn infinite() -> Self {
        Self::new(INFTY)
    }

    #[must_use]
    pub fn is_infinite(&self) -> bool {
        self.value == INFTY
    }
}

/// Scalar state evaluator. A heuristic is an evaluator that may also fill
/// [`EvaluationResult::preferred_operators`].
pub trait ScalarEvaluator {
    fn name(&self) -> &str;

    /// Compute the value for `ctx`'s state. Components must be queried
    /// through `ctx` so their results are cached.
    fn compute(&self, ctx: &mut EvaluationContext<'_>) -> EvaluationResult;

    /// Whether an infinite value from this evaluator proves the state
    /// unsolvable.
    fn dead_ends_are_reliable(&self) -> bool {
        true
    }
}

/// Shared handle to an evaluator, as stored by open lists and the engine.
pub type EvaluatorRef = Rc<dyn ScalarEvaluator>;

fn evaluator_key(evaluator: &dyn ScalarEvaluator) -> usize {
    std::ptr::from_ref(evaluator).cast::<()>() as usize
}

/// One state's evaluation: the state, its g, and the result cache.
#[derive(Debug)]
pub struct EvaluationContext<'a> {
    state_id: StateId,
    state: &'a StateValues,
    task: &'a Task,
    g: i64,
    preferred: bool,
    cache: HashMap<usize, EvaluationResult>,
    computations: u64,
}

impl<'a> EvaluationContext<'a> {
    #[must_use]
    pub fn new(
        state_id: StateId,
        state: &'a StateValues,
        task: &'a Task,
        g: i64,
        preferred: bool,
    ) -> Self {
        Self {
            state_id,
            state,
            task,
            g,
            preferred,
            cache: HashMap::new(),
            computations: 0,
        }
    }

    #[must_use]
    pub fn state_id(&self) -> StateId {
        self.state_id
    }

    #[must_use]
    pub fn state(&self) -> &'a StateValues {
        self.state
    }

    #[must_use]
    pub fn task(&self) -> &'a Task {
        self.task
    }

    #[must_use]
    pub fn g(&self) -> i64 {
        self.g
    }

    /// Whether the state was reached by a preferred operator.
    #[must_use]
    pub fn is_preferred(&self) -> bool {
        self.preferred
    }

    /// Number of evaluator computations performed in this context.
    #[must_use]
    pub fn computations(&self) -> u64 {
        self.computations
    }

    /// Result of `evaluator`, computing it on first request.
    pub fn get_result(&mut self, evaluator: &dyn ScalarEvaluator) -> EvaluationResult {
        let key = evaluator_key(evaluator);
        if let Some(result) = self.cache.get(&key) {
            return result.clone();
        }
        let result = evaluator.compute(self);
        self.computations += 1;
        self.cache.insert(key, result.clone());
        result
    }

    pub fn get_value(&mut self, evaluator: &dyn ScalarEvaluator) -> i64 {
        self.get_result(evaluator).value
    }

    pub fn is_infinite(&mut self, evaluator: &dyn ScalarEvaluator) -> bool {
        self.get_result(evaluator).is_infinite()
    }

    pub fn preferred_operators(&mut self, evaluator: &dyn ScalarEvaluator) -> Vec<OperatorId> {
        self.get_result(evaluator).preferred_operators
    }
}

/// The state's g value.
#[derive(Debug, Clone)]
pub struct GEvaluator {
    name: String,
}

impl GEvaluator {
    #[must_use]
    pub fn new() -> Self {
        Self { name: "g".into() }
    }
}

impl Default for GEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarEvaluator for GEvaluator {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, ctx: &mut EvaluationContext<'_>) -> EvaluationResult {
        EvaluationResult::new(ctx.g())
    }
}

/// Sum of component values; infinite if any component is.
pub struct SumEvaluator {
    name: String,
    components: Vec<EvaluatorRef>,
}

impl SumEvaluator {
    #[must_use]
    pub fn new(components: Vec<EvaluatorRef>) -> Self {
        let name = components
            .iter()
            .map(|c| c.name().to_string())
            .collect::<Vec<_>>()
            .join("+");
        Self { name, components }
    }
}

impl ScalarEvaluator for SumEvaluator {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, ctx: &mut EvaluationContext<'_>) -> EvaluationResult {
        let mut total: i64 = 0;
        for component in &self.components {
            let value = ctx.get_value(component.as_ref());
            if value == INFTY {
                return EvaluationResult::infinite();
            }
            total = total.saturating_add(value);
        }
        EvaluationResult::new(total.min(INFTY - 1))
    }

    fn dead_ends_are_reliable(&self) -> bool {
        self.components.iter().all(|c| c.dead_ends_are_reliable())
    }
}

/// `weight * inner`; infinity is preserved.
pub struct WeightedEvaluator {
    name: String,
    inner: EvaluatorRef,
    weight: i64,
}

impl WeightedEvaluator {
    #[must_use]
    pub fn new(inner: EvaluatorRef, weight: i64) -> Self {
        Self {
            name: format!("{weight}*{}", inner.name()),
            inner,
            weight,
        }
    }
}

impl ScalarEvaluator for WeightedEvaluator {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, ctx: &mut EvaluationContext<'_>) -> EvaluationResult {
        let value = ctx.get_value(self.inner.as_ref());
        if value == INFTY {
            return EvaluationResult::infinite();
        }
        EvaluationResult::new(value.saturating_mul(self.weight).min(INFTY - 1))
    }

    fn dead_ends_are_reliable(&self) -> bool {
        self.inner.dead_ends_are_reliable()
    }
}

#[derive(Debug, Clone)]
pub struct ConstEvaluator {
    name: String,
    value: i64,
}

impl ConstEvaluator {
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self {
            name: format!("const({value})"),
            value,
        }
    }
}

impl ScalarEvaluator for ConstEvaluator {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, _ctx: &mut EvaluationContext<'_>) -> EvaluationResult {
        EvaluationResult::new(self.value)
    }
}

/// 0 at goal states, the cheapest adjusted operator cost elsewhere.
#[derive(Debug, Clone)]
pub struct BlindHeuristic {
    name: String,
    min_cost: i64,
}

impl BlindHeuristic {
    #[must_use]
    pub fn new(task: &Task, cost_type: CostType) -> Self {
        let min_cost = task
            .operators()
            .iter()
            .map(|op| adjusted_cost(op, cost_type))
            .min()
            .unwrap_or(0);
        Self {
            name: "blind".into(),
            min_cost,
        }
    }
}

impl ScalarEvaluator for BlindHeuristic {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, ctx: &mut EvaluationContext<'_>) -> EvaluationResult {
        if ctx.task().is_goal(ctx.state()) {
            EvaluationResult::new(0)
        } else {
            EvaluationResult::new(self.min_cost)
        }
    }
}

/// Number of unsatisfied goal facts.
///
/// With preferred operators enabled, every applicable operator that
/// achieves an unsatisfied goal fact is preferred.
#[derive(Debug, Clone)]
pub struct GoalCountHeuristic {
    name: String,
    preferred_operators: bool,
}

impl GoalCountHeuristic {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "goalcount".into(),
            preferred_operators: false,
        }
    }

    #[must_use]
    pub fn with_preferred_operators(mut self) -> Self {
        self.preferred_operators = true;
        self
    }
}

impl Default for GoalCountHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl ScalarEvaluator for GoalCountHeuristic {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, ctx: &mut EvaluationContext<'_>) -> EvaluationResult {
        let task = ctx.task();
        let state = ctx.state();
        let unsatisfied: Vec<_> = task
            .goal()
            .iter()
            .filter(|fact| !fact.holds_in(state))
            .copied()
            .collect();
        let mut result = EvaluationResult::new(i64::try_from(unsatisfied.len()).unwrap_or(INFTY - 1));
        if self.preferred_operators {
            result.preferred_operators = task
                .operator_ids()
                .filter(|&id| {
                    task.is_applicable(id, state)
                        && task
                            .operator(id)
                            .effects
                            .iter()
                            .any(|effect| unsatisfied.contains(effect))
                })
                .collect();
        }
        result
    }
}
