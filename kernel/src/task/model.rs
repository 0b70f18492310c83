//! The planning-task model: variables, operators, initial state, goal.
//!
//! A [`Task`] is immutable after construction and validated once by
//! [`Task::new`]; everything downstream (registry, successor generator,
//! symmetry group, search) may index into it without re-checking ranges.

use std::collections::BTreeSet;

use crate::values::StateValues;

/// A finite-domain state variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    /// Value names; the domain is `0..values.len()`.
    pub values: Vec<String>,
}

impl Variable {
    #[must_use]
    pub fn new(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            name: name.into(),
            values: values.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    /// A two-valued variable with values `"false"`/`"true"`.
    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, &["false", "true"])
    }

    #[must_use]
    pub fn domain_size(&self) -> usize {
        self.values.len()
    }
}

/// A numeric state variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericVariable {
    pub name: String,
}

/// A `(variable, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fact {
    pub var: usize,
    pub value: u32,
}

impl Fact {
    #[must_use]
    pub const fn new(var: usize, value: u32) -> Self {
        Self { var, value }
    }

    #[must_use]
    pub fn holds_in(&self, state: &StateValues) -> bool {
        state.value(self.var) == self.value
    }
}

/// How a numeric effect combines with the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericEffectKind {
    Assign,
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericEffect {
    pub var: usize,
    pub kind: NumericEffectKind,
    pub amount: f64,
}

/// Dense operator identifier: index into [`Task::operators`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperatorId(pub usize);

impl OperatorId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for OperatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "op{}", self.0)
    }
}

/// A ground operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    pub name: String,
    pub cost: i64,
    pub preconditions: Vec<Fact>,
    pub effects: Vec<Fact>,
    pub numeric_effects: Vec<NumericEffect>,
}

impl Operator {
    #[must_use]
    pub fn new(name: impl Into<String>, cost: i64) -> Self {
        Self {
            name: name.into(),
            cost,
            preconditions: Vec::new(),
            effects: Vec::new(),
            numeric_effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_precondition(mut self, var: usize, value: u32) -> Self {
        self.preconditions.push(Fact::new(var, value));
        self
    }

    #[must_use]
    pub fn with_effect(mut self, var: usize, value: u32) -> Self {
        self.effects.push(Fact::new(var, value));
        self
    }

    #[must_use]
    pub fn with_numeric_effect(mut self, var: usize, kind: NumericEffectKind, amount: f64) -> Self {
        self.numeric_effects.push(NumericEffect { var, kind, amount });
        self
    }
}

/// Rejected task model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The initial state does not have one value per variable.
    InitialArity {
        expected: usize,
        expected_numeric: usize,
        actual: usize,
        actual_numeric: usize,
    },
    /// A fact references a variable or value outside the declared domains.
    FactOutOfRange { context: String, var: usize, value: u32 },
    /// A numeric effect references an undeclared numeric variable.
    NumericVariableOutOfRange { operator: String, var: usize },
    /// Operator costs must be non-negative.
    NegativeCost { operator: String, cost: i64 },
    /// Two effects of one operator write the same variable.
    ConflictingEffects { operator: String, var: usize },
    /// A variable with an empty domain.
    EmptyDomain { var: usize },
}

impl std::fmt::Display for TaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InitialArity {
                expected,
                expected_numeric,
                actual,
                actual_numeric,
            } => write!(
                f,
                "initial state has {actual}+{actual_numeric} values, expected {expected}+{expected_numeric}"
            ),
            Self::FactOutOfRange {
                context,
                var,
                value,
            } => write!(f, "{context}: fact var{var}={value} is out of range"),
            Self::NumericVariableOutOfRange { operator, var } => {
                write!(f, "{operator}: numeric variable {var} is undeclared")
            }
            Self::NegativeCost { operator, cost } => {
                write!(f, "{operator}: negative cost {cost}")
            }
            Self::ConflictingEffects { operator, var } => {
                write!(f, "{operator}: conflicting effects on var{var}")
            }
            Self::EmptyDomain { var } => write!(f, "var{var} has an empty domain"),
        }
    }
}

impl std::error::Error for TaskError {}

/// A validated planning task.
#[derive(Debug, Clone)]
pub struct Task {
    variables: Vec<Variable>,
    numeric_variables: Vec<NumericVariable>,
    operators: Vec<Operator>,
    initial: StateValues,
    goal: Vec<Fact>,
}

impl Task {
    /// Build and validate a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError`] if any fact is out of range, the initial state
    /// has the wrong arity, an operator has a negative cost, or an operator
    /// writes the same variable twice.
    pub fn new(
        variables: Vec<Variable>,
        numeric_variables: Vec<NumericVariable>,
        operators: Vec<Operator>,
        initial: StateValues,
        goal: Vec<Fact>,
    ) -> Result<Self, TaskError> {
        let task = Self {
            variables,
            numeric_variables,
            operators,
            initial,
            goal,
        };
        task.validate()?;
        Ok(task)
    }

    fn validate(&self) -> Result<(), TaskError> {
        if let Some(var) = self.variables.iter().position(|v| v.values.is_empty()) {
            return Err(TaskError::EmptyDomain { var });
        }
        if self.initial.len() != self.variables.len()
            || self.initial.numeric().len() != self.numeric_variables.len()
        {
            return Err(TaskError::InitialArity {
                expected: self.variables.len(),
                expected_numeric: self.numeric_variables.len(),
                actual: self.initial.len(),
                actual_numeric: self.initial.numeric().len(),
            });
        }
        for (var, &value) in self.initial.values().iter().enumerate() {
            self.check_fact("initial state", Fact::new(var, value))?;
        }
        for &fact in &self.goal {
            self.check_fact("goal", fact)?;
        }
        for op in &self.operators {
            if op.cost < 0 {
                return Err(TaskError::NegativeCost {
                    operator: op.name.clone(),
                    cost: op.cost,
                });
            }
            for &fact in op.preconditions.iter().chain(&op.effects) {
                self.check_fact(&op.name, fact)?;
            }
            let mut written = BTreeSet::new();
            for fact in &op.effects {
                if !written.insert(fact.var) {
                    return Err(TaskError::ConflictingEffects {
                        operator: op.name.clone(),
                        var: fact.var,
                    });
                }
            }
            if let Some(eff) = op
                .numeric_effects
                .iter()
                .find(|e| e.var >= self.numeric_variables.len())
            {
                return Err(TaskError::NumericVariableOutOfRange {
                    operator: op.name.clone(),
                    var: eff.var,
                });
            }
        }
        Ok(())
    }

    fn check_fact(&self, context: &str, fact: Fact) -> Result<(), TaskError> {
        let in_range = self
            .variables
            .get(fact.var)
            .is_some_and(|v| (fact.value as usize) < v.domain_size());
        if in_range {
            Ok(())
        } else {
            Err(TaskError::FactOutOfRange {
                context: context.to_string(),
                var: fact.var,
                value: fact.value,
            })
        }
    }

    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    #[must_use]
    pub fn numeric_variables(&self) -> &[NumericVariable] {
        &self.numeric_variables
    }

    #[must_use]
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Look up an operator. Panics if `id` did not come from this task.
    #[must_use]
    pub fn operator(&self, id: OperatorId) -> &Operator {
        &self.operators[id.0]
    }

    /// All operator identifiers in ascending order.
    pub fn operator_ids(&self) -> impl Iterator<Item = OperatorId> {
        (0..self.operators.len()).map(OperatorId)
    }

    #[must_use]
    pub fn initial_state(&self) -> &StateValues {
        &self.initial
    }

    #[must_use]
    pub fn goal(&self) -> &[Fact] {
        &self.goal
    }

    #[must_use]
    pub fn is_goal(&self, state: &StateValues) -> bool {
        self.goal.iter().all(|f| f.holds_in(state))
    }

    #[must_use]
    pub fn is_applicable(&self, id: OperatorId, state: &StateValues) -> bool {
        self.operator(id).preconditions.iter().all(|f| f.holds_in(state))
    }

    /// Apply operator `id` to `state`: discrete effects, then numeric
    /// effects. Applicability is the caller's responsibility.
    #[must_use]
    pub fn apply(&self, id: OperatorId, state: &StateValues) -> StateValues {
        let op = self.operator(id);
        let mut next = state.clone();
        for eff in &op.effects {
            next.values_mut()[eff.var] = eff.value;
        }
        for eff in &op.numeric_effects {
            let slot = &mut next.numeric_mut()[eff.var];
            *slot = match eff.kind {
                NumericEffectKind::Assign => eff.amount,
                NumericEffectKind::Increase => *slot + eff.amount,
                NumericEffectKind::Decrease => *slot - eff.amount,
            };
        }
        next
    }

    /// Smallest operator cost, or `None` for a task without operators.
    #[must_use]
    pub fn min_operator_cost(&self) -> Option<i64> {
        self.operators.iter().map(|op| op.cost).min()
    }
}
