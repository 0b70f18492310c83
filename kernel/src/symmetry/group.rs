//! Symmetry graph contract and a generator-based reference implementation.
//!
//! Search over a symmetry-reduced state space replaces every state by a
//! canonical representative of its orbit. Path reconstruction later needs
//! the permutation relating two symmetric states; both services are
//! provided through [`SymmetryGraph`].

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::symmetry::permutation::Permutation;
use crate::task::model::{Fact, Operator, Task};
use crate::values::StateValues;

/// Symmetry services consumed by search and path reconstruction.
pub trait SymmetryGraph {
    /// The canonical representative of `state`'s orbit.
    fn canonical_state(&self, state: &StateValues) -> StateValues;

    /// A permutation `p` with `p.apply(from) == to`, or `None` if the states
    /// are not known to be symmetric.
    fn permutation_from_state_to_state(
        &self,
        from: &StateValues,
        to: &StateValues,
    ) -> Option<Permutation>;
}

/// A generator permutation rejected by [`GeneratorGroup::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymmetryError {
    /// Generator is shaped for a different variable layout.
    ShapeMismatch { generator: usize },
    /// Generator does not map the goal onto itself.
    GoalNotPreserved { generator: usize },
    /// Generator maps an operator onto something that is not an operator of
    /// the same cost.
    OperatorNotPreserved { generator: usize, operator: String },
}

impl std::fmt::Display for SymmetryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShapeMismatch { generator } => {
                write!(f, "generator {generator} does not match the task's variables")
            }
            Self::GoalNotPreserved { generator } => {
                write!(f, "generator {generator} does not preserve the goal")
            }
            Self::OperatorNotPreserved {
                generator,
                operator,
            } => write!(
                f,
                "generator {generator} maps operator {operator} outside the operator set"
            ),
        }
    }
}

impl std::error::Error for SymmetryError {}

/// Order-independent description of an operator, compared across
/// permutation images.
#[derive(Debug, PartialEq, Eq, Hash)]
struct OperatorSignature {
    cost: i64,
    preconditions: Vec<Fact>,
    effects: Vec<Fact>,
    numeric_effects: Vec<(usize, u8, u64)>,
}

impl OperatorSignature {
    fn of(op: &Operator, perm: &Permutation) -> Self {
        let mut preconditions: Vec<Fact> =
            op.preconditions.iter().map(|&f| perm.apply_fact(f)).collect();
        preconditions.sort_unstable();
        preconditions.dedup();
        let mut effects: Vec<Fact> = op.effects.iter().map(|&f| perm.apply_fact(f)).collect();
        effects.sort_unstable();
        let mut numeric_effects: Vec<(usize, u8, u64)> = op
            .numeric_effects
            .iter()
            .map(|e| (perm.map_numeric(e.var), e.kind as u8, e.amount.to_bits()))
            .collect();
        numeric_effects.sort_unstable();
        Self {
            cost: op.cost,
            preconditions,
            effects,
            numeric_effects,
        }
    }
}

/// Symmetry group given by a list of generator automorphisms.
///
/// Canonicalization is greedy: apply any generator that yields a
/// lexicographically smaller state, repeat until no generator improves.
/// The result is a canonical representative for many (not necessarily all)
/// symmetric states; states whose greedy representatives differ are simply
/// not merged.
#[derive(Debug, Clone, Default)]
pub struct GeneratorGroup {
    generators: Vec<Permutation>,
}

impl GeneratorGroup {
    /// Build a group after checking that every generator is an automorphism
    /// of `task`: it must map the goal onto the goal and every operator onto
    /// an operator with the same cost.
    ///
    /// # Errors
    ///
    /// Returns [`SymmetryError`] naming the first offending generator.
    pub fn new(task: &Task, generators: Vec<Permutation>) -> Result<Self, SymmetryError> {
        let domain_sizes: Vec<usize> = task.variables().iter().map(|v| v.domain_size()).collect();
        let identity = Permutation::identity();
        let operator_set: HashSet<OperatorSignature> = task
            .operators()
            .iter()
            .map(|op| OperatorSignature::of(op, &identity))
            .collect();
        let mut goal: Vec<Fact> = task.goal().to_vec();
        goal.sort_unstable();

        for (index, generator) in generators.iter().enumerate() {
            if !generator.covers(&domain_sizes, task.numeric_variables().len()) {
                return Err(SymmetryError::ShapeMismatch { generator: index });
            }
            let mut image: Vec<Fact> = goal.iter().map(|&f| generator.apply_fact(f)).collect();
            image.sort_unstable();
            if image != goal {
                return Err(SymmetryError::GoalNotPreserved { generator: index });
            }
            if let Some(op) = task
                .operators()
                .iter()
                .find(|op| !operator_set.contains(&OperatorSignature::of(op, generator)))
            {
                return Err(SymmetryError::OperatorNotPreserved {
                    generator: index,
                    operator: op.name.clone(),
                });
            }
        }
        Ok(Self { generators })
    }

    #[must_use]
    pub fn generators(&self) -> &[Permutation] {
        &self.generators
    }

    /// Greedy canonical representative of `state` and the permutation that
    /// maps `state` onto it.
    #[must_use]
    pub fn canonicalize(&self, state: &StateValues) -> (StateValues, Permutation) {
        let mut current = state.clone();
        let mut applied = Permutation::identity();
        loop {
            let mut improved = false;
            for generator in &self.generators {
                let candidate = generator.apply(&current);
                if candidate.lex_cmp(&current) == Ordering::Less {
                    current = candidate;
                    applied = Permutation::compose(&applied, generator);
                    improved = true;
                }
            }
            if !improved {
                return (current, applied);
            }
        }
    }
}

impl SymmetryGraph for GeneratorGroup {
    fn canonical_state(&self, state: &StateValues) -> StateValues {
        self.canonicalize(state).0
    }

    fn permutation_from_state_to_state(
        &self,
        from: &StateValues,
        to: &StateValues,
    ) -> Option<Permutation> {
        let (from_canonical, from_perm) = self.canonicalize(from);
        let (to_canonical, to_perm) = self.canonicalize(to);
        if !from_canonical.same_values(&to_canonical) {
            return None;
        }
        Some(Permutation::compose(&from_perm, &to_perm.inverse()))
    }
}
