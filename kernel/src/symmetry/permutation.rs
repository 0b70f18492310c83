//! `Permutation`: one element of a task's symmetry group.
//!
//! A permutation relabels facts: `(var, value)` becomes
//! `(var_map[var], value_map[var][value])`, and numeric variable `j` becomes
//! `numeric_map[j]`. Applied to a state, every variable's value moves to its
//! image variable under the per-variable value relabeling.
//!
//! # Identity
//!
//! `Permutation::default()` is the identity and stores nothing. Any index
//! beyond a stored map is treated as fixed, so the identity composes with
//! permutations of any size.
//!
//! # Composition order
//!
//! [`Permutation::compose`]`(first, second)` applies `first`, then `second`:
//! `compose(p, q).apply(s) == q.apply(&p.apply(s))`.

use crate::task::model::Fact;
use crate::values::StateValues;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permutation {
    var_map: Vec<usize>,
    value_map: Vec<Vec<u32>>,
    numeric_map: Vec<usize>,
}

/// A map that is not a valid permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    /// `var_map` and `value_map` disagree in length.
    ShapeMismatch { var_count: usize, value_map_count: usize },
    /// A variable or numeric map is not a bijection on `0..n`.
    NotBijective { plane: &'static str },
    /// The value relabeling of `var` is not a bijection onto the domain of
    /// its image variable.
    ValueMapInvalid { var: usize },
}

impl std::fmt::Display for PermutationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShapeMismatch {
                var_count,
                value_map_count,
            } => write!(
                f,
                "var map covers {var_count} variables but value map covers {value_map_count}"
            ),
            Self::NotBijective { plane } => write!(f, "{plane} map is not a bijection"),
            Self::ValueMapInvalid { var } => {
                write!(f, "value map of var{var} is not a bijection onto its image domain")
            }
        }
    }
}

impl std::error::Error for PermutationError {}

fn is_bijection(map: &[usize]) -> bool {
    let mut seen = vec![false; map.len()];
    for &image in map {
        match seen.get_mut(image) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

impl Permutation {
    /// The identity permutation.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Build a permutation from explicit maps.
    ///
    /// `value_map[var]` lists, for each value of `var`, its image value in
    /// the domain of `var_map[var]`; both domains must have equal size.
    ///
    /// # Errors
    ///
    /// Returns [`PermutationError`] if any map is not a bijection.
    pub fn new(
        var_map: Vec<usize>,
        value_map: Vec<Vec<u32>>,
        numeric_map: Vec<usize>,
    ) -> Result<Self, PermutationError> {
        if var_map.len() != value_map.len() {
            return Err(PermutationError::ShapeMismatch {
                var_count: var_map.len(),
                value_map_count: value_map.len(),
            });
        }
        if !is_bijection(&var_map) {
            return Err(PermutationError::NotBijective { plane: "variable" });
        }
        if !is_bijection(&numeric_map) {
            return Err(PermutationError::NotBijective { plane: "numeric" });
        }
        for (var, values) in value_map.iter().enumerate() {
            let image_domain = value_map[var_map[var]].len();
            let as_usize: Vec<usize> = values.iter().map(|&v| v as usize).collect();
            if values.len() != image_domain || !is_bijection(&as_usize) {
                return Err(PermutationError::ValueMapInvalid { var });
            }
        }
        Ok(Self {
            var_map,
            value_map,
            numeric_map,
        })
    }

    /// Swap two variables with identical domains, leaving values unchanged.
    ///
    /// `domain_sizes` lists the domain size of every variable.
    ///
    /// # Errors
    ///
    /// Returns [`PermutationError::ValueMapInvalid`] if the two domains
    /// differ in size.
    pub fn swap_variables(
        domain_sizes: &[usize],
        a: usize,
        b: usize,
    ) -> Result<Self, PermutationError> {
        let mut var_map: Vec<usize> = (0..domain_sizes.len()).collect();
        var_map.swap(a, b);
        let value_map = domain_sizes
            .iter()
            .map(|&d| (0..d).map(|v| u32::try_from(v).unwrap_or(u32::MAX)).collect())
            .collect();
        Self::new(var_map, value_map, Vec::new())
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.var_map.iter().enumerate().all(|(i, &v)| i == v)
            && self
                .value_map
                .iter()
                .all(|m| m.iter().enumerate().all(|(i, &v)| i == v as usize))
            && self.numeric_map.iter().enumerate().all(|(i, &v)| i == v)
    }

    /// True iff this permutation is the identity or is shaped for a task
    /// with the given discrete domain sizes and numeric variable count.
    #[must_use]
    pub fn covers(&self, domain_sizes: &[usize], numeric_count: usize) -> bool {
        let discrete_ok = self.var_map.is_empty()
            || (self.var_map.len() == domain_sizes.len()
                && self
                    .value_map
                    .iter()
                    .zip(domain_sizes)
                    .all(|(m, &d)| m.len() == d));
        let numeric_ok = self.numeric_map.is_empty() || self.numeric_map.len() == numeric_count;
        discrete_ok && numeric_ok
    }

    /// Image variable of `var`.
    #[must_use]
    pub fn map_var(&self, var: usize) -> usize {
        self.var_map.get(var).copied().unwrap_or(var)
    }

    /// Image of fact `(var, value)`.
    #[must_use]
    pub fn apply_fact(&self, fact: Fact) -> Fact {
        let value = self
            .value_map
            .get(fact.var)
            .and_then(|m| m.get(fact.value as usize))
            .copied()
            .unwrap_or(fact.value);
        Fact::new(self.map_var(fact.var), value)
    }

    /// Image of numeric variable `var`.
    #[must_use]
    pub fn map_numeric(&self, var: usize) -> usize {
        self.numeric_map.get(var).copied().unwrap_or(var)
    }

    /// Apply this permutation to a complete state.
    #[must_use]
    pub fn apply(&self, state: &StateValues) -> StateValues {
        if self.var_map.is_empty() && self.numeric_map.is_empty() {
            return state.clone();
        }
        let mut values = vec![0; state.len()];
        for (var, &value) in state.values().iter().enumerate() {
            let image = self.apply_fact(Fact::new(var, value));
            values[image.var] = image.value;
        }
        let mut numeric = vec![0.0; state.numeric().len()];
        for (var, &x) in state.numeric().iter().enumerate() {
            numeric[self.map_numeric(var)] = x;
        }
        StateValues::new(values, numeric)
    }

    /// Apply `first`, then `second`.
    #[must_use]
    pub fn compose(first: &Self, second: &Self) -> Self {
        let var_count = first.var_map.len().max(second.var_map.len());
        let numeric_count = first.numeric_map.len().max(second.numeric_map.len());
        if var_count == 0 && numeric_count == 0 {
            return Self::identity();
        }

        let mut var_map = Vec::with_capacity(var_count);
        let mut value_map = Vec::with_capacity(var_count);
        for var in 0..var_count {
            let mid = first.map_var(var);
            var_map.push(second.map_var(mid));
            let domain = first
                .value_map
                .get(var)
                .or_else(|| second.value_map.get(var))
                .map_or(0, Vec::len);
            let values = (0..domain)
                .map(|v| {
                    let v = u32::try_from(v).unwrap_or(u32::MAX);
                    second.apply_fact(first.apply_fact(Fact::new(var, v))).value
                })
                .collect();
            value_map.push(values);
        }
        let numeric_map = (0..numeric_count)
            .map(|j| second.map_numeric(first.map_numeric(j)))
            .collect();
        Self {
            var_map,
            value_map,
            numeric_map,
        }
    }

    /// The permutation undoing this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut var_map = vec![0; self.var_map.len()];
        let mut value_map = vec![Vec::new(); self.value_map.len()];
        for (var, &image) in self.var_map.iter().enumerate() {
            var_map[image] = var;
            let forward = &self.value_map[var];
            let mut backward = vec![0; forward.len()];
            for (v, &w) in forward.iter().enumerate() {
                backward[w as usize] = u32::try_from(v).unwrap_or(u32::MAX);
            }
            value_map[image] = backward;
        }
        let mut numeric_map = vec![0; self.numeric_map.len()];
        for (j, &image) in self.numeric_map.iter().enumerate() {
            numeric_map[image] = j;
        }
        Self {
            var_map,
            value_map,
            numeric_map,
        }
    }
}
