//! `StateValues`: the complete variable assignment of one planning state.
//!
//! # Equality semantics
//!
//! Two states are equal iff every component matches. Numeric components are
//! compared by bit pattern, so a state always equals itself (even with a NaN
//! component) and `Eq`/`Hash` stay lawful for interning.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Discrete values (one per finite-domain variable) plus numeric values.
#[derive(Debug, Clone, Default)]
pub struct StateValues {
    values: Vec<u32>,
    numeric: Vec<f64>,
}

impl StateValues {
    #[must_use]
    pub fn new(values: Vec<u32>, numeric: Vec<f64>) -> Self {
        Self { values, numeric }
    }

    /// A state with only discrete variables.
    #[must_use]
    pub fn discrete(values: Vec<u32>) -> Self {
        Self {
            values,
            numeric: Vec::new(),
        }
    }

    /// Value of discrete variable `var`. Panics if out of range.
    #[must_use]
    pub fn value(&self, var: usize) -> u32 {
        self.values[var]
    }

    /// Value of numeric variable `var`. Panics if out of range.
    #[must_use]
    pub fn numeric_value(&self, var: usize) -> f64 {
        self.numeric[var]
    }

    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    #[must_use]
    pub fn numeric(&self) -> &[f64] {
        &self.numeric
    }

    pub(crate) fn values_mut(&mut self) -> &mut [u32] {
        &mut self.values
    }

    pub(crate) fn numeric_mut(&mut self) -> &mut [f64] {
        &mut self.numeric
    }

    /// Number of discrete variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.numeric.is_empty()
    }

    /// Component-wise equality, independent of any registry identifier.
    #[must_use]
    pub fn same_values(&self, other: &Self) -> bool {
        self.values == other.values
            && self.numeric.len() == other.numeric.len()
            && self
                .numeric
                .iter()
                .zip(&other.numeric)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }

    /// Total lexicographic order: discrete values first, then numeric
    /// values under `f64::total_cmp`.
    #[must_use]
    pub fn lex_cmp(&self, other: &Self) -> Ordering {
        self.values.cmp(&other.values).then_with(|| {
            self.numeric
                .iter()
                .zip(&other.numeric)
                .map(|(a, b)| a.total_cmp(b))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| self.numeric.len().cmp(&other.numeric.len()))
        })
    }

    /// Little-endian encoding of both planes, used for fingerprints.
    #[must_use]
    pub fn identity_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(8 + self.values.len() * 4 + self.numeric.len() * 8);
        buf.extend_from_slice(&(self.values.len() as u64).to_le_bytes());
        for v in &self.values {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        for x in &self.numeric {
            buf.extend_from_slice(&x.to_bits().to_le_bytes());
        }
        buf
    }
}

impl PartialEq for StateValues {
    fn eq(&self, other: &Self) -> bool {
        self.same_values(other)
    }
}

impl Eq for StateValues {}

impl Hash for StateValues {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
        for x in &self.numeric {
            x.to_bits().hash(state);
        }
    }
}

impl std::fmt::Display for StateValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.values)?;
        if !self.numeric.is_empty() {
            write!(f, " {:?}", self.numeric)?;
        }
        Ok(())
    }
}
