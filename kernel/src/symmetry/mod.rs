//! Symmetry module: permutations and the symmetry graph.
//!
//! Depends on `task` and `values`.

pub mod group;
pub mod permutation;
