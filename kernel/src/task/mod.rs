//! Task module: the planning model, cost adjustment, and successor generation.
//!
//! Depends on `values`. Does not import from `registry` or `symmetry`.

pub mod cost;
pub mod model;
pub mod successor;
