//! Orbit Kernel: the planning model shared by search and path reconstruction.
//!
//! # API Surface
//!
//! - [`task::model::Task`] -- validated variables, operators, initial state, goal
//! - [`task::successor::SuccessorGenerator`] -- applicable-operator enumeration
//! - [`registry::StateRegistry`] -- interning of state values into [`registry::StateId`]s
//! - [`symmetry::permutation::Permutation`] and [`symmetry::group::SymmetryGraph`]
//!   -- symmetry-group elements and canonicalization
//!
//! # Module Dependency Direction
//!
//! `digest` ← `values` ← `task` ← `registry`, `symmetry`
//!
//! One-way only. No cycles. Everything in this crate is read-shared by the
//! search layer; only the registry mutates, and only on interning.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod digest;
pub mod registry;
pub mod symmetry;
pub mod task;
pub mod values;
