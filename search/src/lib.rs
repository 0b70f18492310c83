//! Orbit Search: eager best-first search with symmetry reduction.
//!
//! This crate provides the search layer of Orbit. It depends only on
//! `orbit_kernel`; it does NOT depend on `orbit_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! orbit_kernel  ←  orbit_search  ←  orbit_harness
//! (task, states,   (space, engine,   (worlds, runner,
//!  permutations)    open lists)       run reports)
//! ```
//!
//! # Key types
//!
//! - [`SearchSpace`] / [`SearchNode`] -- per-state status, costs and parent
//!   links, stored in an arena indexed by state id
//! - [`EagerSearch`] -- the expansion loop, one state per `step`
//! - [`ScalarEvaluator`] / [`EvaluationContext`] -- evaluator contract with a
//!   per-state result cache
//! - [`OpenList`] -- frontier contract; [`TieBreakingOpenList`] and
//!   [`AlternationOpenList`] implement it
//! - [`SearchPolicy`] -- reopening, multi-path dependence, cost type, bound
//! - [`PlanningContext`] -- the task, successor generator and optional
//!   symmetry graph, passed explicitly

#![forbid(unsafe_code)]

pub mod alternation;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod frontier;
pub mod node;
pub mod open_list;
pub mod plan;
pub mod policy;
pub mod progress;
pub mod pruning;
pub mod search;
pub mod space;
pub mod statistics;
mod symmetry_path;

pub use alternation::AlternationOpenList;
pub use context::PlanningContext;
pub use error::SearchError;
pub use evaluator::{EvaluationContext, EvaluationResult, EvaluatorRef, ScalarEvaluator, INFTY};
pub use frontier::TieBreakingOpenList;
pub use node::{NodeStatus, SearchNode};
pub use open_list::OpenList;
pub use plan::Plan;
pub use policy::SearchPolicy;
pub use search::{EagerSearch, SearchComponents, SearchStatus};
pub use space::SearchSpace;
