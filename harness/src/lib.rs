//! Orbit Harness: world-level orchestration for the search engine.
//!
//! The harness runs a [`contract::PlanningWorld`] through
//! [`runner::run_world`], re-executes the returned plan against the task,
//! and packages the outcome as a [`runner::RunReport`] that
//! [`report_dir`] can persist with a content digest.
//!
//! The harness does NOT implement search logic; it delegates to
//! `orbit_search`. Worlds provide domain data only; the harness owns
//! orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod report_dir;
pub mod runner;
pub mod worlds;
