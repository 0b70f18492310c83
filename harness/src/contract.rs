//! Planning world contract: the minimal trait a world must implement.
//!
//! Worlds provide a planning task and, optionally, the generators of its
//! symmetry group. Worlds may NOT run search, validate plans, or hash
//! reports; those are runner concerns.

use orbit_kernel::symmetry::permutation::Permutation;
use orbit_kernel::task::model::{Task, TaskError};

/// The contract a world must implement to be run by the harness runner.
pub trait PlanningWorld {
    /// Unique world identifier (e.g., `"gripper_4"`).
    fn world_id(&self) -> String;

    /// Build the planning task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError`] if the world describes an invalid task.
    fn task(&self) -> Result<Task, TaskError>;

    /// Generators of the task's symmetry group. Must be automorphisms of
    /// `task`; the runner rejects them otherwise.
    fn symmetry_generators(&self, _task: &Task) -> Vec<Permutation> {
        Vec::new()
    }
}
