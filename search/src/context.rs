//! Planning context: the read-shared collaborators of a search run.

use orbit_kernel::symmetry::group::SymmetryGraph;
use orbit_kernel::task::model::Task;
use orbit_kernel::task::successor::SuccessorGenerator;

/// Handle to the task, its successor generator, and the optional symmetry
/// graph.
///
/// Passed explicitly to every component that needs them. None of these are
/// mutated during search; the state registry, which is, is owned by the
/// engine and lent out for path tracing.
#[derive(Clone, Copy)]
pub struct PlanningContext<'a> {
    pub task: &'a Task,
    pub successor_generator: &'a SuccessorGenerator,
    pub symmetry: Option<&'a dyn SymmetryGraph>,
}

impl<'a> PlanningContext<'a> {
    #[must_use]
    pub fn new(task: &'a Task, successor_generator: &'a SuccessorGenerator) -> Self {
        Self {
            task,
            successor_generator,
            symmetry: None,
        }
    }

    /// Search over canonical representatives under `symmetry`.
    #[must_use]
    pub fn with_symmetry(mut self, symmetry: &'a dyn SymmetryGraph) -> Self {
        self.symmetry = Some(symmetry);
        self
    }
}

impl std::fmt::Debug for PlanningContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanningContext")
            .field("operators", &self.task.operators().len())
            .field("symmetry", &self.symmetry.is_some())
            .finish()
    }
}
