//! Open list contract.

use orbit_kernel::registry::StateId;

use crate::evaluator::EvaluationContext;

/// Priority container over state identifiers.
///
/// Entries are never updated in place: a state reopened through a cheaper
/// path is inserted again, and the engine discards stale entries when they
/// are removed.
pub trait OpenList {
    /// Insert `state`, keyed by the list's evaluators in `ctx`.
    fn insert(&mut self, ctx: &mut EvaluationContext<'_>, state: StateId);

    fn remove_min(&mut self) -> Option<StateId>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    fn clear(&mut self);

    /// Progress notification. Lists that favour preferred entries after
    /// progress react here; the default ignores it.
    fn boost_preferred(&mut self) {}

    /// Whether the list's evaluators consider `ctx`'s state a dead end.
    fn is_dead_end(&self, ctx: &mut EvaluationContext<'_>) -> bool;

    /// Whether some evaluator with reliable dead ends reports one.
    fn is_reliable_dead_end(&self, ctx: &mut EvaluationContext<'_>) -> bool;

    fn only_contains_preferred_entries(&self) -> bool;
}
