//! Search policy: the reopening and cost configuration of a run.

use orbit_kernel::task::cost::CostType;

use crate::error::SearchError;

/// Successor-update and cost configuration.
///
/// Default: no reopening of closed nodes, no multi-path dependence, normal
/// costs, unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchPolicy {
    /// Reopen CLOSED nodes when a cheaper path is found. Needed for optimal
    /// search with inconsistent heuristics.
    pub reopen_closed_nodes: bool,
    /// Without reopening, still redirect a CLOSED node's parent link to the
    /// cheaper path.
    pub use_multi_path_dependence: bool,
    /// Cost used for `g`; `real_g` always uses true costs.
    pub cost_type: CostType,
    /// Successors whose true cost-so-far reaches this bound are skipped.
    pub bound: Option<i64>,
}

impl SearchPolicy {
    /// Validate the policy before any search step is taken.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnsupportedPolicy`] for a non-positive bound.
    pub fn validate(&self) -> Result<(), SearchError> {
        if let Some(bound) = self.bound {
            if bound <= 0 {
                return Err(SearchError::UnsupportedPolicy {
                    detail: format!("bound must be positive, got {bound}"),
                });
            }
        }
        Ok(())
    }

    /// Whether a successor with true cost-so-far `real_g` is within bound.
    #[must_use]
    pub fn within_bound(&self, real_g: i64) -> bool {
        self.bound.map_or(true, |bound| real_g < bound)
    }
}
