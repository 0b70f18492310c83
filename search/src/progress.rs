//! Heuristic progress: best value seen per progress heuristic.

use log::info;

use crate::evaluator::{EvaluationContext, EvaluatorRef, INFTY};

#[derive(Debug, Clone, Default)]
pub struct SearchProgress {
    best: Vec<Option<i64>>,
}

impl SearchProgress {
    #[must_use]
    pub fn new(heuristic_count: usize) -> Self {
        Self {
            best: vec![None; heuristic_count],
        }
    }

    /// Compare `ctx`'s values for `heuristics` with the best seen so far.
    ///
    /// Returns `true` if any finite value improves on its heuristic's best.
    /// `heuristics` must have the length and order given to [`Self::new`].
    pub fn check_progress(
        &mut self,
        ctx: &mut EvaluationContext<'_>,
        heuristics: &[EvaluatorRef],
    ) -> bool {
        debug_assert_eq!(heuristics.len(), self.best.len());
        let mut improved = false;
        for (heuristic, best) in heuristics.iter().zip(&mut self.best) {
            let value = ctx.get_value(heuristic.as_ref());
            if value == INFTY {
                continue;
            }
            if best.map_or(true, |b| value < b) {
                *best = Some(value);
                info!(
                    "New best heuristic value for {}: {value} [g={}]",
                    heuristic.name(),
                    ctx.g()
                );
                improved = true;
            }
        }
        improved
    }

    /// Best value seen for the `index`-th heuristic.
    #[must_use]
    pub fn best(&self, index: usize) -> Option<i64> {
        self.best.get(index).copied().flatten()
    }
}
