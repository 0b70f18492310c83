//! Alternation over several open lists.
//!
//! Every insertion goes to all sublists. Removal takes from the non-empty
//! sublist with the lowest priority (first on ties) and then increments that
//! priority, so sublists take turns. [`OpenList::boost_preferred`] lowers
//! the priority of preferred-only sublists by the boost amount, letting them
//! run for that many removals after progress.

use orbit_kernel::registry::StateId;

use crate::evaluator::EvaluationContext;
use crate::open_list::OpenList;

pub struct AlternationOpenList {
    sublists: Vec<Box<dyn OpenList>>,
    priorities: Vec<i64>,
    boost: i64,
}

impl AlternationOpenList {
    /// # Panics
    ///
    /// Panics if `sublists` is empty.
    #[must_use]
    pub fn new(sublists: Vec<Box<dyn OpenList>>, boost: i64) -> Self {
        assert!(!sublists.is_empty(), "alternation needs at least one sublist");
        let priorities = vec![0; sublists.len()];
        Self {
            sublists,
            priorities,
            boost,
        }
    }

    #[must_use]
    pub fn priorities(&self) -> &[i64] {
        &self.priorities
    }
}

impl OpenList for AlternationOpenList {
    fn insert(&mut self, ctx: &mut EvaluationContext<'_>, state: StateId) {
        for sublist in &mut self.sublists {
            sublist.insert(ctx, state);
        }
    }

    fn remove_min(&mut self) -> Option<StateId> {
        let best = self
            .sublists
            .iter()
            .enumerate()
            .filter(|(_, sublist)| !sublist.is_empty())
            .min_by_key(|&(i, _)| self.priorities[i])
            .map(|(i, _)| i)?;
        self.priorities[best] += 1;
        self.sublists[best].remove_min()
    }

    fn is_empty(&self) -> bool {
        self.sublists.iter().all(|sublist| sublist.is_empty())
    }

    fn len(&self) -> usize {
        self.sublists.iter().map(|sublist| sublist.len()).sum()
    }

    fn clear(&mut self) {
        for sublist in &mut self.sublists {
            sublist.clear();
        }
    }

    fn boost_preferred(&mut self) {
        for (sublist, priority) in self.sublists.iter_mut().zip(&mut self.priorities) {
            if sublist.only_contains_preferred_entries() {
                *priority -= self.boost;
            }
        }
    }

    fn is_dead_end(&self, ctx: &mut EvaluationContext<'_>) -> bool {
        if self.is_reliable_dead_end(ctx) {
            return true;
        }
        self.sublists.iter().all(|sublist| sublist.is_dead_end(ctx))
    }

    fn is_reliable_dead_end(&self, ctx: &mut EvaluationContext<'_>) -> bool {
        self.sublists
            .iter()
            .any(|sublist| sublist.is_reliable_dead_end(ctx))
    }

    fn only_contains_preferred_entries(&self) -> bool {
        false
    }
}
