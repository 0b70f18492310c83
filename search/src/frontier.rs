//! Tie-breaking open list: lexicographic evaluator keys, FIFO among equals.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use orbit_kernel::registry::StateId;

use crate::evaluator::{EvaluationContext, EvaluatorRef};
use crate::open_list::OpenList;

/// Ordering key: evaluator values in list order, then insertion order.
type EntryKey = (Vec<i64>, u64);

/// A heap entry.
///
/// `BinaryHeap` is a max-heap, so the key is wrapped in `Reverse` to pop the
/// smallest key first.
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<EntryKey>,
    state: StateId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first open list ordered by a vector of evaluators.
///
/// Maintains:
/// - a `BinaryHeap` for O(log n) removal of the best entry
/// - an insertion counter so equal keys leave in FIFO order
/// - the high-water mark of the list size
pub struct TieBreakingOpenList {
    heap: BinaryHeap<FrontierEntry>,
    evaluators: Vec<EvaluatorRef>,
    preferred_only: bool,
    allow_unsafe_pruning: bool,
    next_insertion: u64,
    high_water: usize,
}

impl TieBreakingOpenList {
    /// # Panics
    ///
    /// Panics if `evaluators` is empty.
    #[must_use]
    pub fn new(evaluators: Vec<EvaluatorRef>) -> Self {
        assert!(!evaluators.is_empty(), "open list needs at least one evaluator");
        Self {
            heap: BinaryHeap::new(),
            evaluators,
            preferred_only: false,
            allow_unsafe_pruning: false,
            next_insertion: 0,
            high_water: 0,
        }
    }

    /// Only accept states reached by preferred operators.
    #[must_use]
    pub fn preferred_only(mut self) -> Self {
        self.preferred_only = true;
        self
    }

    /// Treat an infinite first evaluator as a dead end, reliable or not.
    #[must_use]
    pub fn allow_unsafe_pruning(mut self) -> Self {
        self.allow_unsafe_pruning = true;
        self
    }

    /// Largest size the list has reached.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl OpenList for TieBreakingOpenList {
    fn insert(&mut self, ctx: &mut EvaluationContext<'_>, state: StateId) {
        if self.preferred_only && !ctx.is_preferred() {
            return;
        }
        let values: Vec<i64> = self
            .evaluators
            .iter()
            .map(|e| ctx.get_value(e.as_ref()))
            .collect();
        self.heap.push(FrontierEntry {
            key: Reverse((values, self.next_insertion)),
            state,
        });
        self.next_insertion += 1;
        self.high_water = self.high_water.max(self.heap.len());
    }

    fn remove_min(&mut self) -> Option<StateId> {
        self.heap.pop().map(|e| e.state)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
    }

    fn is_dead_end(&self, ctx: &mut EvaluationContext<'_>) -> bool {
        if self.is_reliable_dead_end(ctx) {
            return true;
        }
        if self.allow_unsafe_pruning && ctx.is_infinite(self.evaluators[0].as_ref()) {
            return true;
        }
        self.evaluators.iter().all(|e| ctx.is_infinite(e.as_ref()))
    }

    fn is_reliable_dead_end(&self, ctx: &mut EvaluationContext<'_>) -> bool {
        self.evaluators
            .iter()
            .any(|e| e.dead_ends_are_reliable() && ctx.is_infinite(e.as_ref()))
    }

    fn only_contains_preferred_entries(&self) -> bool {
        self.preferred_only
    }
}
