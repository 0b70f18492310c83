//! Cost adjustment for ranking.
//!
//! `g` values may be computed under an adjusted cost model (unit cost, or
//! cost plus one to break zero-cost plateaus). `real_g` always uses the
//! operator's true cost.

use crate::task::model::Operator;

/// Cost model used for `g` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CostType {
    /// The operator's own cost.
    #[default]
    Normal,
    /// Every operator costs 1.
    One,
    /// Operator cost plus 1.
    PlusOne,
}

impl CostType {
    /// Stable lowercase name, used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::One => "one",
            Self::PlusOne => "plusone",
        }
    }
}

/// The cost of `op` under `cost_type`.
#[must_use]
pub fn adjusted_cost(op: &Operator, cost_type: CostType) -> i64 {
    match cost_type {
        CostType::Normal => op.cost,
        CostType::One => 1,
        CostType::PlusOne => op.cost.saturating_add(1),
    }
}
