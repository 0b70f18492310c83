//! Typed search errors.
//!
//! `SearchError` covers pre-flight configuration failures and fatal
//! path-reconstruction failures. Recoverable planning outcomes (frontier
//! exhaustion, dead-end states) are expressed via
//! [`crate::search::SearchStatus`], never as errors. Illegal node status
//! transitions are assertion failures: they indicate a bug in the calling
//! search logic, not a property of the task.

/// Typed failure for search configuration and plan extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The search policy selects an unsupported option.
    UnsupportedPolicy { detail: String },
    /// The symmetry graph could not relate a canonical state to the state
    /// actually produced by its recorded operator.
    MissingPermutation { from: String, to: String },
    /// No applicable operator reproduces the next state of the reconstructed
    /// trace. Indicates an inconsistent registry or symmetry group.
    PathReconstruction { from: String, to: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedPolicy { detail } => {
                write!(f, "unsupported search policy: {detail}")
            }
            Self::MissingPermutation { from, to } => {
                write!(f, "no symmetry maps state {from} to state {to}")
            }
            Self::PathReconstruction { from, to } => {
                write!(f, "no operator reaches state {to} from state {from}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
