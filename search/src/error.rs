//! Typed search errors.
//!
//! `SearchError` represents configuration failures only. Runtime terminations
//! (solution found, frontier exhausted, budget exhausted) are expressed via
//! [`crate::search::TerminationReason`]; an infeasible move is a statistic,
//! never an error.

/// Typed failure for search configuration.
///
/// Bound violations are returned before any exploration begins.
/// `MissingObjective` is returned as soon as a state without an objective
/// would be ordered by a best-first frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A policy bound is zero or otherwise unusable.
    InvalidBound {
        field: &'static str,
        detail: String,
    },
    /// Best-first exploration was selected but a state has no objective.
    MissingObjective { label: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBound { field, detail } => {
                write!(f, "invalid search bound `{field}`: {detail}")
            }
            Self::MissingObjective { label } => {
                write!(
                    f,
                    "best-first exploration requires an objective, state `{label}` has none"
                )
            }
        }
    }
}

impl std::error::Error for SearchError {}
