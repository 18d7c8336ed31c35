//! Navigation error types.

use thiserror::Error;

/// A jump request the cursor cannot honour. The cursor does not move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The report number is outside `1..=len`.
    #[error("report {target} is out of range; enter a number between 1 and {len}")]
    OutOfRange { target: i64, len: usize },

    /// The input is not an integer.
    #[error("'{0}' is not a report number")]
    NotANumber(String),
}
