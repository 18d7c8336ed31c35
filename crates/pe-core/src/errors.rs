//! Cross-cutting error types for pereview.
//!
//! Storage errors (`LoadError`, `PersistError`) live in `pe-store` and
//! navigation errors in `pe-session`. The binary converges everything into
//! `anyhow`.

use thiserror::Error;

/// A cell or argument did not match its field's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} value '{value}' (expected one of: {expected})")]
pub struct FieldParseError {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

impl FieldParseError {
    pub(crate) fn new(field: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            field,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Errors raised while shaping raw tabular rows into a [`crate::Dataset`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// A column the review engine cannot work without is absent from the header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// The header names the same column twice.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A data row does not have one cell per header column.
    #[error("Row {row}: expected {expected} fields, found {found}")]
    FieldCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A manual review cell holds a value outside its vocabulary.
    #[error("Row {row}, column {column}: {source}")]
    InvalidField {
        row: usize,
        column: String,
        #[source]
        source: FieldParseError,
    },
}
