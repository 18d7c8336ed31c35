//! # pe-session
//!
//! The review-session engine. A [`ReviewSession`] owns the loaded dataset,
//! the reviewer's cursor and the dirty flag, and is passed explicitly to
//! every operation:
//!
//! - navigation: first/next unreviewed, advance, retreat, jump
//! - the commit pipeline (validate, mutate, persist), the only writer
//! - progress statistics and AI-agreement, both read-only
//!
//! Everything runs synchronously on the caller's thread. Uncommitted edits are
//! not flushed when the session is dropped.

pub mod agreement;
pub mod commit;
pub mod cursor;
pub mod error;
mod session;
pub mod stats;
mod test_support;

pub use agreement::{AgreementVerdict, ModelSource, agreement};
pub use commit::CommitOutcome;
pub use cursor::{Advance, Cursor, NextUnreviewed, first_unreviewed, next_unreviewed};
pub use error::NavigationError;
pub use session::ReviewSession;
pub use stats::{ReviewStats, stats};
