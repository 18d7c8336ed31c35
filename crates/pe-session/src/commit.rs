//! Commit outcomes and the record mutation step of the commit pipeline.
//!
//! The pipeline itself lives on [`crate::ReviewSession::commit`]: validate,
//! mutate the current record, persist the whole dataset. This module holds
//! the pieces that do not need the session.

use std::fmt;

use pe_core::enums::{PeFinding, PeStatus};
use pe_core::{ManualReview, ReviewPayload, Violation};
use pe_store::PersistError;

/// Result of one commit attempt.
#[derive(Debug)]
pub enum CommitOutcome {
    /// The record was updated and the dataset written to disk.
    Committed,
    /// Validation failed; nothing was mutated or written.
    Rejected(Vec<Violation>),
    /// The record was updated in memory but the write failed. The edit is
    /// kept and the session stays dirty so the reviewer can retry.
    Failed(PersistError),
    /// The dataset has no records.
    NoCurrentRecord,
}

impl CommitOutcome {
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Committed => "committed",
            Self::Rejected(_) => "rejected",
            Self::Failed(_) => "failed",
            Self::NoCurrentRecord => "no_current_record",
        }
    }
}

impl fmt::Display for CommitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Committed => f.write_str("review saved"),
            Self::Rejected(violations) => {
                f.write_str("review not saved: ")?;
                for (index, violation) in violations.iter().enumerate() {
                    if index > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{violation}")?;
                }
                Ok(())
            }
            Self::Failed(error) => write!(f, "review kept in memory but not saved: {error}"),
            Self::NoCurrentRecord => f.write_str("no report to review"),
        }
    }
}

/// Copy a validated payload onto a record's manual review fields.
///
/// Characterization fields are written only for a positive finding and are
/// cleared otherwise, so a record changed from Present to Absent carries no
/// stale location or acuity. Comments are trimmed.
pub(crate) fn apply(review: &mut ManualReview, payload: &ReviewPayload) {
    review.pe_status = payload
        .pe_present
        .map_or(PeStatus::Unreviewed, PeStatus::Reviewed);
    review.confidence = payload.confidence;
    payload.comments.trim().clone_into(&mut review.comments);

    if payload.pe_present == Some(PeFinding::Present) {
        review.location = payload.location;
        review.acuity = payload.acuity;
        review.laterality = payload.laterality;
        review.clot_burden = payload.clot_burden;
    } else {
        review.clear_characterization();
    }
}
