use serde::Serialize;

use crate::enums::{Acuity, ClotBurden, Confidence, Laterality, Location, PeFinding};
use crate::record::ManualReview;

/// Candidate values for every manual review field, as collected by the form.
///
/// `None` means the reviewer left the field empty. Nothing here is trusted
/// until it passes [`crate::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewPayload {
    pub pe_present: Option<PeFinding>,
    pub location: Option<Location>,
    pub acuity: Option<Acuity>,
    pub laterality: Option<Laterality>,
    pub clot_burden: Option<ClotBurden>,
    pub confidence: Option<Confidence>,
    pub comments: String,
}

impl ReviewPayload {
    /// Pre-fill a form from a record's stored review.
    #[must_use]
    pub fn from_review(review: &ManualReview) -> Self {
        Self {
            pe_present: review.pe_status.finding(),
            location: review.location,
            acuity: review.acuity,
            laterality: review.laterality,
            clot_burden: review.clot_burden,
            confidence: review.confidence,
            comments: review.comments.clone(),
        }
    }
}
