//! Commit gate for review payloads.
//!
//! Rules are evaluated independently and every violation is reported:
//! - PE Present is required.
//! - Reviewer confidence is required.
//! - When PE is present, location, acuity, laterality and clot burden are
//!   each required.

use serde::Serialize;
use std::fmt;

use crate::enums::PeFinding;
use crate::payload::ReviewPayload;

/// A manual review field as named to the reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewField {
    PePresent,
    Confidence,
    Location,
    Acuity,
    Laterality,
    ClotBurden,
}

impl ReviewField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PePresent => "PE Present",
            Self::Confidence => "Confidence",
            Self::Location => "PE Location",
            Self::Acuity => "PE Acuity",
            Self::Laterality => "PE Laterality",
            Self::ClotBurden => "PE Clot Burden",
        }
    }
}

impl fmt::Display for ReviewField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "field")]
pub enum Violation {
    MissingRequired(ReviewField),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired(ReviewField::PePresent | ReviewField::Confidence) => {
                write!(f, "{} is required", self.field())
            }
            Self::MissingRequired(field) => write!(f, "{field} is required when PE is present"),
        }
    }
}

impl Violation {
    #[must_use]
    pub const fn field(self) -> ReviewField {
        match self {
            Self::MissingRequired(field) => field,
        }
    }
}

/// Collect every rule the payload violates. An empty result means committable.
#[must_use]
pub fn validate(payload: &ReviewPayload) -> Vec<Violation> {
    let mut violations = Vec::new();

    if payload.pe_present.is_none() {
        violations.push(Violation::MissingRequired(ReviewField::PePresent));
    }
    if payload.confidence.is_none() {
        violations.push(Violation::MissingRequired(ReviewField::Confidence));
    }

    if payload.pe_present == Some(PeFinding::Present) {
        let characterization = [
            (payload.location.is_some(), ReviewField::Location),
            (payload.acuity.is_some(), ReviewField::Acuity),
            (payload.laterality.is_some(), ReviewField::Laterality),
            (payload.clot_burden.is_some(), ReviewField::ClotBurden),
        ];
        violations.extend(
            characterization
                .into_iter()
                .filter(|(filled, _)| !filled)
                .map(|(_, field)| Violation::MissingRequired(field)),
        );
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{Acuity, ClotBurden, Confidence, Laterality, Location};
    use pretty_assertions::assert_eq;

    fn complete_present() -> ReviewPayload {
        ReviewPayload {
            pe_present: Some(PeFinding::Present),
            location: Some(Location::Segmental),
            acuity: Some(Acuity::Acute),
            laterality: Some(Laterality::Right),
            clot_burden: Some(ClotBurden::Low),
            confidence: Some(Confidence::High),
            comments: String::new(),
        }
    }

    #[test]
    fn empty_payload_reports_both_required_fields_only() {
        assert_eq!(
            validate(&ReviewPayload::default()),
            vec![
                Violation::MissingRequired(ReviewField::PePresent),
                Violation::MissingRequired(ReviewField::Confidence),
            ]
        );
    }

    #[test]
    fn complete_present_payload_is_committable() {
        assert!(validate(&complete_present()).is_empty());
    }

    #[test]
    fn absent_payload_ignores_characterization() {
        let payload = ReviewPayload {
            pe_present: Some(PeFinding::Absent),
            confidence: Some(Confidence::Low),
            ..ReviewPayload::default()
        };
        assert!(validate(&payload).is_empty());
    }

    #[test]
    fn present_payload_reports_each_missing_characterization_field() {
        let payload = ReviewPayload {
            location: None,
            clot_burden: None,
            confidence: None,
            ..complete_present()
        };
        assert_eq!(
            validate(&payload),
            vec![
                Violation::MissingRequired(ReviewField::Confidence),
                Violation::MissingRequired(ReviewField::Location),
                Violation::MissingRequired(ReviewField::ClotBurden),
            ]
        );
    }

    #[test]
    fn present_with_nothing_else_reports_five_violations() {
        let payload = ReviewPayload {
            pe_present: Some(PeFinding::Present),
            ..ReviewPayload::default()
        };
        let fields: Vec<_> = validate(&payload).into_iter().map(Violation::field).collect();
        assert_eq!(
            fields,
            vec![
                ReviewField::Confidence,
                ReviewField::Location,
                ReviewField::Acuity,
                ReviewField::Laterality,
                ReviewField::ClotBurden,
            ]
        );
    }

    #[test]
    fn violation_messages_match_form_labels() {
        assert_eq!(
            Violation::MissingRequired(ReviewField::PePresent).to_string(),
            "PE Present is required"
        );
        assert_eq!(
            Violation::MissingRequired(ReviewField::Acuity).to_string(),
            "PE Acuity is required when PE is present"
        );
    }
}
