use pe_core::enums::{PeFinding, is_blank, parse_optional};
use pe_core::{Record, ReviewPayload};

use super::command::EditField;

/// The reviewer's unsaved form for the current record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    payload: ReviewPayload,
}

impl Draft {
    /// Pre-fill from a record's stored review; empty when there is no record.
    #[must_use]
    pub fn load(record: Option<&Record>) -> Self {
        Self {
            payload: record.map_or_else(ReviewPayload::default, |record| {
                ReviewPayload::from_review(&record.review)
            }),
        }
    }

    #[must_use]
    pub const fn payload(&self) -> &ReviewPayload {
        &self.payload
    }

    pub const fn set_pe(&mut self, finding: PeFinding) {
        self.payload.pe_present = Some(finding);
    }

    /// Set a vocabulary field; `none`, `-` and blank clear it.
    ///
    /// # Errors
    ///
    /// The value is not in the field's vocabulary.
    pub fn set(&mut self, field: EditField, value: &str) -> anyhow::Result<()> {
        let value = if is_blank(value) || value == "-" || value.eq_ignore_ascii_case("none") {
            ""
        } else {
            value
        };
        let payload = &mut self.payload;
        match field {
            EditField::Confidence => payload.confidence = parse_optional(value)?,
            EditField::Location => payload.location = parse_optional(value)?,
            EditField::Acuity => payload.acuity = parse_optional(value)?,
            EditField::Laterality => payload.laterality = parse_optional(value)?,
            EditField::ClotBurden => payload.clot_burden = parse_optional(value)?,
        }
        Ok(())
    }

    pub fn set_comment(&mut self, text: &str) {
        text.clone_into(&mut self.payload.comments);
    }
}
