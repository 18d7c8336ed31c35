//! How the reviewer's label compares with the automated models.
//!
//! Only the LLM and SVM binary labels take part; the regex label is shown to
//! the reviewer but not scored.

use std::fmt;

use pe_core::Record;
use pe_core::enums::PeFinding;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSource {
    Llm,
    Svm,
}

impl ModelSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Llm => "LLM",
            Self::Svm => "SVM",
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "verdict", content = "agrees")]
pub enum AgreementVerdict {
    FullAgreement,
    /// Exactly one model matches the reviewer.
    PartialAgreement(ModelSource),
    Disagreement,
}

impl fmt::Display for AgreementVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullAgreement => f.write_str("All AI models agree"),
            Self::PartialAgreement(source) => write!(f, "Only {source} agrees"),
            Self::Disagreement => f.write_str("AI models disagree"),
        }
    }
}

/// Classify a reviewed record. `None` until the record has a manual label.
///
/// A missing or non-binary reference label never matches.
#[must_use]
pub fn agreement(record: &Record) -> Option<AgreementVerdict> {
    let manual = record.review.pe_status.finding()?;
    let matches = |label: Option<PeFinding>| label == Some(manual);

    let verdict = match (
        matches(record.reference.llm_label),
        matches(record.reference.svm_label),
    ) {
        (true, true) => AgreementVerdict::FullAgreement,
        (true, false) => AgreementVerdict::PartialAgreement(ModelSource::Llm),
        (false, true) => AgreementVerdict::PartialAgreement(ModelSource::Svm),
        (false, false) => AgreementVerdict::Disagreement,
    };
    Some(verdict)
}
