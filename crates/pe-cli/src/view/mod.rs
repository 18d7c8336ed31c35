//! Read-only presentation of a record for the terminal.
//!
//! [`RecordView`] is what `show`, `next` and the interactive session print:
//! serialized as-is for JSON output, rendered as a text card otherwise.

mod highlight;
mod reflow;

use std::fmt::Write as _;

use pe_config::DisplayConfig;
use pe_core::{ManualReview, Record, ReferencePredictions, ReviewPayload};
use pe_session::{AgreementVerdict, ReviewSession, ReviewStats};
use serde::Serialize;

pub use highlight::Highlighter;
pub use reflow::reflow;

const NOT_AVAILABLE: &str = "N/A";

/// One record as shown to the reviewer.
#[derive(Debug, Serialize)]
pub struct RecordView<'a> {
    /// 1-based position in the dataset.
    pub report: usize,
    pub total: usize,
    pub record_number: &'a str,
    pub description: &'a str,
    pub report_text: &'a str,
    pub reference: &'a ReferencePredictions,
    pub review: &'a ManualReview,
    pub agreement: Option<AgreementVerdict>,
    pub progress: ReviewStats,
}

impl<'a> RecordView<'a> {
    /// View of the session's current record, `None` for an empty dataset.
    #[must_use]
    pub fn current(session: &'a ReviewSession) -> Option<Self> {
        let position = session.position()?;
        let record = session.current()?;
        Some(Self::new(record, position, session))
    }

    fn new(record: &'a Record, position: usize, session: &'a ReviewSession) -> Self {
        Self {
            report: position + 1,
            total: session.dataset().len(),
            record_number: &record.record_number,
            description: &record.description,
            report_text: &record.report_text,
            reference: &record.reference,
            review: &record.review,
            agreement: session.agreement(),
            progress: session.stats(),
        }
    }
}

/// Text rendering settings derived from configuration and terminal support.
#[derive(Debug, Clone)]
pub struct CardStyle {
    pub reflow: bool,
    pub highlighter: Highlighter,
}

impl CardStyle {
    /// # Errors
    ///
    /// Fails if the configured keywords cannot be compiled into a pattern.
    pub fn from_config(display: &DisplayConfig, color: bool) -> anyhow::Result<Self> {
        let highlighter = if display.highlight && color {
            Highlighter::new(display.keywords.as_slice())?
        } else {
            Highlighter::disabled()
        };
        Ok(Self {
            reflow: display.reflow,
            highlighter,
        })
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reflow: false,
            highlighter: Highlighter::disabled(),
        }
    }
}

/// Render the full review card for a record.
#[must_use]
pub fn render_card(view: &RecordView<'_>, style: &CardStyle) -> String {
    let mut out = String::new();
    let text = if style.reflow {
        reflow(view.report_text)
    } else {
        view.report_text.to_string()
    };

    let _ = writeln!(out, "Report {} of {}", view.report, view.total);
    let _ = writeln!(out, "Report #{}: {}", view.record_number, view.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", style.highlighter.apply(&text));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", reference_summary(view.reference));
    let _ = writeln!(out, "{}", reference_characterization(view.reference));
    let _ = writeln!(out);
    out.push_str(&review_summary(&ReviewPayload::from_review(view.review), "Review"));
    if let Some(verdict) = view.agreement {
        let _ = writeln!(out, "Agreement: {verdict}");
    }
    let _ = write!(out, "{}", view.progress);
    out
}

/// `SVM: 1 (0.91) | LLM: 1 (high) | Regex: 0`
#[must_use]
pub fn reference_summary(reference: &ReferencePredictions) -> String {
    let label = |value: Option<pe_core::enums::PeFinding>| {
        value.map_or(NOT_AVAILABLE, pe_core::enums::PeFinding::as_str)
    };
    let probability = reference
        .svm_probability
        .map_or_else(|| NOT_AVAILABLE.to_string(), |p| format!("{p:.2}"));

    format!(
        "SVM: {} ({probability}) | LLM: {} ({}) | Regex: {}",
        label(reference.svm_label),
        label(reference.llm_label),
        or_na(&reference.llm_confidence),
        label(reference.regex_label),
    )
}

#[must_use]
pub fn reference_characterization(reference: &ReferencePredictions) -> String {
    format!(
        "LLM Location: {} | Acuity: {} | Laterality: {} | Burden: {}",
        or_na(&reference.location),
        or_na(&reference.acuity),
        or_na(&reference.laterality),
        or_na(&reference.clot_burden),
    )
}

/// Multi-line summary of a review form, stored or in progress.
#[must_use]
pub fn review_summary(payload: &ReviewPayload, title: &str) -> String {
    let mut out = String::new();
    let Some(pe) = payload.pe_present else {
        let _ = writeln!(out, "{title}: not reviewed");
        if let Some(confidence) = payload.confidence {
            let _ = writeln!(out, "  Confidence: {confidence}");
        }
        if !payload.comments.is_empty() {
            let _ = writeln!(out, "  Comments: {}", payload.comments);
        }
        return out;
    };

    let _ = writeln!(
        out,
        "{title}: PE Present {pe} | Confidence: {}",
        payload
            .confidence
            .map_or(NOT_AVAILABLE, pe_core::enums::Confidence::as_str)
    );
    if pe == pe_core::enums::PeFinding::Present {
        let _ = writeln!(
            out,
            "  Location: {} | Acuity: {} | Laterality: {} | Burden: {}",
            payload.location.map_or(NOT_AVAILABLE, |v| v.as_str()),
            payload.acuity.map_or(NOT_AVAILABLE, |v| v.as_str()),
            payload.laterality.map_or(NOT_AVAILABLE, |v| v.as_str()),
            payload.clot_burden.map_or(NOT_AVAILABLE, |v| v.as_str()),
        );
    }
    if !payload.comments.is_empty() {
        let _ = writeln!(out, "  Comments: {}", payload.comments);
    }
    out
}

fn or_na(value: &str) -> &str {
    if value.is_empty() { NOT_AVAILABLE } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pe_core::enums::{Acuity, ClotBurden, Confidence, Laterality, Location, PeFinding};
    use pretty_assertions::assert_eq;

    #[test]
    fn reference_lines_show_missing_values() {
        let reference = ReferencePredictions {
            svm_label: Some(PeFinding::Present),
            svm_probability: Some(0.9134),
            llm_label: None,
            llm_confidence: "high".to_string(),
            regex_label: Some(PeFinding::Absent),
            location: "Segmental".to_string(),
            ..ReferencePredictions::default()
        };
        assert_eq!(
            reference_summary(&reference),
            "SVM: 1 (0.91) | LLM: N/A (high) | Regex: 0"
        );
        assert_eq!(
            reference_characterization(&reference),
            "LLM Location: Segmental | Acuity: N/A | Laterality: N/A | Burden: N/A"
        );
    }

    #[test]
    fn positive_review_lists_characterization() {
        let payload = ReviewPayload {
            pe_present: Some(PeFinding::Present),
            location: Some(Location::Central),
            acuity: Some(Acuity::AcuteOnChronic),
            laterality: Some(Laterality::Bilateral),
            clot_burden: Some(ClotBurden::High),
            confidence: Some(Confidence::Medium),
            comments: "saddle".to_string(),
        };
        assert_eq!(
            review_summary(&payload, "Review"),
            "Review: PE Present 1 | Confidence: medium\n  \
             Location: Central | Acuity: Acute-on-chronic | Laterality: Bilateral | Burden: High\n  \
             Comments: saddle\n"
        );
    }

    #[test]
    fn negative_review_omits_characterization() {
        let payload = ReviewPayload {
            pe_present: Some(PeFinding::Absent),
            confidence: Some(Confidence::Low),
            ..ReviewPayload::default()
        };
        assert_eq!(
            review_summary(&payload, "Draft"),
            "Draft: PE Present 0 | Confidence: low\n"
        );
    }

    #[test]
    fn unreviewed_form() {
        assert_eq!(
            review_summary(&ReviewPayload::default(), "Review"),
            "Review: not reviewed\n"
        );
    }
}
