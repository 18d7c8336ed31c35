use serde::Serialize;

use crate::enums::{
    Acuity, ClotBurden, Confidence, Laterality, Location, PeFinding, PeStatus, is_blank,
    parse_optional,
};
use crate::errors::{CoreError, FieldParseError};
use crate::schema::{self, ColumnLayout, ReferenceColumns};

/// Predictions produced by the automated pipeline. Read-only to the review engine.
///
/// Binary labels that are blank or not `0`/`1` are kept as `None` rather than
/// failing the load; agreement treats them as not matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReferencePredictions {
    pub svm_label: Option<PeFinding>,
    pub svm_probability: Option<f64>,
    pub llm_label: Option<PeFinding>,
    pub llm_confidence: String,
    pub regex_label: Option<PeFinding>,
    pub location: String,
    pub acuity: String,
    pub laterality: String,
    pub clot_burden: String,
}

impl ReferencePredictions {
    fn from_cells(columns: &ReferenceColumns, cells: &[String]) -> Self {
        let text = |index: Option<usize>| {
            index
                .and_then(|i| cells.get(i))
                .filter(|cell| !is_blank(cell))
                .cloned()
                .unwrap_or_default()
        };
        let label = |index: Option<usize>| {
            index
                .and_then(|i| cells.get(i))
                .and_then(|cell| PeFinding::from_binary_cell(cell))
        };

        Self {
            svm_label: label(columns.svm_label),
            svm_probability: columns
                .svm_probability
                .and_then(|i| cells.get(i))
                .and_then(|cell| cell.trim().parse::<f64>().ok())
                .filter(|p| p.is_finite()),
            llm_label: label(columns.llm_label),
            llm_confidence: text(columns.llm_confidence),
            regex_label: label(columns.regex_label),
            location: text(columns.location),
            acuity: text(columns.acuity),
            laterality: text(columns.laterality),
            clot_burden: text(columns.clot_burden),
        }
    }
}

/// The reviewer-owned fields of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManualReview {
    pub pe_status: PeStatus,
    pub location: Option<Location>,
    pub acuity: Option<Acuity>,
    pub laterality: Option<Laterality>,
    pub clot_burden: Option<ClotBurden>,
    pub confidence: Option<Confidence>,
    pub comments: String,
}

impl ManualReview {
    fn from_cells(layout: &ColumnLayout, cells: &[String], row: usize) -> Result<Self, CoreError> {
        let cell = |index: usize| cells.get(index).map_or("", String::as_str);
        let invalid = |column: &str| {
            let column = column.to_string();
            move |source: FieldParseError| CoreError::InvalidField {
                row,
                column,
                source,
            }
        };
        let manual = &layout.manual;

        Ok(Self {
            pe_status: PeStatus::from_cell(cell(manual.pe_present))
                .map_err(invalid(schema::MANUAL_PE_PRESENT))?,
            location: parse_optional(cell(manual.location))
                .map_err(invalid(schema::MANUAL_PE_LOCATION))?,
            acuity: parse_optional(cell(manual.acuity))
                .map_err(invalid(schema::MANUAL_PE_ACUITY))?,
            laterality: parse_optional(cell(manual.laterality))
                .map_err(invalid(schema::MANUAL_PE_LATERALITY))?,
            clot_burden: parse_optional(cell(manual.clot_burden))
                .map_err(invalid(schema::MANUAL_PE_CLOT_BURDEN))?,
            confidence: parse_optional(cell(manual.confidence))
                .map_err(invalid(schema::REVIEWER_CONFIDENCE))?,
            // Free text: only an empty cell means no comment.
            comments: cell(manual.comments).to_string(),
        })
    }

    /// Whether any of the four characterization fields is filled.
    #[must_use]
    pub const fn has_characterization(&self) -> bool {
        self.location.is_some()
            || self.acuity.is_some()
            || self.laterality.is_some()
            || self.clot_burden.is_some()
    }

    pub fn clear_characterization(&mut self) {
        self.location = None;
        self.acuity = None;
        self.laterality = None;
        self.clot_burden = None;
    }
}

/// One report and its reference and manual review fields.
///
/// Identity and reference fields never change after load. The raw cells of
/// the source row are retained so columns this crate does not interpret are
/// written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub record_number: String,
    pub description: String,
    pub report_text: String,
    pub reference: ReferencePredictions,
    pub review: ManualReview,
    #[serde(skip)]
    cells: Vec<String>,
}

impl Record {
    /// Build a record from a data row. `row` is the 1-based data row number used in errors.
    pub fn from_cells(layout: &ColumnLayout, cells: Vec<String>, row: usize) -> Result<Self, CoreError> {
        let review = ManualReview::from_cells(layout, &cells, row)?;
        let reference = ReferencePredictions::from_cells(&layout.reference, &cells);
        let take = |index: usize| cells.get(index).cloned().unwrap_or_default();

        Ok(Self {
            record_number: take(layout.report_number),
            description: take(layout.description),
            report_text: take(layout.report_text),
            reference,
            review,
            cells,
        })
    }

    /// Serialize back to a row: raw cells with the manual columns rewritten.
    #[must_use]
    pub fn to_cells(&self, layout: &ColumnLayout) -> Vec<String> {
        let mut cells = self.cells.clone();
        let manual = &layout.manual;
        let review = &self.review;

        let mut put = |index: usize, value: &str| {
            if let Some(cell) = cells.get_mut(index) {
                value.clone_into(cell);
            }
        };

        put(manual.pe_present, review.pe_status.as_cell());
        put(manual.location, review.location.map_or("", Location::as_str));
        put(manual.acuity, review.acuity.map_or("", Acuity::as_str));
        put(manual.laterality, review.laterality.map_or("", Laterality::as_str));
        put(manual.clot_burden, review.clot_burden.map_or("", ClotBurden::as_str));
        put(manual.confidence, review.confidence.map_or("", Confidence::as_str));
        put(manual.comments, &review.comments);

        cells
    }

    #[must_use]
    pub const fn is_reviewed(&self) -> bool {
        self.review.pe_status.is_reviewed()
    }

    /// Raw cells as read from the source row.
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}
