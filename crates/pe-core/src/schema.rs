//! Column names of the review dataset and their resolved positions.
//!
//! The header row decides column order. Identity columns are required;
//! reference prediction columns are optional (a missing column reads as a
//! missing value); manual review columns are appended when absent so every
//! persisted file carries the full review schema.

use crate::errors::CoreError;

pub const REPORT_NUMBER: &str = "Report_Number";
pub const REPORT_DESCRIPTION: &str = "Report_Description";
pub const REPORT_TEXT: &str = "Report_Text";

pub const SVM_PE_PREDICTION: &str = "SVM_PE_Prediction";
pub const SVM_PROBABILITY: &str = "SVM_Probability";
pub const LLM_PE_BINARY: &str = "LLM_PE_Binary";
pub const LLM_CONFIDENCE: &str = "LLM_Confidence";
pub const REGEX_PE_PREDICTION: &str = "Regex_PE_Prediction";
pub const PE_LOCATION: &str = "PE_Location";
pub const PE_ACUITY: &str = "PE_Acuity";
pub const PE_LATERALITY: &str = "PE_Laterality";
pub const PE_CLOT_BURDEN: &str = "PE_Clot_Burden";

pub const MANUAL_PE_PRESENT: &str = "Manual_PE_Present";
pub const MANUAL_PE_LOCATION: &str = "Manual_PE_Location";
pub const MANUAL_PE_ACUITY: &str = "Manual_PE_Acuity";
pub const MANUAL_PE_LATERALITY: &str = "Manual_PE_Laterality";
pub const MANUAL_PE_CLOT_BURDEN: &str = "Manual_PE_Clot_Burden";
pub const REVIEWER_CONFIDENCE: &str = "Reviewer_Confidence";
pub const COMMENTS: &str = "Comments";

/// Columns every dataset must carry, in the order they are checked.
pub const IDENTITY_COLUMNS: [&str; 3] = [REPORT_NUMBER, REPORT_DESCRIPTION, REPORT_TEXT];

/// Manual review columns in canonical order.
pub const MANUAL_COLUMNS: [&str; 7] = [
    MANUAL_PE_PRESENT,
    MANUAL_PE_LOCATION,
    MANUAL_PE_ACUITY,
    MANUAL_PE_LATERALITY,
    MANUAL_PE_CLOT_BURDEN,
    REVIEWER_CONFIDENCE,
    COMMENTS,
];

/// Positions of reference prediction columns; `None` when the column is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceColumns {
    pub svm_label: Option<usize>,
    pub svm_probability: Option<usize>,
    pub llm_label: Option<usize>,
    pub llm_confidence: Option<usize>,
    pub regex_label: Option<usize>,
    pub location: Option<usize>,
    pub acuity: Option<usize>,
    pub laterality: Option<usize>,
    pub clot_burden: Option<usize>,
}

/// Positions of the manual review columns. Always present after layout resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualColumns {
    pub pe_present: usize,
    pub location: usize,
    pub acuity: usize,
    pub laterality: usize,
    pub clot_burden: usize,
    pub confidence: usize,
    pub comments: usize,
}

/// Resolved positions of every column the review engine reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub report_number: usize,
    pub description: usize,
    pub report_text: usize,
    pub reference: ReferenceColumns,
    pub manual: ManualColumns,
}

impl ColumnLayout {
    /// Resolve positions from a header row.
    ///
    /// Missing manual columns are appended to `headers` in canonical order;
    /// the caller must pad existing rows with one blank cell per appended
    /// column. Returns the layout and the number of columns appended.
    pub fn resolve(headers: &mut Vec<String>) -> Result<(Self, usize), CoreError> {
        for (index, header) in headers.iter().enumerate() {
            if headers[..index].contains(header) {
                return Err(CoreError::DuplicateColumn(header.clone()));
            }
        }

        let find = |headers: &[String], name: &str| headers.iter().position(|h| h == name);

        let required = |headers: &[String], name: &str| {
            find(headers, name).ok_or_else(|| CoreError::MissingColumn(name.to_string()))
        };

        let [report_number, description, report_text] =
            IDENTITY_COLUMNS.map(|name| required(headers.as_slice(), name));
        let (report_number, description, report_text) = (report_number?, description?, report_text?);

        let reference = ReferenceColumns {
            svm_label: find(headers.as_slice(), SVM_PE_PREDICTION),
            svm_probability: find(headers.as_slice(), SVM_PROBABILITY),
            llm_label: find(headers.as_slice(), LLM_PE_BINARY),
            llm_confidence: find(headers.as_slice(), LLM_CONFIDENCE),
            regex_label: find(headers.as_slice(), REGEX_PE_PREDICTION),
            location: find(headers.as_slice(), PE_LOCATION),
            acuity: find(headers.as_slice(), PE_ACUITY),
            laterality: find(headers.as_slice(), PE_LATERALITY),
            clot_burden: find(headers.as_slice(), PE_CLOT_BURDEN),
        };

        let mut appended = 0;
        for name in MANUAL_COLUMNS {
            if find(headers.as_slice(), name).is_none() {
                headers.push(name.to_string());
                appended += 1;
            }
        }

        // Every manual column exists now; positions cannot fail.
        let position = |name: &str| find(headers.as_slice(), name).unwrap_or_default();
        let manual = ManualColumns {
            pe_present: position(MANUAL_PE_PRESENT),
            location: position(MANUAL_PE_LOCATION),
            acuity: position(MANUAL_PE_ACUITY),
            laterality: position(MANUAL_PE_LATERALITY),
            clot_burden: position(MANUAL_PE_CLOT_BURDEN),
            confidence: position(REVIEWER_CONFIDENCE),
            comments: position(COMMENTS),
        };

        Ok((
            Self {
                report_number,
                description,
                report_text,
                reference,
                manual,
            },
            appended,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn resolves_full_schema_in_file_order() {
        let mut names = headers(&[
            COMMENTS,
            REPORT_NUMBER,
            REPORT_DESCRIPTION,
            REPORT_TEXT,
            MANUAL_PE_PRESENT,
            MANUAL_PE_LOCATION,
            MANUAL_PE_ACUITY,
            MANUAL_PE_LATERALITY,
            MANUAL_PE_CLOT_BURDEN,
            REVIEWER_CONFIDENCE,
        ]);
        let (layout, appended) = ColumnLayout::resolve(&mut names).unwrap();
        assert_eq!(appended, 0);
        assert_eq!(layout.manual.comments, 0);
        assert_eq!(layout.report_number, 1);
        assert_eq!(layout.manual.confidence, 9);
        assert_eq!(layout.reference, ReferenceColumns::default());
    }

    #[test]
    fn appends_missing_manual_columns() {
        let mut names = headers(&[REPORT_NUMBER, REPORT_DESCRIPTION, REPORT_TEXT, COMMENTS]);
        let (layout, appended) = ColumnLayout::resolve(&mut names).unwrap();
        assert_eq!(appended, 6);
        assert_eq!(names.len(), 10);
        assert_eq!(layout.manual.comments, 3);
        assert_eq!(layout.manual.pe_present, 4);
        assert_eq!(names[9], REVIEWER_CONFIDENCE);
    }

    #[test]
    fn missing_identity_column_is_an_error() {
        let mut names = headers(&[REPORT_NUMBER, REPORT_TEXT]);
        let err = ColumnLayout::resolve(&mut names).unwrap_err();
        assert!(matches!(err, CoreError::MissingColumn(ref c) if c == REPORT_DESCRIPTION));
    }

    #[test]
    fn duplicate_column_is_an_error() {
        let mut names = headers(&[REPORT_NUMBER, REPORT_DESCRIPTION, REPORT_TEXT, REPORT_TEXT]);
        let err = ColumnLayout::resolve(&mut names).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateColumn(ref c) if c == REPORT_TEXT));
    }
}
