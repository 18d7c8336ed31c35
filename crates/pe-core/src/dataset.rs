use crate::errors::CoreError;
use crate::record::Record;
use crate::schema::ColumnLayout;

/// An ordered, position-addressable set of records sharing one header.
///
/// Length is fixed once built: the review engine never inserts or removes
/// records, it only rewrites manual review fields in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    layout: ColumnLayout,
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset from a header row and data rows.
    ///
    /// Every row must have exactly one cell per header column. Manual review
    /// columns missing from the header are appended and padded with blanks.
    /// Fails on the first malformed row; rows are never silently dropped.
    pub fn from_rows<I>(mut headers: Vec<String>, rows: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let declared = headers.len();
        let (layout, appended) = ColumnLayout::resolve(&mut headers)?;

        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, mut cells)| {
                let row = index + 1;
                if cells.len() != declared {
                    return Err(CoreError::FieldCount {
                        row,
                        expected: declared,
                        found: cells.len(),
                    });
                }
                cells.resize(declared + appended, String::new());
                Record::from_cells(&layout, cells, row)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            headers,
            layout,
            records,
        })
    }

    /// Column names in file order, including any appended manual columns.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub const fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    /// Mutable access for the commit pipeline.
    pub fn get_mut(&mut self, position: usize) -> Option<&mut Record> {
        self.records.get_mut(position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Data rows as they should be written back, in record order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.records.iter().map(|record| record.to_cells(&self.layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::PeStatus;
    use crate::schema::*;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn pads_rows_when_manual_columns_are_appended() {
        let dataset = Dataset::from_rows(
            strings(&[REPORT_NUMBER, REPORT_DESCRIPTION, REPORT_TEXT, "Site"]),
            vec![strings(&["1", "CTA", "text", "north"])],
        )
        .unwrap();

        assert_eq!(dataset.headers().len(), 4 + MANUAL_COLUMNS.len());
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].review.pe_status, PeStatus::Unreviewed);

        let row = dataset.rows().next().unwrap();
        assert_eq!(row.len(), dataset.headers().len());
        assert_eq!(row[3], "north");
        assert!(row[4..].iter().all(String::is_empty));
    }

    #[test]
    fn short_row_fails_whole_build() {
        let err = Dataset::from_rows(
            strings(&[REPORT_NUMBER, REPORT_DESCRIPTION, REPORT_TEXT]),
            vec![strings(&["1", "a", "b"]), strings(&["2", "c"])],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::FieldCount {
                row: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn empty_dataset_is_valid() {
        let dataset = Dataset::from_rows(
            strings(&[REPORT_NUMBER, REPORT_DESCRIPTION, REPORT_TEXT]),
            Vec::new(),
        )
        .unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.get(0).is_none());
    }
}
