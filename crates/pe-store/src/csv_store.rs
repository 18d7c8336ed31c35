use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use pe_core::Dataset;

use crate::error::{LoadError, PersistError};

/// File-backed record store for one CSV dataset.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole dataset into memory.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file cannot be opened, is not valid CSV, or
    /// any row does not fit the review schema. No row is skipped: one bad row
    /// fails the whole load.
    pub fn load(&self) -> Result<Dataset, LoadError> {
        let started = Instant::now();
        let file = File::open(&self.path).map_err(|source| LoadError::Open {
            path: self.path.clone(),
            source,
        })?;

        let csv_error = |source| LoadError::Csv {
            path: self.path.clone(),
            source,
        };

        // Row lengths are checked by `Dataset::from_rows`, which names the row.
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .enumerate()
            .map(|(index, name)| {
                if index == 0 {
                    name.trim_start_matches('\u{feff}').to_string()
                } else {
                    name.to_string()
                }
            })
            .collect::<Vec<_>>();

        let rows = reader
            .records()
            .map(|record| {
                record
                    .map(|record| record.iter().map(str::to_string).collect::<Vec<_>>())
                    .map_err(csv_error)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let dataset = Dataset::from_rows(headers, rows).map_err(|source| LoadError::Schema {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(
            path = %self.path.display(),
            records = dataset.len(),
            reviewed = dataset.records().iter().filter(|r| r.is_reviewed()).count(),
            elapsed_ms = started.elapsed().as_millis(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Rewrite the destination with the dataset's current state.
    ///
    /// Column order and every non-review cell are written as loaded. The
    /// destination keeps its file permissions.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` on any I/O failure. The destination is left
    /// untouched and the staged temporary file is removed.
    pub fn persist(&self, dataset: &Dataset) -> Result<(), PersistError> {
        let started = Instant::now();
        let dir = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut staged = tempfile::Builder::new()
            .prefix(".pereview-")
            .suffix(".csv.tmp")
            .tempfile_in(dir)
            .map_err(|source| PersistError::Stage {
                dir: dir.to_path_buf(),
                source,
            })?;

        {
            let mut writer = csv::WriterBuilder::new().from_writer(staged.as_file_mut());
            writer
                .write_record(dataset.headers())
                .map_err(|source| PersistError::Write { source })?;
            for row in dataset.rows() {
                writer
                    .write_record(&row)
                    .map_err(|source| PersistError::Write { source })?;
            }
            writer.flush()?;
        }

        if let Ok(metadata) = fs::metadata(&self.path) {
            staged.as_file().set_permissions(metadata.permissions())?;
        }
        staged.as_file().sync_all()?;

        staged
            .persist(&self.path)
            .map_err(|error| PersistError::Replace {
                path: self.path.clone(),
                source: error.error,
            })?;

        tracing::debug!(
            path = %self.path.display(),
            records = dataset.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "persisted dataset"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "Report_Number,Report_Description,Report_Text,Manual_PE_Present,Manual_PE_Location,Manual_PE_Acuity,Manual_PE_Laterality,Manual_PE_Clot_Burden,Reviewer_Confidence,Comments\n";

    #[test]
    fn missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvStore::new(dir.path().join("absent.csv")).load().unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }

    #[test]
    fn bom_is_stripped_from_first_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bom.csv");
        fs::write(&path, format!("\u{feff}{HEADER}1,d,t,,,,,,,\n")).unwrap();

        let dataset = CsvStore::new(&path).load().unwrap();
        assert_eq!(dataset.headers()[0], "Report_Number");
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, HEADER).unwrap();

        let dataset = CsvStore::new(&path).load().unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn ragged_row_fails_with_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        fs::write(&path, format!("{HEADER}1,d,t,,,,,,,\n2,d\n")).unwrap();

        let err = CsvStore::new(&path).load().unwrap_err();
        assert!(matches!(err, LoadError::Schema { .. }), "{err}");
        assert!(err.to_string().contains("Row 2"), "{err}");
    }

    #[test]
    fn persist_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, format!("{HEADER}1,d,t,,,,,,,\n")).unwrap();

        let store = CsvStore::new(&path);
        let dataset = store.load().unwrap();
        store.persist(&dataset).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["data.csv".to_string()]);
    }

    #[test]
    fn persist_into_missing_directory_is_stage_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("data.csv");
        fs::write(&source, format!("{HEADER}1,d,t,,,,,,,\n")).unwrap();
        let dataset = CsvStore::new(&source).load().unwrap();

        let target = CsvStore::new(dir.path().join("gone").join("data.csv"));
        let err = target.persist(&dataset).unwrap_err();
        assert!(matches!(err, PersistError::Stage { .. }), "{err}");
        assert!(!target.path().exists());
    }
}
