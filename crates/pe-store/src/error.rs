//! Record store error types.

use std::path::PathBuf;

use pe_core::errors::CoreError;
use thiserror::Error;

/// The dataset could not be loaded. Fatal: no session can start.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file is missing or unreadable.
    #[error("cannot open dataset {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed CSV (bad quoting, invalid UTF-8, I/O mid-read).
    #[error("cannot parse dataset {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Well-formed CSV whose header or rows do not fit the review schema.
    #[error("invalid dataset {}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}

/// The dataset could not be written back. Recoverable: the caller may retry.
///
/// In every case the destination file still holds its previous contents.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The temporary file next to the destination could not be created.
    #[error("cannot stage write in {}: {source}", .dir.display())]
    Stage {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or syncing rows to the temporary file failed.
    #[error("cannot write dataset rows: {source}")]
    Write {
        #[source]
        source: csv::Error,
    },

    /// Flushing, syncing, or copying permissions onto the temporary file failed.
    #[error("cannot sync staged dataset: {0}")]
    Sync(#[from] std::io::Error),

    /// The atomic rename over the destination failed.
    #[error("cannot replace {}: {source}", .path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
