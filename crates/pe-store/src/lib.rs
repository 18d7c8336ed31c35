//! # pe-store
//!
//! Loads the review dataset from CSV and writes it back.
//!
//! The whole file is read once per session. Every persist rewrites the whole
//! file: rows are staged in a temporary file in the destination directory,
//! synced, then renamed over the destination, so a reader sees either the
//! old dataset or the new one and never a partial write.

pub mod error;
mod csv_store;

pub use csv_store::CsvStore;
pub use error::{LoadError, PersistError};
