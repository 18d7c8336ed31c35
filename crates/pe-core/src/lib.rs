//! # pe-core
//!
//! Core types and rules for the pereview PE report review tool.
//!
//! This crate provides the foundational types shared across all pereview crates:
//! - The `Record` and `Dataset` model with raw-cell preservation
//! - Review vocabularies (PE status, confidence, location, acuity, ...)
//! - Column layout for the CSV schema
//! - The review payload and the validation rules that gate a commit
//! - Cross-cutting error types

pub mod dataset;
pub mod enums;
pub mod errors;
pub mod payload;
pub mod record;
pub mod schema;
pub mod validation;

pub use dataset::Dataset;
pub use payload::ReviewPayload;
pub use record::{ManualReview, Record, ReferencePredictions};
pub use validation::{ReviewField, Violation, validate};
