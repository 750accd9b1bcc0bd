//! Core types, errors, and utilities for watchstat
//!
//! This crate provides the record shapes that flow through the viewing
//! activity pipeline, the `WatchTime` elapsed-time type, the aggregated
//! series types, the error taxonomy, and timezone configuration.

pub mod aggregation_types;
pub mod error;
pub mod timezone;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, WatchstatError};
pub use types::{BucketedRecord, CleanedRecord, FilteredRecord, ViewingRecord, WatchTime};
