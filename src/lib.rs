//! Plain-text Running Log
//!
//! Runs are entered by hand or imported from delimited text files, validated,
//! given a derived pace and kept in date order.

pub mod domain;
pub use domain::{
    Config, Pace, RunCollection, RunDate, RunDuration, RunRecord, RunRecordParser,
    ValidationError,
};

/// Reading runs from CSV and plain-text files.
pub mod storage;
pub use storage::{ContentType, ImportError};
