//! Domain models for the run log.
//!
//! This module contains the validators, the [`RunRecord`] entity, pace
//! derivation and the date-ordered [`RunCollection`].

pub mod collection;
pub use collection::{RunCollection, Totals};

mod config;
pub use config::{Config, ConfigError};

/// `year/month/day` run dates and their validation.
pub mod date;
pub use date::{validate_date, DateError, RunDate};

/// `hours:minutes:seconds` run durations and their validation.
pub mod duration;
pub use duration::{validate_time, DurationError, RunDuration};

pub mod pace;
pub use pace::{calculate_pace, compare_pace, Pace, PaceError, PaceRounding};

pub mod parser;
pub use parser::{LineError, RunRecordParser, ValidationError};

mod run;
pub use run::RunRecord;
