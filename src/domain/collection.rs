//! An in-memory, date-ordered set of runs.
//!
//! The [`RunCollection`] knows nothing about files or terminals. It owns every
//! [`RunRecord`] it holds and keeps them ordered by date, most recent first.

use tracing::instrument;

use super::{
    pace::{calculate_pace_with, has_representable_pace, PaceRounding},
    Pace, RunDuration, RunRecord,
};

/// Runs ordered by date, most recent first.
///
/// Runs on the same date keep the order in which they were inserted.
/// Duplicates are kept: inserting the same run twice stores two records.
#[derive(Debug, Default, Clone)]
pub struct RunCollection {
    runs: Vec<RunRecord>,
}

impl RunCollection {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Creates an empty collection with room for `capacity` runs.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            runs: Vec::with_capacity(capacity),
        }
    }

    /// Adds a run and restores date order.
    #[instrument(level = "trace", skip_all, fields(date = %record.date()))]
    pub fn insert(&mut self, record: RunRecord) {
        self.runs.push(record);
        // stable, so equal dates stay in insertion order
        self.runs.sort_by(|a, b| b.date().cmp(&a.date()));
    }

    /// All runs, most recent first.
    #[must_use]
    pub fn all_sorted(&self) -> &[RunRecord] {
        &self.runs
    }

    /// Up to `n` of the most recent runs, most recent first.
    #[must_use]
    pub fn most_recent(&self, n: usize) -> &[RunRecord] {
        &self.runs[..n.min(self.runs.len())]
    }

    /// All runs, fastest pace first.
    ///
    /// Runs with equal paces keep their date order.
    #[must_use]
    pub fn sorted_by_pace(&self) -> Vec<&RunRecord> {
        let mut runs: Vec<&RunRecord> = self.runs.iter().collect();
        runs.sort_by_key(|run| run.pace());
        runs
    }

    /// Iterates over the runs, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &RunRecord> {
        self.runs.iter()
    }

    /// The number of runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether the collection holds no runs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Summarises the collection.
    #[must_use]
    pub fn totals(&self, rounding: PaceRounding) -> Totals {
        Totals::from_runs(&self.runs, rounding)
    }
}

impl<'a> IntoIterator for &'a RunCollection {
    type Item = &'a RunRecord;
    type IntoIter = std::slice::Iter<'a, RunRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

impl Extend<RunRecord> for RunCollection {
    fn extend<T: IntoIterator<Item = RunRecord>>(&mut self, iter: T) {
        self.runs.extend(iter);
        self.runs.sort_by(|a, b| b.date().cmp(&a.date()));
    }
}

/// Aggregate figures for a set of runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    /// Number of runs.
    pub runs: usize,
    /// Sum of all distances.
    pub distance: f64,
    /// Sum of all durations, saturating at `u64::MAX` seconds.
    pub duration: RunDuration,
    /// Pace over the combined distance and time, if any distance was run.
    pub average_pace: Option<Pace>,
}

impl Totals {
    /// Summarises `runs`, which need not be a whole collection.
    #[must_use]
    pub fn from_runs<'a>(
        runs: impl IntoIterator<Item = &'a RunRecord>,
        rounding: PaceRounding,
    ) -> Self {
        let (count, distance, seconds) = runs.into_iter().fold(
            (0, 0.0, 0u64),
            |(count, distance, seconds), run| {
                (
                    count + 1,
                    distance + run.distance(),
                    seconds.saturating_add(run.duration().total_seconds()),
                )
            },
        );

        let duration = RunDuration::from_seconds(seconds);
        let average_pace = (distance > 0.0 && has_representable_pace(distance, &duration))
            .then(|| calculate_pace_with(distance, &duration, rounding));

        Self {
            runs: count,
            distance,
            duration,
            average_pace,
        }
    }
}
