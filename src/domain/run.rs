use serde::Serialize;

use super::{
    pace::{calculate_pace_with, PaceRounding},
    Pace, RunDate, RunDuration,
};

/// One logged run.
///
/// A `RunRecord` can only be built from validated parts (see
/// [`crate::domain::parser`]), and its pace is derived once at construction.
/// There are no setters, so the pace always agrees with the distance and
/// duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    distance: f64,
    #[serde(rename = "time", serialize_with = "serialize_display")]
    duration: RunDuration,
    date: RunDate,
    pace: Pace,
}

impl RunRecord {
    pub(crate) fn new(
        distance: f64,
        duration: RunDuration,
        date: RunDate,
        rounding: PaceRounding,
    ) -> Self {
        debug_assert!(distance > 0.0, "distance must be validated before construction");
        let pace = calculate_pace_with(distance, &duration, rounding);
        Self {
            distance,
            duration,
            date,
            pace,
        }
    }

    /// Distance covered, in the log's distance unit.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Elapsed time.
    #[must_use]
    pub const fn duration(&self) -> &RunDuration {
        &self.duration
    }

    /// The day the run took place.
    #[must_use]
    pub const fn date(&self) -> RunDate {
        self.date
    }

    /// Minutes per distance unit.
    #[must_use]
    pub const fn pace(&self) -> Pace {
        self.pace
    }
}

fn serialize_display<S: serde::Serializer>(
    value: &RunDuration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
