//! Pace derivation and comparison.
//!
//! A [`Pace`] is the time taken to cover one distance unit, written `m:ss`.
//! Paces order by speed: a *smaller* pace is a *faster* run, so sorting in
//! ascending order puts the fastest pace first.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Serialize, Serializer};

use super::RunDuration;

/// Minutes and seconds per distance unit.
///
/// The seconds component is normally in `0..=59`, but [`calculate_pace`]
/// can produce `60` when the fractional minute rounds up (see
/// [`PaceRounding`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pace {
    minutes: u64,
    seconds: u64,
}

impl Pace {
    /// Creates a pace from its components.
    #[must_use]
    pub const fn new(minutes: u64, seconds: u64) -> Self {
        Self { minutes, seconds }
    }

    /// Returns the whole-minute component.
    #[must_use]
    pub const fn minutes(&self) -> u64 {
        self.minutes
    }

    /// Returns the seconds component.
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }
}

impl Ord for Pace {
    /// Faster (smaller) paces compare as [`Ordering::Less`].
    fn cmp(&self, other: &Self) -> Ordering {
        self.minutes
            .cmp(&other.minutes)
            .then(self.seconds.cmp(&other.seconds))
    }
}

impl PartialOrd for Pace {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

impl Serialize for Pace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Error returned when a string is not a `minutes:seconds` pace.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid pace '{0}': expected 'minutes:seconds'")]
pub struct PaceError(String);

impl FromStr for Pace {
    type Err = PaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || PaceError(s.to_string());
        let (minutes, seconds) = s.trim().split_once(':').ok_or_else(error)?;
        let minutes = minutes.trim().parse().map_err(|_| error())?;
        let seconds = seconds.trim().parse().map_err(|_| error())?;
        Ok(Self { minutes, seconds })
    }
}

/// How a seconds component that rounds up to a full minute is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaceRounding {
    /// Keep `60` in the seconds field, e.g. `7:60`.
    ///
    /// This is the historical behaviour of the log and remains the default.
    #[default]
    Uncarried,

    /// Carry `60` seconds into the minute, e.g. `8:00`.
    Carry,
}

/// Derives the pace for a run of `distance` units taking `duration`.
///
/// The whole-minute part is truncated toward zero; the remaining fraction of
/// a minute is converted to seconds and rounded to the nearest second. A
/// rounded value of `60` is kept as-is (see [`PaceRounding::Uncarried`]).
///
/// `distance` must be positive; callers validate this before construction.
#[must_use]
pub fn calculate_pace(distance: f64, duration: &RunDuration) -> Pace {
    calculate_pace_with(distance, duration, PaceRounding::Uncarried)
}

/// Whether a run of `distance` units taking `duration` has a pace that a
/// [`Pace`] can hold.
///
/// A distance so small that the pace overflows to infinity, or past
/// `u64::MAX` minutes, has no meaningful pace.
#[must_use]
pub fn has_representable_pace(distance: f64, duration: &RunDuration) -> bool {
    let pace = duration.total_minutes() / distance;
    pace.is_finite() && pace >= 0.0 && pace < 2f64.powi(64)
}

/// Derives the pace for a run, choosing how to treat a rounded-up minute.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn calculate_pace_with(distance: f64, duration: &RunDuration, rounding: PaceRounding) -> Pace {
    let pace = duration.total_minutes() / distance;
    let whole = pace.trunc();
    let seconds = ((pace - whole) * 60.0).round();

    let minutes = whole as u64;
    let seconds = seconds as u64;

    match rounding {
        PaceRounding::Carry if seconds >= 60 => Pace::new(minutes + 1, seconds - 60),
        _ => Pace::new(minutes, seconds),
    }
}

/// Compares two `m:ss` paces by speed.
///
/// Returns [`Ordering::Less`] when `a` is faster than `b`, so sorting with
/// this comparator lists the fastest pace first.
///
/// # Errors
///
/// Returns [`PaceError`] if either argument is not a `minutes:seconds` pace.
pub fn compare_pace(a: &str, b: &str) -> Result<Ordering, PaceError> {
    let a: Pace = a.parse()?;
    let b: Pace = b.parse()?;
    Ok(a.cmp(&b))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn duration(s: &str) -> RunDuration {
        s.parse().unwrap()
    }

    #[test_case(10.0, "1:40:00", "10:00"; "ten units in one forty")]
    #[test_case(3.0, "0:21:00", "7:00"; "three units in twenty one")]
    #[test_case(5.0, "0:40:00", "8:00"; "five units in forty")]
    #[test_case(4.0, "0:30:30", "7:38"; "rounds half second up")]
    #[test_case(3.0, "0:25:00", "8:20"; "repeating fraction")]
    #[test_case(26.2, "3:30:00", "8:01"; "marathon")]
    #[test_case(0.5, "0:04:00", "8:00"; "fractional distance")]
    fn derives_pace(distance: f64, time: &str, expected: &str) {
        assert_eq!(calculate_pace(distance, &duration(time)).to_string(), expected);
    }

    #[test]
    fn seconds_are_zero_padded() {
        let pace = calculate_pace(1.0, &duration("0:07:06"));
        assert_eq!(pace.to_string(), "7:06");
    }

    #[test]
    fn rounding_to_sixty_is_not_carried_by_default() {
        // 23:59 over 3 units is 7.9944 min/unit; 0.9944 min rounds to 60 s
        let pace = calculate_pace(3.0, &duration("0:23:59"));
        assert_eq!(pace, Pace::new(7, 60));
        assert_eq!(pace.to_string(), "7:60");
    }

    #[test]
    fn rounding_to_sixty_carries_when_requested() {
        let pace = calculate_pace_with(3.0, &duration("0:23:59"), PaceRounding::Carry);
        assert_eq!(pace.to_string(), "8:00");
    }

    #[test_case(1e-320, "0:00:01", false; "subnormal distance")]
    #[test_case(1e-300, "1000:00:00", false; "pace beyond u64 minutes")]
    #[test_case(1e-6, "0:10:00", true; "tiny but finite")]
    #[test_case(5.0, "0:40:00", true; "ordinary run")]
    fn detects_unrepresentable_paces(distance: f64, time: &str, expected: bool) {
        assert_eq!(has_representable_pace(distance, &duration(time)), expected);
    }

    #[test]
    fn faster_pace_sorts_first() {
        assert_eq!(compare_pace("7:00", "8:00"), Ok(Ordering::Less));
        assert_eq!(compare_pace("8:00", "7:59"), Ok(Ordering::Greater));
        assert_eq!(compare_pace("7:05", "7:30"), Ok(Ordering::Less));
        assert_eq!(compare_pace("7:30", "7:30"), Ok(Ordering::Equal));

        let mut paces: Vec<Pace> = ["9:15", "7:00", "8:30"]
            .iter()
            .map(|p| p.parse().unwrap())
            .collect();
        paces.sort();
        let sorted: Vec<String> = paces.iter().map(ToString::to_string).collect();
        assert_eq!(sorted, ["7:00", "8:30", "9:15"]);
    }

    #[test]
    fn compare_rejects_malformed_paces() {
        assert!(compare_pace("seven", "8:00").is_err());
        assert!(compare_pace("7:00", "800").is_err());
    }
}
