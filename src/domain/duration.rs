use std::{fmt, str::FromStr};

/// The elapsed time of a run, written as `hours:minutes:seconds`.
///
/// Hours are unbounded; minutes and seconds must each lie in `0..=59`.
/// The text the duration was parsed from is retained so that it can be shown
/// back to the user exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDuration {
    hours: u64,
    minutes: u8,
    seconds: u8,
    text: String,
}

impl RunDuration {
    /// Builds a duration from a number of seconds, normalised to `h:mm:ss`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_seconds(seconds: u64) -> Self {
        let hours = seconds / 3600;
        // both remainders are below 60
        let minutes = ((seconds % 3600) / 60) as u8;
        let seconds = (seconds % 60) as u8;

        Self {
            hours,
            minutes,
            seconds,
            text: format!("{hours}:{minutes:02}:{seconds:02}"),
        }
    }

    /// Returns the hour component.
    #[must_use]
    pub const fn hours(&self) -> u64 {
        self.hours
    }

    /// Returns the minute component.
    #[must_use]
    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    /// Returns the second component.
    #[must_use]
    pub const fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Returns the original text of the duration.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the total elapsed time in seconds.
    #[must_use]
    pub const fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(self.minutes as u64 * 60 + self.seconds as u64)
    }

    /// Returns the total elapsed time in (fractional) minutes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_minutes(&self) -> f64 {
        (self.hours as f64).mul_add(
            60.0,
            f64::from(self.minutes) + f64::from(self.seconds) / 60.0,
        )
    }
}

impl fmt::Display for RunDuration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Errors that can occur while parsing a [`RunDuration`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DurationError {
    /// The input was empty or only whitespace.
    #[error("duration is empty")]
    Empty,

    /// The input did not split into exactly three `:`-delimited parts.
    #[error("expected 'hours:minutes:seconds', got {0} part(s)")]
    PartCount(usize),

    /// A part was not an integer.
    #[error("'{0}' is not a whole number")]
    NotInteger(String),

    /// The hour part was negative.
    #[error("hours cannot be negative, got {0}")]
    NegativeHours(i64),

    /// The minute or second part was outside `0..=59`.
    #[error("{unit} must be between 0 and 59, got {value}")]
    OutOfRange {
        /// Which component was out of range.
        unit: &'static str,
        /// The offending value.
        value: i64,
    },
}

fn parse_part(part: &str) -> Result<i64, DurationError> {
    let part = part.trim();
    part.parse::<i64>()
        .map_err(|_| DurationError::NotInteger(part.to_string()))
}

fn sexagesimal(part: &str, unit: &'static str) -> Result<u8, DurationError> {
    let value = parse_part(part)?;
    u8::try_from(value)
        .ok()
        .filter(|v| *v < 60)
        .ok_or(DurationError::OutOfRange { unit, value })
}

impl FromStr for RunDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(DurationError::Empty);
        }

        let parts: Vec<&str> = s.split(':').collect();
        let [hours, minutes, seconds] = parts.as_slice() else {
            return Err(DurationError::PartCount(parts.len()));
        };

        let hours = parse_part(hours)?;
        let hours = u64::try_from(hours).map_err(|_| DurationError::NegativeHours(hours))?;
        let minutes = sexagesimal(minutes, "minutes")?;
        let seconds = sexagesimal(seconds, "seconds")?;

        Ok(Self {
            hours,
            minutes,
            seconds,
            text: s.trim().to_string(),
        })
    }
}

/// Checks whether `input` is a well-formed `hours:minutes:seconds` duration.
///
/// Never panics; any malformed part simply yields `false`.
#[must_use]
pub fn validate_time(input: &str) -> bool {
    input.parse::<RunDuration>().is_ok()
}
