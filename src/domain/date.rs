use std::{fmt, str::FromStr};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Serialize, Serializer};

/// The calendar date of a run, written as `year/month/day`.
///
/// The accepted ranges are deliberately looser than a real calendar: month
/// `0` is accepted and days are only checked against `1..=31`, so `2023/2/31`
/// is a valid [`RunDate`]. Use [`RunDate::to_naive_date`] to find out whether
/// the date exists.
///
/// Dates order chronologically (year, then month, then day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunDate {
    year: u32,
    month: u8,
    day: u8,
}

impl RunDate {
    /// Creates a date from its components.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Month`] or [`DateError::Day`] if the month is
    /// greater than 12 or the day is outside `1..=31`.
    pub fn new(year: u32, month: u8, day: u8) -> Result<Self, DateError> {
        if month > 12 {
            return Err(DateError::Month(i64::from(month)));
        }
        if !(1..=31).contains(&day) {
            return Err(DateError::Day(i64::from(day)));
        }
        Ok(Self { year, month, day })
    }

    /// Today's date in the local timezone.
    #[must_use]
    pub fn today() -> Self {
        Self::from(Local::now().date_naive())
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> u32 {
        self.year
    }

    /// Returns the month (`0..=12`).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of the month (`1..=31`).
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Converts to a [`NaiveDate`], if the date exists on the calendar.
    #[must_use]
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let year = i32::try_from(self.year).ok()?;
        NaiveDate::from_ymd_opt(year, u32::from(self.month), u32::from(self.day))
    }
}

impl From<NaiveDate> for RunDate {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year().max(0) as u32,
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

impl fmt::Display for RunDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

impl Serialize for RunDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Errors that can occur while parsing a [`RunDate`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateError {
    /// The input did not contain exactly two `/` separators.
    #[error("expected 'year/month/day', found {0} '/' separator(s)")]
    Separators(usize),

    /// A part was not an integer.
    #[error("'{0}' is not a whole number")]
    NotInteger(String),

    /// The year was negative or too large.
    #[error("year {0} is out of range")]
    Year(i64),

    /// The month was outside `0..=12`.
    #[error("month must be between 0 and 12, got {0}")]
    Month(i64),

    /// The day was outside `1..=31`.
    #[error("day must be between 1 and 31, got {0}")]
    Day(i64),
}

fn parse_part(part: &str) -> Result<i64, DateError> {
    let part = part.trim();
    part.parse::<i64>()
        .map_err(|_| DateError::NotInteger(part.to_string()))
}

impl FromStr for RunDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let separators = s.matches('/').count();
        if separators != 2 {
            return Err(DateError::Separators(separators));
        }

        let mut parts = s.split('/');
        let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(DateError::Separators(separators));
        };

        let year = parse_part(year)?;
        let month = parse_part(month)?;
        let day = parse_part(day)?;

        let year = u32::try_from(year).map_err(|_| DateError::Year(year))?;
        let month = u8::try_from(month)
            .ok()
            .filter(|m| *m <= 12)
            .ok_or(DateError::Month(month))?;
        let day = u8::try_from(day)
            .ok()
            .filter(|d| (1..=31).contains(d))
            .ok_or(DateError::Day(day))?;

        Ok(Self { year, month, day })
    }
}

/// Checks whether `input` is a well-formed `year/month/day` date.
#[must_use]
pub fn validate_date(input: &str) -> bool {
    input.parse::<RunDate>().is_ok()
}

/// Converts manually entered, hyphen-delimited dates to the slash-delimited
/// form understood by [`RunDate`].
///
/// The parts are reassembled in the order they were typed; nothing is
/// reordered, so `05-10-2023` becomes `05/10/2023` (which then fails to parse
/// as a date with month 10 and day 2023). Input without hyphens is returned
/// unchanged.
#[must_use]
pub fn reformat_manual_date(input: &str) -> String {
    let input = input.trim();
    if input.contains('-') {
        input.split('-').collect::<Vec<_>>().join("/")
    } else {
        input.to_string()
    }
}
