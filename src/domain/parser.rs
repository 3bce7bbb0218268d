//! Turning user input into [`RunRecord`]s.
//!
//! There are two entry points with different error policies:
//!
//! - [`RunRecordParser::parse_manual_input`] checks every field and reports
//!   *all* problems with a submission at once.
//! - [`RunRecordParser::parse_delimited_line`] stops at the first problem in a
//!   `distance,duration[,date]` line.

use nonempty::NonEmpty;
use tracing::{instrument, trace};

use super::{
    date::{reformat_manual_date, DateError},
    duration::DurationError,
    pace::{has_representable_pace, PaceRounding},
    RunDate, RunDuration, RunRecord,
};

/// The field separator of a delimited line.
pub const DELIMITER: char = ',';

/// A reason a run was rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The duration was not a valid `hours:minutes:seconds` value.
    #[error("the time for the run was not properly formatted ({0})")]
    MalformedDuration(#[source] DurationError),

    /// The distance was zero or negative.
    #[error("run distance is negative or 0 (got '{0}')")]
    NonPositiveDistance(String),

    /// The manually entered distance was not a number.
    #[error("run distance '{0}' is not a number")]
    MalformedDistance(String),

    /// The distance was positive but too small to give the run a pace.
    #[error("run distance '{0}' is too small to derive a pace")]
    DistanceTooSmall(String),

    /// No date was entered.
    #[error("no date for the run was provided")]
    MissingDate,

    /// The date was not a valid `year/month/day` value.
    #[error("the date for the run was not properly formatted ({0})")]
    MalformedDate(#[source] DateError),

    /// A delimited line had the wrong shape.
    #[error("the line is not a valid 'distance,time[,date]' entry ({0})")]
    MalformedDelimitedLine(#[source] LineError),
}

/// Structural problems with a delimited line.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LineError {
    /// The line did not contain two or three fields.
    #[error("expected 2 or 3 fields, found {0}")]
    FieldCount(usize),

    /// The distance field was not a number.
    #[error("distance '{0}' is not a number")]
    Distance(String),
}

/// Builds validated [`RunRecord`]s.
///
/// The parser is pure: the date used for lines without one is supplied up
/// front rather than read from the clock.
#[derive(Debug, Clone, Copy)]
pub struct RunRecordParser {
    today: RunDate,
    rounding: PaceRounding,
}

impl RunRecordParser {
    /// Creates a parser that dates undated lines with `today`.
    #[must_use]
    pub const fn new(today: RunDate) -> Self {
        Self {
            today,
            rounding: PaceRounding::Uncarried,
        }
    }

    /// Sets how paces that round up to a full minute are treated.
    #[must_use]
    pub const fn with_rounding(mut self, rounding: PaceRounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// The date given to delimited lines without a date field.
    #[must_use]
    pub const fn today(&self) -> RunDate {
        self.today
    }

    /// Validates a manually entered run.
    ///
    /// The date may be hyphen-delimited; it is converted with
    /// [`reformat_manual_date`] before validation.
    ///
    /// # Errors
    ///
    /// Returns every violated rule, in field order: duration, distance, date.
    #[instrument(level = "debug", skip(self))]
    pub fn parse_manual_input(
        &self,
        distance: &str,
        duration: &str,
        date: &str,
    ) -> Result<RunRecord, NonEmpty<ValidationError>> {
        let duration = duration
            .parse::<RunDuration>()
            .map_err(ValidationError::MalformedDuration);

        let distance_text = distance.trim();
        let distance = parse_distance(distance_text).and_then(|value| {
            value.ok_or_else(|| ValidationError::MalformedDistance(distance_text.to_string()))
        });
        let distance = match (&duration, distance) {
            (Ok(duration), Ok(value)) => check_pace(value, duration, distance_text),
            (_, distance) => distance,
        };

        let date = if date.trim().is_empty() {
            Err(ValidationError::MissingDate)
        } else {
            reformat_manual_date(date)
                .parse::<RunDate>()
                .map_err(ValidationError::MalformedDate)
        };

        match (duration, distance, date) {
            (Ok(duration), Ok(distance), Ok(date)) => {
                Ok(RunRecord::new(distance, duration, date, self.rounding))
            }
            (duration, distance, date) => {
                let errors: Vec<ValidationError> = [duration.err(), distance.err(), date.err()]
                    .into_iter()
                    .flatten()
                    .collect();
                trace!(count = errors.len(), "manual entry rejected");
                Err(NonEmpty::from_vec(errors).expect("at least one field failed validation"))
            }
        }
    }

    /// Parses one `distance,duration[,date]` line.
    ///
    /// An absent date field means the run happened [`today`](Self::today).
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    #[instrument(level = "trace", skip(self))]
    pub fn parse_delimited_line(&self, line: &str) -> Result<RunRecord, ValidationError> {
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        let (distance, duration, date) = match fields.as_slice() {
            [distance, duration] => (*distance, *duration, None),
            [distance, duration, date] => (*distance, *duration, Some(*date)),
            _ => {
                return Err(ValidationError::MalformedDelimitedLine(
                    LineError::FieldCount(fields.len()),
                ));
            }
        };

        let distance_text = distance.trim();
        let distance = parse_distance(distance_text)?.ok_or_else(|| {
            ValidationError::MalformedDelimitedLine(LineError::Distance(distance_text.to_string()))
        })?;

        let duration = duration
            .parse::<RunDuration>()
            .map_err(ValidationError::MalformedDuration)?;
        let distance = check_pace(distance, &duration, distance_text)?;

        let date = match date {
            Some(date) => date
                .parse::<RunDate>()
                .map_err(ValidationError::MalformedDate)?,
            None => self.today,
        };

        Ok(RunRecord::new(distance, duration, date, self.rounding))
    }
}

/// Parses a distance.
///
/// Returns `Ok(None)` if the text is not a finite number, and
/// [`ValidationError::NonPositiveDistance`] if it is zero or negative. Empty
/// input counts as a distance of zero.
fn parse_distance(text: &str) -> Result<Option<f64>, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::NonPositiveDistance(String::new()));
    }

    match text.parse::<f64>() {
        Ok(value) if !value.is_finite() => Ok(None),
        Ok(value) if value <= 0.0 => Err(ValidationError::NonPositiveDistance(text.to_string())),
        Ok(value) => Ok(Some(value)),
        Err(_) => Ok(None),
    }
}

/// Rejects a distance whose pace over `duration` cannot be represented.
fn check_pace(
    distance: f64,
    duration: &RunDuration,
    text: &str,
) -> Result<f64, ValidationError> {
    if has_representable_pace(distance, duration) {
        Ok(distance)
    } else {
        Err(ValidationError::DistanceTooSmall(text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn parser() -> RunRecordParser {
        RunRecordParser::new(RunDate::new(2024, 3, 1).unwrap())
    }

    #[test]
    fn delimited_line_with_date() {
        let record = parser().parse_delimited_line("5,0:40:00,2023/05/10").unwrap();
        assert!((record.distance() - 5.0).abs() < f64::EPSILON);
        assert_eq!(record.duration().as_str(), "0:40:00");
        assert_eq!(record.date(), RunDate::new(2023, 5, 10).unwrap());
        assert_eq!(record.pace().to_string(), "8:00");
    }

    #[test]
    fn delimited_line_without_date_uses_today() {
        let record = parser().parse_delimited_line("3,0:21:00").unwrap();
        assert_eq!(record.date(), RunDate::new(2024, 3, 1).unwrap());
        assert_eq!(record.pace().to_string(), "7:00");
    }

    #[test]
    fn delimited_line_accepts_fractional_distance() {
        let record = parser().parse_delimited_line("2.5,0:20:00,2023/1/1").unwrap();
        assert_eq!(record.pace().to_string(), "8:00");
    }

    #[test_case("5"; "no commas")]
    #[test_case("5,0:40:00,2023/05/10,extra"; "three commas")]
    #[test_case("5,0:40:00,2023/05/10,a,b"; "four commas")]
    #[test_case(""; "empty line")]
    fn delimited_line_rejects_field_count(line: &str) {
        assert!(matches!(
            parser().parse_delimited_line(line),
            Err(ValidationError::MalformedDelimitedLine(
                LineError::FieldCount(_)
            ))
        ));
    }

    #[test_case("five,0:40:00"; "word")]
    #[test_case("inf,0:40:00"; "infinite")]
    fn delimited_line_rejects_non_numeric_distance(line: &str) {
        assert!(matches!(
            parser().parse_delimited_line(line),
            Err(ValidationError::MalformedDelimitedLine(LineError::Distance(
                _
            )))
        ));
    }

    #[test_case("0,0:40:00"; "zero")]
    #[test_case("-2,0:40:00"; "negative")]
    fn delimited_line_rejects_non_positive_distance(line: &str) {
        assert!(matches!(
            parser().parse_delimited_line(line),
            Err(ValidationError::NonPositiveDistance(_))
        ));
    }

    #[test_case("1e-320,0:00:01,2023/01/01"; "subnormal")]
    #[test_case("1e-300,1000:00:00,2023/01/01"; "pace overflows minutes")]
    fn delimited_line_rejects_distance_without_pace(line: &str) {
        assert!(matches!(
            parser().parse_delimited_line(line),
            Err(ValidationError::DistanceTooSmall(_))
        ));
    }

    #[test_case("5,0:60:00,2023/05/10"; "minute sixty")]
    #[test_case("5,40:00,2023/05/10"; "two part time")]
    #[test_case("5,,2023/05/10"; "empty time")]
    fn delimited_line_rejects_malformed_duration(line: &str) {
        assert!(matches!(
            parser().parse_delimited_line(line),
            Err(ValidationError::MalformedDuration(_))
        ));
    }

    #[test_case("5,0:40:00,2023-05-10"; "hyphenated")]
    #[test_case("5,0:40:00,2023/13/10"; "month thirteen")]
    #[test_case("5,0:40:00,"; "empty date field")]
    fn delimited_line_rejects_malformed_date(line: &str) {
        assert!(matches!(
            parser().parse_delimited_line(line),
            Err(ValidationError::MalformedDate(_))
        ));
    }

    #[test]
    fn delimited_line_reports_only_the_first_problem() {
        // both the distance and the time are bad; the distance comes first
        let error = parser().parse_delimited_line("-1,bad,2023/99/99").unwrap_err();
        assert!(matches!(error, ValidationError::NonPositiveDistance(_)));
    }

    #[test]
    fn manual_input_accepts_valid_submission() {
        let record = parser()
            .parse_manual_input("10", "1:40:00", "2023/06/15")
            .unwrap();
        assert_eq!(record.pace().to_string(), "10:00");
        assert_eq!(record.date(), RunDate::new(2023, 6, 15).unwrap());
    }

    #[test]
    fn manual_input_reformats_hyphenated_date() {
        let record = parser()
            .parse_manual_input("10", "1:40:00", "2023-06-15")
            .unwrap();
        assert_eq!(record.date(), RunDate::new(2023, 6, 15).unwrap());
    }

    #[test]
    fn manual_input_keeps_hyphenated_field_order() {
        let errors = parser()
            .parse_manual_input("10", "1:40:00", "06-15-2023")
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors.head, ValidationError::MalformedDate(_)));
    }

    #[test]
    fn manual_input_accumulates_every_error() {
        let errors = parser().parse_manual_input("-1", "", "").unwrap_err();
        let errors: Vec<_> = errors.into_iter().collect();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ValidationError::MalformedDuration(_)));
        assert!(matches!(errors[1], ValidationError::NonPositiveDistance(_)));
        assert_eq!(errors[2], ValidationError::MissingDate);

        let messages: std::collections::HashSet<String> =
            errors.iter().map(ToString::to_string).collect();
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn manual_input_reports_single_error() {
        let errors = parser()
            .parse_manual_input("5", "0:40:00", "")
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.head, ValidationError::MissingDate);
    }

    #[test]
    fn manual_input_rejects_distance_without_pace() {
        let errors = parser()
            .parse_manual_input("1e-320", "0:00:01", "")
            .unwrap_err();
        let errors: Vec<_> = errors.into_iter().collect();
        assert_eq!(
            errors,
            [
                ValidationError::DistanceTooSmall("1e-320".to_string()),
                ValidationError::MissingDate,
            ]
        );
    }

    #[test]
    fn manual_input_rejects_non_numeric_distance() {
        let errors = parser()
            .parse_manual_input("far", "0:40:00", "2023/05/10")
            .unwrap_err();
        assert_eq!(
            errors.head,
            ValidationError::MalformedDistance("far".to_string())
        );
    }
}
