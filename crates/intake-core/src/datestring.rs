//! # Extended Date-String Validator
//!
//! A chainable constraint builder over string input. The base check
//! requires the value to parse as a calendar date or date-time; composable
//! refinements then constrain lexical format, temporal direction, calendar
//! year, and day-of-week class.
//!
//! ## Chain Semantics
//!
//! Every refinement consumes the builder and returns a new value embedding
//! the accumulated constraint set — no shared mutation, so a finished
//! schema is freely shareable across threads.
//!
//! Evaluation order: the base parse check runs first and short-circuits on
//! failure; the format check runs next; remaining checks run in
//! chain-declaration order. Every issue produced here carries the
//! `dateString` marker parameter so downstream consumers can tell extended
//! issues apart from generic schema violations (see
//! [`is_date_string_issue`]).
//!
//! ## Casting
//!
//! With [`DateStringSchema::cast`], the accepted value is normalized to a
//! canonical RFC 3339 UTC string (`YYYY-MM-DDTHH:MM:SSZ`, date-only input
//! becoming midnight UTC), which chrono-typed DTO fields deserialize
//! directly. Cast affects only the output value, never which inputs are
//! accepted.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;
use crate::issue::{Issue, IssueCode};

/// Marker parameter present on every issue produced by this validator.
pub(crate) const DATE_STRING_MARKER: &str = "dateString";

/// Lexical grammar the validated string must match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStringFormat {
    /// Calendar date only: `YYYY-MM-DD`.
    Date,
    /// Date, time and offset per RFC 3339.
    DateTime,
}

impl DateStringFormat {
    /// Documentation-dialect name of this format.
    pub fn as_str(self) -> &'static str {
        match self {
            DateStringFormat::Date => "date",
            DateStringFormat::DateTime => "date-time",
        }
    }
}

/// One chained refinement, stored in declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Check {
    Past,
    Future,
    MinYear(i32),
    MaxYear(i32),
    WeekDay,
    Weekend,
}

impl Check {
    fn name(self) -> &'static str {
        match self {
            Check::Past => "past",
            Check::Future => "future",
            Check::MinYear(_) => "min_year",
            Check::MaxYear(_) => "max_year",
            Check::WeekDay => "week_day",
            Check::Weekend => "weekend",
        }
    }
}

/// Immutable chained constraint set over date-like strings.
#[derive(Debug, Clone)]
pub struct DateStringSchema {
    format: DateStringFormat,
    cast: bool,
    checks: Vec<Check>,
}

impl DateStringSchema {
    /// A date-string schema with the default `date-time` format, no casting
    /// and no additional checks.
    pub fn new() -> Self {
        Self {
            format: DateStringFormat::DateTime,
            cast: false,
            checks: Vec::new(),
        }
    }

    /// Require the given lexical grammar.
    pub fn format(mut self, format: DateStringFormat) -> Self {
        self.format = format;
        self
    }

    /// Require the value's instant to be strictly before evaluation time.
    pub fn past(mut self) -> Self {
        self.checks.push(Check::Past);
        self
    }

    /// Require the value's instant to be strictly after evaluation time.
    pub fn future(mut self) -> Self {
        self.checks.push(Check::Future);
        self
    }

    /// Require the calendar year to be at least `year` (inclusive).
    pub fn min_year(mut self, year: i32) -> Self {
        self.checks.push(Check::MinYear(year));
        self
    }

    /// Require the calendar year to be at most `year` (inclusive).
    pub fn max_year(mut self, year: i32) -> Self {
        self.checks.push(Check::MaxYear(year));
        self
    }

    /// Require the date to fall on Monday through Friday.
    pub fn week_day(mut self) -> Self {
        self.checks.push(Check::WeekDay);
        self
    }

    /// Require the date to fall on Saturday or Sunday.
    pub fn weekend(mut self) -> Self {
        self.checks.push(Check::Weekend);
        self
    }

    /// Normalize the accepted value to canonical RFC 3339 UTC.
    ///
    /// Apply this last: it converts the output value, and chain order for
    /// the remaining checks is evaluated against the pre-cast string.
    pub fn cast(mut self) -> Self {
        self.cast = true;
        self
    }

    /// The configured lexical format.
    pub fn declared_format(&self) -> DateStringFormat {
        self.format
    }

    /// Whether the accepted value is normalized on output.
    pub fn casts(&self) -> bool {
        self.cast
    }

    /// Audit the chain for contradictions no value can satisfy.
    pub(crate) fn ensure_well_formed(&self) -> Result<(), SchemaError> {
        let mut min_year: Option<i32> = None;
        let mut max_year: Option<i32> = None;
        for (i, check) in self.checks.iter().enumerate() {
            match check {
                Check::MinYear(y) => min_year = Some(min_year.map_or(*y, |m| m.max(*y))),
                Check::MaxYear(y) => max_year = Some(max_year.map_or(*y, |m| m.min(*y))),
                _ => {}
            }
            for earlier in &self.checks[..i] {
                let conflict = matches!(
                    (earlier, check),
                    (Check::Past, Check::Future)
                        | (Check::Future, Check::Past)
                        | (Check::WeekDay, Check::Weekend)
                        | (Check::Weekend, Check::WeekDay)
                );
                if conflict {
                    return Err(SchemaError::ConflictingDateChecks {
                        first: earlier.name(),
                        second: check.name(),
                    });
                }
            }
        }
        if let (Some(min), Some(max)) = (min_year, max_year) {
            if min > max {
                return Err(SchemaError::InvertedYearBounds { min, max });
            }
        }
        Ok(())
    }

    /// Validate a string against the full chain.
    ///
    /// Returns the accepted value (normalized when casting is enabled) or
    /// the ordered issues. The base parse check short-circuits; format and
    /// chained checks accumulate.
    pub fn validate(&self, value: &str) -> Result<String, Vec<Issue>> {
        let parsed = match parse_base(value) {
            Some(parsed) => parsed,
            None => {
                return Err(vec![tag(Issue::new(
                    IssueCode::InvalidDateString,
                    "Invalid date string",
                ))]);
            }
        };

        let mut issues = Vec::new();

        let format_ok = match self.format {
            DateStringFormat::Date => parsed.lexical == Lexical::Date,
            DateStringFormat::DateTime => parsed.lexical == Lexical::DateTime,
        };
        if !format_ok {
            issues.push(tag(Issue::new(
                IssueCode::InvalidFormat,
                format!("Invalid date string format, expected {}", self.format.as_str()),
            )
            .with_param("expected", self.format.as_str())));
        }

        for check in &self.checks {
            if let Some(issue) = run_check(*check, parsed.instant) {
                issues.push(tag(issue));
            }
        }

        if !issues.is_empty() {
            return Err(issues);
        }

        if self.cast {
            Ok(parsed.instant.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        } else {
            Ok(value.to_string())
        }
    }
}

impl Default for DateStringSchema {
    fn default() -> Self {
        Self::new()
    }
}

fn tag(issue: Issue) -> Issue {
    issue.with_param(DATE_STRING_MARKER, true)
}

fn run_check(check: Check, instant: DateTime<Utc>) -> Option<Issue> {
    match check {
        Check::Past => (instant >= Utc::now()).then(|| {
            Issue::new(IssueCode::InvalidDirection, "Date must be in the past")
                .with_param("expected", "past")
        }),
        Check::Future => (instant <= Utc::now()).then(|| {
            Issue::new(IssueCode::InvalidDirection, "Date must be in the future")
                .with_param("expected", "future")
        }),
        Check::MinYear(year) => (instant.year() < year).then(|| {
            Issue::new(
                IssueCode::TooSmall,
                format!("Year must be greater than or equal to {year}"),
            )
            .with_param("expected", year)
        }),
        Check::MaxYear(year) => (instant.year() > year).then(|| {
            Issue::new(
                IssueCode::TooBig,
                format!("Year must be less than or equal to {year}"),
            )
            .with_param("expected", year)
        }),
        Check::WeekDay => is_weekend(instant).then(|| {
            Issue::new(IssueCode::InvalidDayClass, "Date must be a week day")
                .with_param("expected", "weekDay")
        }),
        Check::Weekend => (!is_weekend(instant)).then(|| {
            Issue::new(IssueCode::InvalidDayClass, "Date must be a weekend")
                .with_param("expected", "weekend")
        }),
    }
}

fn is_weekend(instant: DateTime<Utc>) -> bool {
    matches!(instant.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Lexical class the raw string matched during the base parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexical {
    Date,
    DateTime,
    /// Date-like (valid leading calendar date) but matching neither grammar.
    Other,
}

struct Parsed {
    instant: DateTime<Utc>,
    lexical: Lexical,
}

/// Base parse: full RFC 3339, then a bare calendar date, then a value whose
/// leading `YYYY-MM-DD` component is a valid date. The last case exists so
/// the format refinement — not the base check — reports strings like
/// `2022-05-02:08:33Z` that are date-like but lexically malformed.
fn parse_base(value: &str) -> Option<Parsed> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(Parsed {
            instant: dt.with_timezone(&Utc),
            lexical: Lexical::DateTime,
        });
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Parsed {
            instant: date.and_time(NaiveTime::MIN).and_utc(),
            lexical: Lexical::Date,
        });
    }
    if value.len() > 10 && value.is_char_boundary(10) {
        if let Ok(date) = NaiveDate::parse_from_str(&value[..10], "%Y-%m-%d") {
            return Some(Parsed {
                instant: date.and_time(NaiveTime::MIN).and_utc(),
                lexical: Lexical::Other,
            });
        }
    }
    None
}

/// Returns true when `issue` was produced by the extended date-string
/// validator, false for ordinary schema-violation issues.
pub fn is_date_string_issue(issue: &Issue) -> bool {
    matches!(issue.params.get(DATE_STRING_MARKER), Some(Value::Bool(true)))
}

/// Extra parameters carried by extended date-string issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateStringPayload {
    /// Constraint-specific expected value (`"past"`, `"date"`, a year, ...).
    /// Absent on base-parse failures, which have no single expectation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    /// Always `true`; the marker consumed by [`is_date_string_issue`].
    #[serde(rename = "dateString")]
    pub date_string: bool,
}

impl Issue {
    /// Decode the extended date-string parameters, if this issue carries them.
    pub fn date_string_payload(&self) -> Option<DateStringPayload> {
        if !is_date_string_issue(self) {
            return None;
        }
        serde_json::from_value(Value::Object(self.params.clone())).ok()
    }
}
