//! Historical date expressions.
//!
//! Exhibit records describe creation dates in a loose grammar that covers
//! ancient objects as well as modern ones:
//!
//! - `500 p.n.e.`: a year before the common era
//! - `200 n.e.`: a year of the common era
//! - `1350`: a bare year, read as common era
//! - `12.05.1900`, `1995-03-15`: a calendar date
//! - `500 p.n.e. - 400 p.n.e.`, `1350-1370`: a range of two of the above
//!
//! Common-era years and calendar dates may not lie in the future.

use std::fmt;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Marker for years before the common era.
const BCE_MARKER: &str = "p.n.e.";

/// Marker for years of the common era.
///
/// This is a suffix of [`BCE_MARKER`], so the BCE marker must be checked
/// first.
const CE_MARKER: &str = "n.e.";

/// Range separators, in the order they are tried.
///
/// The bare hyphen comes last, which means an unspaced range like
/// `500-400 p.n.e.` splits into `500` (read as CE) and `400 p.n.e.`.
const RANGE_SEPARATORS: [&str; 4] = [" - ", " \u{2013} ", " \u{2014} ", "-"];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dt%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%d/%m/%Y", "%d %B %Y", "%d %b %Y", "%B %d, %Y",
];

/// The era a year is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Era {
    /// Before the common era (`p.n.e.`).
    Bce,
    /// Common era (`n.e.`, or no marker at all).
    Ce,
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Bce => write!(f, "BCE"),
            Self::Ce => write!(f, "CE"),
        }
    }
}

/// A validated historical date expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoricalDate {
    /// A single year.
    Year {
        /// The year, always positive.
        year: u32,
        /// The era the year belongs to.
        era: Era,
        /// Whether the era was written out, as opposed to implied by a bare
        /// number.
        explicit: bool,
    },
    /// A calendar date, midnight when no time was given.
    Calendar(NaiveDateTime),
    /// Two expressions separated by a dash.
    Range(Box<Self>, Box<Self>),
}

/// Reasons a historical date expression is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateError {
    /// Nothing but whitespace.
    #[error("date expression is empty")]
    Empty,

    /// An era marker was present but the rest is not an integer.
    #[error("'{0}' is not a year")]
    NotAYear(String),

    /// A BCE year of zero or less.
    #[error("year {0} before the common era must be positive")]
    NonPositiveYear(i32),

    /// A common-era year before year 1 or after the current year.
    #[error("year {year} must be between 1 and {current}")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
        /// The current calendar year.
        current: i32,
    },

    /// A calendar date later than the current moment.
    #[error("'{0}' lies in the future")]
    Future(String),

    /// Not a year, not a calendar date and not a range.
    #[error("'{0}' is not a recognised date expression")]
    Unrecognised(String),
}

/// The result of splitting an expression on its range separator.
#[derive(Debug, PartialEq, Eq)]
enum Expression<'a> {
    Single(&'a str),
    Range(&'a str, &'a str),
}

impl<'a> Expression<'a> {
    /// Splits on the first separator that yields exactly two non-empty parts.
    fn split(text: &'a str) -> Self {
        for separator in RANGE_SEPARATORS {
            if !text.contains(separator) {
                continue;
            }
            let mut parts = text.split(separator).filter(|part| !part.is_empty());
            if let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) {
                return Self::Range(start, end);
            }
        }
        Self::Single(text)
    }
}

impl HistoricalDate {
    /// Parses a date expression relative to the current local time.
    ///
    /// # Errors
    ///
    /// Returns a [`DateError`] describing the first part of the expression
    /// that could not be accepted.
    pub fn parse(text: &str) -> Result<Self, DateError> {
        Self::parse_at(text, Local::now().naive_local())
    }

    /// Parses a date expression relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns a [`DateError`] describing the first part of the expression
    /// that could not be accepted.
    pub fn parse_at(text: &str, now: NaiveDateTime) -> Result<Self, DateError> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return Err(DateError::Empty);
        }

        match Expression::split(&text) {
            Expression::Range(start, end) => Ok(Self::Range(
                Box::new(Self::parse_at(start, now)?),
                Box::new(Self::parse_at(end, now)?),
            )),
            Expression::Single(single) => Self::parse_single(single, now),
        }
    }

    fn parse_single(text: &str, now: NaiveDateTime) -> Result<Self, DateError> {
        if text.contains(BCE_MARKER) {
            let year = parse_year(&text.replace(BCE_MARKER, ""))?;
            let year = u32::try_from(year)
                .ok()
                .filter(|year| *year > 0)
                .ok_or(DateError::NonPositiveYear(year))?;
            return Ok(Self::Year {
                year,
                era: Era::Bce,
                explicit: true,
            });
        }

        if text.contains(CE_MARKER) {
            let year = parse_year(&text.replace(CE_MARKER, ""))?;
            return Ok(Self::Year {
                year: common_era_year(year, now)?,
                era: Era::Ce,
                explicit: true,
            });
        }

        if let Ok(year) = text.parse::<i32>() {
            return Ok(Self::Year {
                year: common_era_year(year, now)?,
                era: Era::Ce,
                explicit: false,
            });
        }

        match parse_calendar(text) {
            Some(date) if date <= now => Ok(Self::Calendar(date)),
            Some(_) => Err(DateError::Future(text.to_string())),
            None => Err(DateError::Unrecognised(text.to_string())),
        }
    }
}

impl fmt::Display for HistoricalDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Year {
                year,
                era,
                explicit: true,
            } => write!(f, "{year} {era}"),
            Self::Year {
                year,
                era,
                explicit: false,
            } => write!(f, "{year} ({era})"),
            Self::Calendar(date) if date.time() == NaiveTime::MIN => {
                write!(f, "{}", date.format("%Y-%m-%d"))
            }
            Self::Calendar(date) => write!(f, "{}", date.format("%Y-%m-%d %H:%M:%S")),
            Self::Range(start, end) => write!(f, "{start} to {end}"),
        }
    }
}

fn parse_year(text: &str) -> Result<i32, DateError> {
    let text = text.trim();
    text.parse()
        .map_err(|_| DateError::NotAYear(text.to_string()))
}

fn common_era_year(year: i32, now: NaiveDateTime) -> Result<u32, DateError> {
    let current = now.year();
    if (1..=current).contains(&year) {
        Ok(year.unsigned_abs())
    } else {
        Err(DateError::YearOutOfRange { year, current })
    }
}

/// Parses a calendar date or date-time in one of the accepted layouts.
///
/// ISO (`1995-03-15`, `1995/03/15`, `1995-03-15T10:30:00`, RFC 3339),
/// day-first (`15.03.1995`, `15/03/1995`, optionally with a time) and
/// month-name (`15 March 1995`, `March 15, 1995`) forms are recognised.
/// Dates without a time resolve to midnight. An ISO date may carry a zone
/// (`1995-03-15Z`, `1995-03-15+02:00`); its calendar day is kept as written.
#[must_use]
pub fn parse_calendar(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Local).naive_local());
    }

    if let Some(date) = zoned_date(text) {
        return Some(date.and_time(NaiveTime::MIN));
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Reads `YYYY-MM-DD` followed by `Z` or a `±hh:mm` offset.
fn zoned_date(text: &str) -> Option<NaiveDate> {
    let (date, zone) = NaiveDate::parse_and_remainder(text, "%Y-%m-%d").ok()?;
    if zone.eq_ignore_ascii_case("z") {
        return Some(date);
    }
    if zone.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(&format!("{date}T00:00:00{zone}"))
        .ok()
        .map(|_| date)
}

/// Returns `true` if `text` is an acceptable historical date right now.
#[must_use]
pub fn is_valid_historical_date(text: &str) -> bool {
    HistoricalDate::parse(text).is_ok()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn year(year: u32, era: Era, explicit: bool) -> HistoricalDate {
        HistoricalDate::Year {
            year,
            era,
            explicit,
        }
    }

    #[test_case("500 p.n.e. - 400 p.n.e."; "spaced bce range")]
    #[test_case("1350-1370"; "bare year range")]
    #[test_case("200 n.e."; "ce year")]
    #[test_case("3000 p.n.e."; "distant bce year")]
    #[test_case("1500"; "bare year")]
    #[test_case("2024"; "current year")]
    #[test_case("  1500  "; "surrounding whitespace")]
    #[test_case("500 P.N.E."; "uppercase marker")]
    #[test_case("100 p.n.e. \u{2013} 50 n.e."; "en dash range")]
    #[test_case("1900 \u{2014} 1910"; "em dash range")]
    #[test_case("12.05.1900"; "dotted day first")]
    #[test_case("1995/03/15"; "slashed iso")]
    #[test_case("15 March 1995"; "month name")]
    #[test_case("01.06.2024 11:59"; "earlier today")]
    fn accepts(input: &str) {
        assert!(HistoricalDate::parse_at(input, now()).is_ok(), "{input}");
    }

    #[test_case("", DateError::Empty; "empty")]
    #[test_case("   ", DateError::Empty; "whitespace")]
    #[test_case("3000 n.e.", DateError::YearOutOfRange { year: 3000, current: 2024 }; "future ce year")]
    #[test_case("2025", DateError::YearOutOfRange { year: 2025, current: 2024 }; "next year")]
    #[test_case("0", DateError::YearOutOfRange { year: 0, current: 2024 }; "year zero")]
    #[test_case("0 p.n.e.", DateError::NonPositiveYear(0); "bce year zero")]
    #[test_case("abc p.n.e.", DateError::NotAYear("abc".to_string()); "non numeric bce")]
    #[test_case("ten n.e.", DateError::NotAYear("ten".to_string()); "non numeric ce")]
    #[test_case("not a date", DateError::Unrecognised("not a date".to_string()); "prose")]
    #[test_case("01.06.2024 12:30", DateError::Future("01.06.2024 12:30".to_string()); "later today")]
    fn rejects(input: &str, expected: DateError) {
        assert_eq!(HistoricalDate::parse_at(input, now()), Err(expected));
    }

    #[test]
    fn spaced_bce_range_parses_both_ends() {
        let date = HistoricalDate::parse_at("500 p.n.e. - 400 p.n.e.", now()).unwrap();
        assert_eq!(
            date,
            HistoricalDate::Range(
                Box::new(year(500, Era::Bce, true)),
                Box::new(year(400, Era::Bce, true)),
            )
        );
    }

    #[test]
    fn unspaced_range_splits_before_markers_are_read() {
        let date = HistoricalDate::parse_at("500-400 p.n.e.", now()).unwrap();
        assert_eq!(
            date,
            HistoricalDate::Range(
                Box::new(year(500, Era::Ce, false)),
                Box::new(year(400, Era::Bce, true)),
            )
        );
    }

    #[test]
    fn three_part_dash_expression_is_not_a_range() {
        // Splits into three parts, so falls through to calendar parsing.
        let date = HistoricalDate::parse_at("1995-03-15", now()).unwrap();
        assert_eq!(
            date,
            HistoricalDate::Calendar(
                NaiveDate::from_ymd_opt(1995, 3, 15)
                    .unwrap()
                    .and_time(NaiveTime::MIN)
            )
        );
    }

    #[test]
    fn range_fails_when_either_end_fails() {
        assert!(HistoricalDate::parse_at("1350-3000", now()).is_err());
        assert!(HistoricalDate::parse_at("abc - 1350", now()).is_err());
    }

    #[test]
    fn leading_dash_is_not_a_range() {
        assert_eq!(
            HistoricalDate::parse_at("-500", now()),
            Err(DateError::YearOutOfRange {
                year: -500,
                current: 2024
            })
        );
    }

    #[test]
    fn splitter_prefers_spaced_separators() {
        assert_eq!(
            Expression::split("1 - 2"),
            Expression::Range("1", "2")
        );
        assert_eq!(
            Expression::split("a-b-c"),
            Expression::Single("a-b-c")
        );
    }

    #[test_case("1995-03-15", Some((1995, 3, 15)); "iso")]
    #[test_case("15.03.1995", Some((1995, 3, 15)); "dotted")]
    #[test_case("15/03/1995", Some((1995, 3, 15)); "slashed")]
    #[test_case("March 15, 1995", Some((1995, 3, 15)); "us month name")]
    #[test_case("1995-03-15Z", Some((1995, 3, 15)); "utc date")]
    #[test_case("1995-03-15z", Some((1995, 3, 15)); "lowercase utc date")]
    #[test_case("1995-03-15+02:00", Some((1995, 3, 15)); "date with offset")]
    #[test_case("1995-03-15-11:30", Some((1995, 3, 15)); "date with negative offset")]
    #[test_case("1995-03-15+2", None; "malformed offset")]
    #[test_case("1995-02-30", None; "impossible day")]
    #[test_case("yesterday", None; "prose")]
    fn calendar_layouts(input: &str, expected: Option<(i32, u32, u32)>) {
        let parsed = parse_calendar(input).map(|date| (date.year(), date.month(), date.day()));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn display_describes_interpretation() {
        let date = HistoricalDate::parse_at("500 p.n.e. - 1350", now()).unwrap();
        assert_eq!(date.to_string(), "500 BCE to 1350 (CE)");
    }
}
