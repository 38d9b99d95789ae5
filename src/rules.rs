//! The business rule battery.
//!
//! Each rule group inspects one part of the typed [`Exhibit`] view and stops
//! at its first violation, so a group contributes at most one diagnostic.
//! Groups are independent of each other: every group runs on every call, in
//! [`RuleGroup::ALL`] order, whatever the earlier groups found.

use chrono::NaiveDateTime;
use tracing::{instrument, trace};

use crate::{
    document::Exhibit,
    domain::{DateError, Diagnostic, ExhibitIdError, RuleGroup, Stage},
    schema::{CONDITION, UNIT},
};

mod history;
mod identity;
mod location;
mod media;
mod technical;

/// Longest title or image file name accepted, in characters.
pub const MAX_TEXT_LENGTH: usize = 255;

/// Inputs the rules need besides the document itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    now: NaiveDateTime,
}

impl RuleContext {
    /// Creates a context that treats `now` as the current moment.
    #[must_use]
    pub const fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// The moment dates are compared against.
    #[must_use]
    pub const fn now(&self) -> NaiveDateTime {
        self.now
    }
}

/// A business rule violation.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RuleViolation {
    /// The `id` attribute is absent or empty.
    #[error("Exhibit identifier is required")]
    MissingId,

    /// The `id` attribute is malformed.
    #[error(transparent)]
    Id(#[from] ExhibitIdError),

    /// A whole section is absent.
    #[error("{0} section is required")]
    MissingSection(&'static str),

    /// A required value is absent or blank.
    #[error("{section}/{field} is required")]
    MissingField {
        /// The enclosing section.
        section: &'static str,
        /// The absent element or attribute.
        field: &'static str,
    },

    /// A text value exceeds [`MAX_TEXT_LENGTH`].
    #[error("{field} must not be longer than {max} characters (found {length})", max = MAX_TEXT_LENGTH)]
    TooLong {
        /// The offending element.
        field: &'static str,
        /// Its length in characters.
        length: usize,
    },

    /// `DateCreated` is not a historical date expression.
    #[error("invalid creation date '{value}': {source}")]
    DateCreated {
        /// The text as written.
        value: String,
        /// Why it was rejected.
        source: DateError,
    },

    /// The dimension unit is not one of the known units.
    #[error("unknown dimension unit '{0}' (allowed: {units})", units = UNIT.values.join(", "))]
    Unit(String),

    /// A measurement is not a number.
    #[error("{field} '{value}' is not a number")]
    NotANumber {
        /// The measurement element.
        field: &'static str,
        /// The text as written.
        value: String,
    },

    /// A measurement is not within `(0, 10000]`.
    #[error("{field} must be greater than 0 and at most {max} (found {value})", max = technical::MAX_DIMENSION)]
    DimensionOutOfRange {
        /// The measurement element.
        field: &'static str,
        /// The parsed value.
        value: f64,
    },

    /// A `Dimensions` section without any measurement.
    #[error("Dimensions must contain at least one of Height, Width, Depth or Diameter")]
    NoMeasurements,

    /// The exhibit is on display but has no display case.
    #[error("Location/Display is required when the exhibit is on display")]
    DisplayRequired,

    /// The acquisition date is not a calendar date.
    #[error("invalid acquisition date '{0}'")]
    AcquisitionDate(String),

    /// The acquisition date lies after the current moment.
    #[error("acquisition date '{0}' lies in the future")]
    FutureAcquisition(String),

    /// The price is not a non-negative decimal.
    #[error("invalid acquisition price '{0}'")]
    Price(String),

    /// An exhibition does not end after it starts.
    #[error("exhibition {index} must start before it ends ({start} to {end})")]
    ExhibitionDates {
        /// 1-based position among the exhibitions.
        index: usize,
        /// `StartDate` as written.
        start: String,
        /// `EndDate` as written.
        end: String,
    },

    /// More than one image is marked primary.
    #[error("only one image may be marked primary (found {0})")]
    PrimaryImages(usize),

    /// An image file name has an unaccepted extension.
    #[error("unsupported image file extension: {0}")]
    ImageExtension(String),

    /// The condition is not one of the known conditions.
    #[error("'{0}' is not a valid Condition (allowed: {conditions})", conditions = CONDITION.values.join(", "))]
    Condition(String),
}

/// Runs a single rule group.
///
/// # Errors
///
/// Returns the group's first violation.
pub fn check(
    group: RuleGroup,
    exhibit: &Exhibit,
    context: &RuleContext,
) -> Result<(), RuleViolation> {
    match group {
        RuleGroup::Identifier => identity::identifier(exhibit),
        RuleGroup::BasicInfo => identity::basic_info(exhibit, context),
        RuleGroup::Dimensions => technical::dimensions(exhibit),
        RuleGroup::Location => location::location(exhibit),
        RuleGroup::History => history::history(exhibit, context),
        RuleGroup::Media => media::media(exhibit),
        RuleGroup::Condition => technical::condition(exhibit),
    }
}

/// Runs every rule group and returns one diagnostic per failed group, in
/// battery order.
#[instrument(skip_all, fields(id = exhibit.id))]
pub fn run(exhibit: &Exhibit, context: &RuleContext) -> Vec<Diagnostic> {
    RuleGroup::ALL
        .into_iter()
        .filter_map(|group| {
            let result = check(group, exhibit, context);
            trace!(%group, passed = result.is_ok(), "rule group checked");
            result
                .err()
                .map(|violation| Diagnostic::error(Stage::Rule(group), violation.to_string()))
        })
        .collect()
}

/// Returns `text` if it holds anything but whitespace.
fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::document::{Location, Technical};

    pub(super) fn context() -> RuleContext {
        RuleContext::new(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn every_group_runs_even_after_failures() {
        let exhibit = Exhibit {
            id: Some("ABC001"),
            location: Some(Location {
                on_display: Some("true"),
                building: Some("Main"),
                room: Some("12"),
                display: None,
            }),
            technical: Some(Technical {
                dimensions: None,
                condition: Some("Broken"),
            }),
            ..Exhibit::default()
        };

        let groups: Vec<_> = run(&exhibit, &context())
            .iter()
            .filter_map(|diagnostic| diagnostic.stage().rule_group())
            .collect();
        assert_eq!(
            groups,
            vec![
                RuleGroup::Identifier,
                RuleGroup::BasicInfo,
                RuleGroup::Location,
                RuleGroup::Condition,
            ]
        );
    }

    #[test]
    fn empty_record_fails_the_required_groups_only() {
        let diagnostics = run(&Exhibit::default(), &context());
        let messages: Vec<_> = diagnostics.iter().map(Diagnostic::message).collect();
        assert_eq!(
            messages,
            vec![
                "Exhibit identifier is required",
                "BasicInfo section is required",
                "Location section is required",
                "Technical section is required",
            ]
        );
        assert!(diagnostics.iter().all(Diagnostic::is_error));
    }
}
