//! Exhibit Document Validation
//!
//! Museum exhibit records are XML documents. Before a record is stored it is
//! checked in two stages: against a structural schema (required sections,
//! attributes, closed value sets, element order) and then against a battery
//! of business rules (identifier format, dimension sanity, location
//! consistency, dates, prices and media). The outcome is a
//! [`ValidationReport`] listing every finding in a reproducible order.
//!
//! ```
//! let report = exhibit_validator::validate("<empty>");
//! assert!(!report.is_valid());
//! ```

pub mod domain;
pub use domain::{
    Config, DateError, Diagnostic, ExhibitId, HistoricalDate, NamespacePolicy, RuleGroup,
    Severity, Stage, ValidationReport, is_valid_historical_date,
};

/// Exhibit documents: element tree, XML reader and typed record view.
pub mod document;
pub use document::{Document, ParseError};

/// Structural schemas.
pub mod schema;

/// Business rules.
pub mod rules;
pub use rules::{RuleContext, RuleViolation};

mod engine;
pub use engine::{EMPTY_PLACEHOLDER, Validator, validate};
