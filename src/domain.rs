//! Domain models for exhibit validation.
//!
//! This module contains the core domain types: exhibit identifiers,
//! historical date expressions, diagnostics and reports, and configuration.

mod config;
pub use config::{Config, NamespacePolicy};

/// Exhibit identifier types and parsing.
pub mod exhibit_id;
pub use exhibit_id::{Error as ExhibitIdError, ExhibitId};

/// Historical date expressions (BCE/CE years, ranges, calendar dates).
pub mod historical_date;
pub use historical_date::{DateError, Era, HistoricalDate, is_valid_historical_date};

pub mod report;
pub use report::{Diagnostic, RuleGroup, Severity, Stage, ValidationReport};
