//! The validation pipeline.
//!
//! A document goes through up to four stages: an input check, parsing, the
//! structural check against [`EXHIBIT_SCHEMA`] and the business rule battery.
//! Input and parse failures end the run with a single diagnostic. A
//! structural error ends the run after the structural stage, so rule
//! diagnostics never pile up on top of a malformed record.

use chrono::{DateTime, Local};
use tracing::{debug, instrument};

use crate::{
    document::{Exhibit, parse, sanitize},
    domain::{Config, Diagnostic, Stage, ValidationReport},
    rules::{self, RuleContext},
    schema::{EXHIBIT_SCHEMA, StructuralValidator},
};

/// Placeholder text callers use for "no content".
pub const EMPTY_PLACEHOLDER: &str = "<empty>";

/// Validates exhibit documents.
///
/// A validator holds only its configuration. Every call builds a fresh
/// report, so one instance can be shared freely, including across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    config: Config,
}

impl Validator {
    /// Creates a validator with the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Validates a document, comparing dates against the current local time.
    #[must_use]
    pub fn validate(&self, text: &str) -> ValidationReport {
        self.validate_at(text, Local::now())
    }

    /// Validates a document as if the current moment were `now`.
    ///
    /// `now` is also the report's generation time, so the same input and the
    /// same `now` always produce the same report.
    #[must_use]
    #[instrument(skip_all, fields(bytes = text.len()))]
    pub fn validate_at(&self, text: &str, now: DateTime<Local>) -> ValidationReport {
        let report = ValidationReport::new(self.diagnose(text, now), now);
        debug!(
            valid = report.is_valid(),
            diagnostics = report.diagnostics().len(),
            "validation finished"
        );
        report
    }

    fn diagnose(&self, text: &str, now: DateTime<Local>) -> Vec<Diagnostic> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == EMPTY_PLACEHOLDER {
            debug!("no content");
            return vec![Diagnostic::error(Stage::Input, "Document has no content")];
        }

        let sanitized;
        let text = if self.config.sanitize {
            sanitized = sanitize(text);
            sanitized.as_str()
        } else {
            text
        };

        let document = match parse(text) {
            Ok(document) => document,
            Err(e) => {
                debug!(error = %e, "parse failed");
                return vec![Diagnostic::error(
                    Stage::Parse,
                    format!("Document could not be parsed: {e}"),
                )];
            }
        };

        let mut diagnostics =
            StructuralValidator::new(&EXHIBIT_SCHEMA, self.config.namespace_policy)
                .validate(&document);
        if diagnostics.iter().any(Diagnostic::is_error) {
            debug!(
                errors = diagnostics.len(),
                "structural check failed, skipping business rules"
            );
            return diagnostics;
        }

        let exhibit = Exhibit::from(&document);
        diagnostics.extend(rules::run(
            &exhibit,
            &RuleContext::new(now.naive_local()),
        ));
        diagnostics
    }
}

/// Validates a document with the default configuration.
#[must_use]
pub fn validate(text: &str) -> ValidationReport {
    Validator::default().validate(text)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use test_case::test_case;

    use super::*;
    use crate::domain::{NamespacePolicy, RuleGroup};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn record(id: &str, body: &str) -> String {
        format!(
            r#"<Exhibit xmlns="http://museum.example.com/exhibit" id="{id}" status="Active">
    <BasicInfo><Title>Bowl</Title><Category>Pottery</Category></BasicInfo>
    <Description><ShortDescription>A bowl</ShortDescription></Description>
    <Technical><Material>Clay</Material><Condition>Good</Condition></Technical>
    {body}
</Exhibit>"#
        )
    }

    fn stages(report: &ValidationReport) -> Vec<Stage> {
        report.diagnostics().iter().map(Diagnostic::stage).collect()
    }

    #[test_case(""; "empty")]
    #[test_case("  \n\t"; "whitespace")]
    #[test_case("<empty>"; "placeholder")]
    fn rejects_missing_content(text: &str) {
        let report = Validator::default().validate_at(text, now());
        assert!(!report.is_valid());
        assert_eq!(stages(&report), vec![Stage::Input]);
    }

    #[test]
    fn parse_failure_is_a_single_diagnostic() {
        let report = Validator::default().validate_at(
            "<exhibit><title>Unclosed Title<category>x</category></exhibit>",
            now(),
        );
        assert_eq!(stages(&report), vec![Stage::Parse]);
        assert!(
            report.diagnostics()[0]
                .message()
                .starts_with("Document could not be parsed: ")
        );
    }

    #[test]
    fn minimal_record_is_valid() {
        let text = record(
            "EXH001",
            r#"<Location onDisplay="false"><Building>Main</Building><Room>1</Room></Location>"#,
        );
        let report = Validator::default().validate_at(&text, now());
        assert!(report.is_valid(), "{report}");
        assert!(report.diagnostics().is_empty());
    }

    #[test]
    fn structural_errors_skip_the_rules() {
        // no Location section, and a bad id that the rules would report
        let report = Validator::default().validate_at(&record("X", ""), now());
        assert!(!report.is_valid());
        assert!(
            report
                .diagnostics()
                .iter()
                .all(|diagnostic| diagnostic.stage() == Stage::Structure)
        );
    }

    #[test]
    fn rules_run_after_a_clean_structure() {
        let text = record(
            "ABC001",
            r#"<Location onDisplay="true"><Building>Main</Building><Room>1</Room></Location>"#,
        );
        let report = Validator::default().validate_at(&text, now());
        assert_eq!(
            stages(&report),
            vec![
                Stage::Rule(RuleGroup::Identifier),
                Stage::Rule(RuleGroup::Location)
            ]
        );
    }

    #[test]
    fn namespace_warning_does_not_block_rules() {
        let text = record(
            "ABC001",
            r#"<Location onDisplay="false"><Building>Main</Building><Room>1</Room></Location>"#,
        )
        .replace(r#" xmlns="http://museum.example.com/exhibit""#, "");
        let report = Validator::default().validate_at(&text, now());
        assert_eq!(
            stages(&report),
            vec![Stage::Structure, Stage::Rule(RuleGroup::Identifier)]
        );
        assert_eq!(report.warnings().count(), 1);
        assert!(!report.is_valid());
    }

    #[test]
    fn sanitizing_is_configurable() {
        let text = format!(
            "<?xml-stylesheet href=\"a.xsl\"?>{}",
            record(
                "EXH001",
                r#"<Location onDisplay="false"><Building>Main</Building><Room>1</Room></Location>"#
            )
        );
        let mut config = Config::default();
        config.sanitize = true;
        config.namespace_policy = NamespacePolicy::Require;
        let report = Validator::new(config).validate_at(&text, now());
        assert!(report.is_valid(), "{report}");
    }

    #[test]
    fn report_is_stamped_with_now() {
        let report = Validator::default().validate_at("", now());
        assert_eq!(report.generated_at(), now());
    }
}
