//! Diagnostics and the report a validation run produces.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The document must not be persisted.
    Error,
    /// Worth surfacing, but does not fail the document.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// The business rule groups, in the order the battery runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
    /// Format of the exhibit `id` attribute.
    Identifier,
    /// Title, category and creation date.
    BasicInfo,
    /// Physical dimensions.
    Dimensions,
    /// Storage and display location.
    Location,
    /// Acquisition and exhibition history.
    History,
    /// Attached images.
    Media,
    /// State of preservation.
    Condition,
}

impl RuleGroup {
    /// Every group, in battery order.
    pub const ALL: [Self; 7] = [
        Self::Identifier,
        Self::BasicInfo,
        Self::Dimensions,
        Self::Location,
        Self::History,
        Self::Media,
        Self::Condition,
    ];
}

impl fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Identifier => "identifier",
            Self::BasicInfo => "basic info",
            Self::Dimensions => "dimensions",
            Self::Location => "location",
            Self::History => "history",
            Self::Media => "media",
            Self::Condition => "condition",
        };
        f.write_str(name)
    }
}

/// The pipeline stage that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The input was empty or the "no content" placeholder.
    Input,
    /// The text is not a well-formed document.
    Parse,
    /// The document does not match the exhibit schema.
    Structure,
    /// A business rule group rejected the document.
    Rule(RuleGroup),
}

impl Stage {
    /// Returns the stage name used in serialized reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Parse => "parse",
            Self::Structure => "structure",
            Self::Rule(_) => "rule",
        }
    }

    /// Returns the rule group, for business rule diagnostics.
    #[must_use]
    pub const fn rule_group(self) -> Option<RuleGroup> {
        match self {
            Self::Rule(group) => Some(group),
            _ => None,
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    stage: Stage,
    path: Option<String>,
    message: String,
}

impl Diagnostic {
    /// Creates an error diagnostic.
    pub fn error(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            stage,
            path: None,
            message: message.into(),
        }
    }

    /// Creates a warning diagnostic.
    pub fn warning(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            stage,
            path: None,
            message: message.into(),
        }
    }

    /// Attaches the element path the diagnostic refers to.
    #[must_use]
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the stage that produced this diagnostic.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the element path, for diagnostics tied to one element.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` for error-severity diagnostics.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] {path}: {}", self.severity, self.message),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// The outcome of validating one document.
///
/// A document is valid when the report holds no error-severity diagnostics.
/// Diagnostics keep the order they were produced in: input and parse
/// problems, then structural findings in document order, then business rule
/// findings in battery order.
///
/// The [`fmt::Display`] implementation renders the summary shown to users
/// and written to logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    diagnostics: Vec<Diagnostic>,
    generated_at: DateTime<Local>,
}

impl ValidationReport {
    /// Creates a report from its diagnostics.
    #[must_use]
    pub const fn new(diagnostics: Vec<Diagnostic>, generated_at: DateTime<Local>) -> Self {
        Self {
            diagnostics,
            generated_at,
        }
    }

    /// Returns `true` if no error-severity diagnostic was produced.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Returns every diagnostic, in production order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns the error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// Returns the warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    /// Returns when the report was generated.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "=== EXHIBIT VALIDATION REPORT ===")?;
        writeln!(
            f,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(
            f,
            "Status: {}",
            if self.is_valid() { "VALID" } else { "INVALID" }
        )?;
        writeln!(f, "Errors: {}", self.errors().count())?;
        writeln!(f, "Warnings: {}", self.warnings().count())?;
        writeln!(f)?;

        if self.diagnostics.is_empty() {
            writeln!(f, "Document is valid and conforms to the exhibit schema.")?;
        } else {
            for (i, diagnostic) in self.diagnostics.iter().enumerate() {
                writeln!(f, "{}. {diagnostic}", i + 1)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "=== END OF REPORT ===")
    }
}

#[derive(Serialize)]
struct SerializedDiagnostic<'a> {
    severity: Severity,
    stage: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<RuleGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    message: &'a str,
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SerializedDiagnostic {
            severity: self.severity,
            stage: self.stage.name(),
            group: self.stage.rule_group(),
            path: self.path.as_deref(),
            message: &self.message,
        }
        .serialize(serializer)
    }
}

#[derive(Serialize)]
struct SerializedReport<'a> {
    valid: bool,
    generated_at: &'a DateTime<Local>,
    errors: usize,
    warnings: usize,
    diagnostics: &'a [Diagnostic],
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SerializedReport {
            valid: self.is_valid(),
            generated_at: &self.generated_at,
            errors: self.errors().count(),
            warnings: self.warnings().count(),
            diagnostics: &self.diagnostics,
        }
        .serialize(serializer)
    }
}
