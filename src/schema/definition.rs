//! Building blocks for describing a document schema.
//!
//! A schema is plain static data: element declarations with cardinalities,
//! attribute declarations and simple value types. It is never mutated after
//! it is defined, so one definition is shared by every validator.

use std::{fmt, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;

static DOUBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([Ee][+-]?[0-9]+)?|[+-]?INF|NaN)$")
        .expect("double pattern is valid")
});

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("decimal pattern is valid")
});

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})(Z|[+-][0-9]{2}:[0-9]{2})?$")
        .expect("date pattern is valid")
});

/// How many times a child element may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurs {
    /// Exactly once.
    ExactlyOne,
    /// At most once.
    ZeroOrOne,
    /// At least once.
    OneOrMore,
    /// Any number of times.
    ZeroOrMore,
}

impl Occurs {
    /// The minimum number of occurrences.
    #[must_use]
    pub const fn min(self) -> usize {
        match self {
            Self::ExactlyOne | Self::OneOrMore => 1,
            Self::ZeroOrOne | Self::ZeroOrMore => 0,
        }
    }

    /// The maximum number of occurrences, if bounded.
    #[must_use]
    pub const fn max(self) -> Option<usize> {
        match self {
            Self::ExactlyOne | Self::ZeroOrOne => Some(1),
            Self::OneOrMore | Self::ZeroOrMore => None,
        }
    }
}

impl fmt::Display for Occurs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            Self::ExactlyOne => "1",
            Self::ZeroOrOne => "?",
            Self::OneOrMore => "+",
            Self::ZeroOrMore => "*",
        };
        f.write_str(symbol)
    }
}

/// A closed set of legal string values.
#[derive(Debug, PartialEq, Eq)]
pub struct Enumeration {
    /// The type name used in diagnostics.
    pub name: &'static str,
    /// The legal values, compared exactly.
    pub values: &'static [&'static str],
}

impl Enumeration {
    /// Returns `true` if `value` is one of the legal values.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(&value)
    }
}

impl fmt::Display for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {{{}}}", self.name, self.values.join(", "))
    }
}

/// The type of an attribute value or of a text-only element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleType {
    /// Any text.
    String,
    /// A floating point literal, `INF`, `-INF` or `NaN`.
    Double,
    /// An optionally signed decimal literal.
    Decimal,
    /// A `YYYY-MM-DD` calendar day, optionally with a timezone.
    Date,
    /// `true`, `false`, `1` or `0`.
    Boolean,
    /// One of a closed set of values.
    Enumeration(&'static Enumeration),
}

impl SimpleType {
    /// Checks a value against this type.
    ///
    /// Numeric, date and boolean values may carry surrounding whitespace;
    /// strings and enumeration values are compared as written.
    ///
    /// # Errors
    ///
    /// Returns a message describing why the value is not acceptable.
    pub fn check(self, value: &str) -> Result<(), String> {
        let collapsed = value.trim();
        let valid = match self {
            Self::String => true,
            Self::Double => DOUBLE.is_match(collapsed),
            Self::Decimal => DECIMAL.is_match(collapsed),
            Self::Date => is_calendar_day(collapsed),
            Self::Boolean => matches!(collapsed, "true" | "false" | "1" | "0"),
            Self::Enumeration(enumeration) => {
                if enumeration.contains(value) {
                    return Ok(());
                }
                return Err(format!("'{value}' is not a valid {enumeration}"));
            }
        };

        if valid {
            Ok(())
        } else {
            Err(format!("'{value}' is not a valid {self}"))
        }
    }
}

impl fmt::Display for SimpleType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Double => f.write_str("double"),
            Self::Decimal => f.write_str("decimal"),
            Self::Date => f.write_str("date"),
            Self::Boolean => f.write_str("boolean"),
            Self::Enumeration(enumeration) => write!(f, "{enumeration}"),
        }
    }
}

fn is_calendar_day(value: &str) -> bool {
    let Some(captures) = DATE.captures(value) else {
        return false;
    };
    let field = |i: usize| captures[i].parse::<u32>().ok();
    match (field(1), field(2), field(3)) {
        (Some(year), Some(month), Some(day)) => i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
            .is_some(),
        _ => false,
    }
}

/// An attribute declaration.
#[derive(Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Local name of the attribute.
    pub name: &'static str,
    /// Type of its value.
    pub ty: SimpleType,
    /// Whether the attribute must be present.
    pub required: bool,
}

/// What an element may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    /// Text only, of the given type. No attributes, no children.
    Simple(SimpleType),
    /// Attributes and an ordered sequence of child elements.
    Complex(&'static ComplexType),
}

/// Attributes and the ordered child sequence of a complex element.
#[derive(Debug, PartialEq, Eq)]
pub struct ComplexType {
    /// The type name, for display.
    pub name: &'static str,
    /// Declared attributes.
    pub attributes: &'static [Attribute],
    /// Declared children, in the order they must appear.
    pub children: &'static [ElementDecl],
}

/// An element declaration.
#[derive(Debug, PartialEq, Eq)]
pub struct ElementDecl {
    /// Local name of the element.
    pub name: &'static str,
    /// How many times it may appear within its parent.
    pub occurs: Occurs,
    /// What it may contain.
    pub content: Content,
}

impl ElementDecl {
    /// Declares a text-only element of the given type.
    #[must_use]
    pub const fn simple(name: &'static str, occurs: Occurs, ty: SimpleType) -> Self {
        Self {
            name,
            occurs,
            content: Content::Simple(ty),
        }
    }

    /// Declares a free-text element.
    #[must_use]
    pub const fn text(name: &'static str, occurs: Occurs) -> Self {
        Self::simple(name, occurs, SimpleType::String)
    }

    /// Declares an element with attributes and children.
    #[must_use]
    pub const fn complex(name: &'static str, occurs: Occurs, ty: &'static ComplexType) -> Self {
        Self {
            name,
            occurs,
            content: Content::Complex(ty),
        }
    }
}

/// A complete document schema.
#[derive(Debug, PartialEq, Eq)]
pub struct Schema {
    /// The namespace every element is expected to be in.
    pub namespace: &'static str,
    /// The root element.
    pub root: ElementDecl,
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "namespace: {}", self.namespace)?;
        write_element(f, &self.root, 0)
    }
}

fn write_element(f: &mut fmt::Formatter, element: &ElementDecl, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match element.content {
        Content::Simple(ty) => writeln!(f, "{indent}{} [{}]: {ty}", element.name, element.occurs),
        Content::Complex(ty) => {
            writeln!(f, "{indent}{} [{}]", element.name, element.occurs)?;
            for attribute in ty.attributes {
                writeln!(
                    f,
                    "{indent}  @{}: {}{}",
                    attribute.name,
                    attribute.ty,
                    if attribute.required { " (required)" } else { "" }
                )?;
            }
            for child in ty.children {
                write_element(f, child, depth + 1)?;
            }
            Ok(())
        }
    }
}
