use std::{fmt, num::NonZeroU32, str::FromStr};

/// The literal prefix every exhibit identifier starts with.
pub const PREFIX: &str = "EXH";

/// Total length of an identifier, prefix included.
pub const LENGTH: usize = 6;

/// An exhibit identifier.
///
/// Format: `EXH{NNN}`, where `NNN` is exactly three characters that parse as
/// a positive integer (e.g. `001`, `042`, `999`).
///
/// Examples: `EXH001`, `EXH120`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExhibitId {
    number: NonZeroU32,
}

impl ExhibitId {
    /// Create an identifier from its numeric part.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Number`] if the number does not fit the three-digit
    /// suffix.
    pub fn new(number: NonZeroU32) -> Result<Self, Error> {
        if number.get() > 999 {
            return Err(Error::Number(number.to_string()));
        }
        Ok(Self { number })
    }

    /// Returns the numeric part of the identifier.
    #[must_use]
    pub const fn number(&self) -> NonZeroU32 {
        self.number
    }
}

impl fmt::Display for ExhibitId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{PREFIX}{:03}", self.number)
    }
}

/// Errors that can occur while parsing an exhibit identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The identifier is empty.
    #[error("Exhibit identifier is empty")]
    Empty,

    /// The identifier does not start with `EXH`.
    #[error("Exhibit identifier '{0}' must start with '{prefix}'", prefix = PREFIX)]
    Prefix(String),

    /// The identifier is not exactly six characters long.
    #[error("Exhibit identifier '{0}' must be exactly {length} characters long", length = LENGTH)]
    Length(String),

    /// The numeric suffix is not a positive integer.
    #[error("Exhibit identifier number '{0}' is not a positive integer")]
    Number(String),
}

impl FromStr for ExhibitId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::Empty);
        }

        let Some(suffix) = s.strip_prefix(PREFIX) else {
            return Err(Error::Prefix(s.to_string()));
        };

        if s.chars().count() != LENGTH {
            return Err(Error::Length(s.to_string()));
        }

        let number = suffix
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| Error::Number(suffix.to_string()))?;

        Ok(Self { number })
    }
}

impl TryFrom<&str> for ExhibitId {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("EXH001", 1; "lowest")]
    #[test_case("EXH042", 42; "padded")]
    #[test_case("EXH999", 999; "highest")]
    fn parses_valid_identifiers(input: &str, expected: u32) {
        let id = ExhibitId::try_from(input).unwrap();
        assert_eq!(id.number().get(), expected);
    }

    #[test]
    fn empty_identifier_fails() {
        assert_eq!(ExhibitId::try_from(""), Err(Error::Empty));
    }

    #[test_case("ABC001"; "wrong prefix")]
    #[test_case("exh001"; "lowercase prefix")]
    #[test_case("001EXH"; "prefix at end")]
    fn wrong_prefix_fails(input: &str) {
        assert!(matches!(ExhibitId::try_from(input), Err(Error::Prefix(_))));
    }

    #[test_case("EXH1"; "too short")]
    #[test_case("EXH0001"; "too long")]
    #[test_case("EXH"; "prefix only")]
    fn wrong_length_fails(input: &str) {
        assert!(matches!(ExhibitId::try_from(input), Err(Error::Length(_))));
    }

    #[test_case("EXH000"; "zero")]
    #[test_case("EXHabc"; "letters")]
    #[test_case("EXH1a2"; "mixed")]
    #[test_case("EXH-01"; "negative")]
    fn non_positive_number_fails(input: &str) {
        assert!(matches!(ExhibitId::try_from(input), Err(Error::Number(_))));
    }

    #[test]
    fn display_pads_to_three_digits() {
        let id = ExhibitId::new(NonZeroU32::new(7).unwrap()).unwrap();
        assert_eq!(id.to_string(), "EXH007");
    }

    #[test]
    fn new_rejects_four_digit_numbers() {
        assert!(ExhibitId::new(NonZeroU32::new(1000).unwrap()).is_err());
    }

    #[test]
    fn error_display() {
        let error = Error::Prefix("ABC001".to_string());
        assert_eq!(
            error.to_string(),
            "Exhibit identifier 'ABC001' must start with 'EXH'"
        );
    }
}
