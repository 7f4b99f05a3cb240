//! Time-column formats.
//!
//! A format is written as a pattern such as `åååå` (year) or `ååååMmm`
//! (year, literal `M`, month). Each pattern character becomes one token:
//!
//! - lowercase letter: any ASCII digit
//! - uppercase letter: exactly that letter
//! - anything else: exactly that character
//!
//! A value matches when it has the same number of characters as the pattern
//! and every character satisfies its token.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeToken {
    Digit,
    Letter(char),
    Literal(char),
}

impl TimeToken {
    fn from_pattern_char(c: char) -> Self {
        if c.is_lowercase() {
            Self::Digit
        } else if c.is_uppercase() {
            Self::Letter(c)
        } else {
            Self::Literal(c)
        }
    }

    pub fn accepts(self, c: char) -> bool {
        match self {
            Self::Digit => c.is_ascii_digit(),
            Self::Letter(expected) | Self::Literal(expected) => c == expected,
        }
    }

    fn describe(self) -> String {
        match self {
            Self::Digit => "a digit".to_string(),
            Self::Letter(c) => format!("the letter '{c}'"),
            Self::Literal(c) => format!("the character '{c}'"),
        }
    }
}

/// Why a value failed to match a [`TimeFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeMismatch {
    Length { expected: usize, found: usize },
    Character { position: usize, expected: TimeToken },
}

impl fmt::Display for TimeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { expected, found } => {
                write!(f, "length {found}, expected {expected}")
            }
            Self::Character { position, expected } => write!(
                f,
                "character {} should be {}",
                position + 1,
                expected.describe()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TimeFormat {
    pattern: String,
    tokens: Vec<TimeToken>,
}

impl TimeFormat {
    /// Tokenises a pattern. A capital `Å` is read as the year placeholder `å`.
    pub fn parse(pattern: &str) -> Self {
        let pattern = pattern.trim().replace('Å', "å");
        let tokens = pattern.chars().map(TimeToken::from_pattern_char).collect();
        Self { pattern, tokens }
    }

    /// Extracts the pattern from a codelist text such as
    /// `"Tidsperioden for tabelldataene, enhet = år, format = åååå"`.
    pub fn from_codelist_text(text: &str) -> Option<Self> {
        let (_, pattern) = text.split_once("format = ")?;
        let pattern = pattern.trim();
        if pattern.is_empty() {
            None
        } else {
            Some(Self::parse(pattern))
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn tokens(&self) -> &[TimeToken] {
        &self.tokens
    }

    /// Number of characters a value must have.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// True when the format is digits only (e.g. a plain year).
    pub fn is_numeric(&self) -> bool {
        self.tokens.iter().all(|t| matches!(t, TimeToken::Digit))
    }

    pub fn check(&self, value: &str) -> Result<(), TimeMismatch> {
        let found = value.chars().count();
        if found != self.tokens.len() {
            return Err(TimeMismatch::Length {
                expected: self.tokens.len(),
                found,
            });
        }
        for (position, (token, c)) in self.tokens.iter().zip(value.chars()).enumerate() {
            if !token.accepts(c) {
                return Err(TimeMismatch::Character {
                    position,
                    expected: *token,
                });
            }
        }
        Ok(())
    }

    pub fn matches(&self, value: &str) -> bool {
        self.check(value).is_ok()
    }
}

impl From<String> for TimeFormat {
    fn from(pattern: String) -> Self {
        Self::parse(&pattern)
    }
}

impl From<TimeFormat> for String {
    fn from(format: TimeFormat) -> Self {
        format.pattern
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_pattern_is_numeric() {
        let format = TimeFormat::parse("åååå");
        assert_eq!(format.len(), 4);
        assert!(format.is_numeric());
        assert!(format.matches("2022"));
        assert!(!format.matches("22"));
        assert!(!format.matches("20x2"));
    }

    #[test]
    fn month_pattern_requires_letter() {
        let format = TimeFormat::parse("ååååMmm");
        assert!(!format.is_numeric());
        assert!(format.matches("2022M10"));
        assert_eq!(
            format.check("2022K10"),
            Err(TimeMismatch::Character {
                position: 4,
                expected: TimeToken::Letter('M'),
            })
        );
    }

    #[test]
    fn special_characters_are_literal() {
        let format = TimeFormat::parse("åååå-åååå");
        assert!(format.matches("2021-2022"));
        assert!(!format.matches("2021/2022"));
    }

    #[test]
    fn capital_aa_reads_as_year_digit() {
        let format = TimeFormat::parse("ÅÅÅÅ");
        assert!(format.is_numeric());
        assert_eq!(format.pattern(), "åååå");
    }

    #[test]
    fn pattern_from_codelist_text() {
        let format = TimeFormat::from_codelist_text(
            "Tidsperioden for tabelldataene, enhet = år, format = åååå",
        )
        .expect("format present");
        assert_eq!(format.pattern(), "åååå");
        assert!(TimeFormat::from_codelist_text("Kodeliste 1").is_none());
    }

    #[test]
    fn mismatch_messages() {
        let format = TimeFormat::parse("åååå");
        let err = format.check("202").unwrap_err();
        assert_eq!(err.to_string(), "length 3, expected 4");
    }
}
