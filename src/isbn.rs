//! ISBN normalization and ISBN-13 to ISBN-10 conversion.
//!
//! For books, the Amazon ASIN is the ISBN-10, so ISBN lookups are turned
//! into ASIN lookups by converting 978-prefixed ISBN-13s.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsbnError {
    #[error("invalid ISBN '{0}': expected 10 or 13 digits")]
    InvalidLength(String),

    #[error("invalid ISBN '{0}': unexpected character")]
    InvalidCharacter(String),

    #[error("invalid ISBN '{0}': check digit mismatch")]
    Checksum(String),

    #[error("ISBN '{0}' has no ISBN-10 form")]
    NoIsbn10(String),
}

/// A validated ISBN, stored without separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Isbn {
    Isbn10(String),
    Isbn13(String),
}

impl Isbn {
    /// Returns the ISBN-10 form. 979-prefixed ISBN-13s have none.
    pub fn to_isbn10(&self) -> Result<String, IsbnError> {
        match self {
            Isbn::Isbn10(s) => Ok(s.clone()),
            Isbn::Isbn13(s) => {
                if !s.starts_with("978") {
                    return Err(IsbnError::NoIsbn10(s.clone()));
                }
                let body = &s[3..12];
                let mut out = body.to_string();
                out.push(isbn10_check_digit(body));
                Ok(out)
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Isbn::Isbn10(s) | Isbn::Isbn13(s) => s,
        }
    }
}

impl FromStr for Isbn {
    type Err = IsbnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .trim_start_matches("ISBN")
            .trim_start_matches(':')
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        // Lengths and splits below are byte-based.
        if !normalized.is_ascii() {
            return Err(IsbnError::InvalidCharacter(s.to_string()));
        }

        match normalized.len() {
            10 => {
                let (body, check) = normalized.split_at(9);
                if !body.chars().all(|c| c.is_ascii_digit())
                    || !check.chars().all(|c| c.is_ascii_digit() || c == 'X')
                {
                    return Err(IsbnError::InvalidCharacter(s.to_string()));
                }
                if !check.starts_with(isbn10_check_digit(body)) {
                    return Err(IsbnError::Checksum(s.to_string()));
                }
                Ok(Isbn::Isbn10(normalized))
            }
            13 => {
                if !normalized.chars().all(|c| c.is_ascii_digit()) {
                    return Err(IsbnError::InvalidCharacter(s.to_string()));
                }
                let (body, check) = normalized.split_at(12);
                if !check.starts_with(isbn13_check_digit(body)) {
                    return Err(IsbnError::Checksum(s.to_string()));
                }
                Ok(Isbn::Isbn13(normalized))
            }
            _ => Err(IsbnError::InvalidLength(s.to_string())),
        }
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn digits(body: &str) -> impl Iterator<Item = u32> + '_ {
    body.chars().filter_map(|c| c.to_digit(10))
}

/// `body` is the first 9 digits.
fn isbn10_check_digit(body: &str) -> char {
    let sum: u32 = digits(body).zip((2..=10).rev()).map(|(d, w)| d * w).sum();
    match (11 - sum % 11) % 11 {
        10 => 'X',
        n => char::from_digit(n, 10).unwrap_or('0'),
    }
}

/// `body` is the first 12 digits.
fn isbn13_check_digit(body: &str) -> char {
    let sum: u32 =
        digits(body).enumerate().map(|(i, d)| if i % 2 == 0 { d } else { d * 3 }).sum();
    char::from_digit((10 - sum % 10) % 10, 10).unwrap_or('0')
}
