//! Numeric parsing for the duration and calories inputs.
//!
//! The form accepts free text in its numeric fields, so turning that text into
//! a count is an explicit step with two policies:
//!
//! * [`NumericParsing::Lenient`] reads the longest run of leading digits and
//!   ignores whatever follows (`"30abc"` becomes `30`).
//! * [`NumericParsing::Strict`] accepts only digits, optionally surrounded by
//!   whitespace.
//!
//! Both policies report failure as a [`NumberError`] instead of producing a
//! placeholder value.

use super::errors::NumberError;

/// How numeric form input is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericParsing {
    /// Leading digits are taken, trailing text is ignored.
    #[default]
    Lenient,
    /// The whole field must be a number.
    Strict,
}

impl NumericParsing {
    /// Parses `input` as a non-negative count under this policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use fitlog::domain::{NumericParsing, NumberError};
    ///
    /// assert_eq!(NumericParsing::Lenient.parse("30abc"), Ok(30));
    /// assert_eq!(NumericParsing::Strict.parse("30abc"), Err(NumberError::NotANumber));
    /// ```
    pub fn parse(self, input: &str) -> Result<u32, NumberError> {
        match self {
            NumericParsing::Lenient => parse_leading_count(input),
            NumericParsing::Strict => parse_exact_count(input),
        }
    }
}

fn parse_leading_count(input: &str) -> Result<u32, NumberError> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(NumberError::NotANumber);
    }
    let digits = &rest[..digits_len];

    if negative {
        // "-0" is still zero
        if digits.bytes().all(|b| b == b'0') {
            return Ok(0);
        }
        return Err(NumberError::Negative);
    }

    accumulate(digits)
}

fn parse_exact_count(input: &str) -> Result<u32, NumberError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NumberError::NotANumber);
    }
    accumulate(trimmed)
}

fn accumulate(digits: &str) -> Result<u32, NumberError> {
    digits.bytes().try_fold(0u32, |acc, b| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add(u32::from(b - b'0')))
            .ok_or(NumberError::OutOfRange)
    })
}
