use thiserror::Error;

use super::models::FormField;

/// Why a numeric form field could not be turned into a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("not a number")]
    NotANumber,
    #[error("must not be negative")]
    Negative,
    #[error("too large")]
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// One or more required text fields were empty at submit time.
    #[error("Please fill in all fields (missing: {})", join_fields(.fields))]
    MissingFields { fields: Vec<FormField> },
    /// A numeric field held text that does not parse as a count.
    #[error("{field} \"{}\" is invalid: {reason}", abbreviate(.input))]
    InvalidNumber {
        field: FormField,
        input: String,
        reason: NumberError,
    },
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

const ECHO_LIMIT: usize = 16;

/// Shortens echoed user input so messages stay readable.
fn abbreviate(input: &str) -> String {
    if input.chars().count() <= ECHO_LIMIT {
        return input.to_string();
    }
    let head: String = input.chars().take(ECHO_LIMIT).collect();
    format!("{head}…")
}

pub type DomainResult<T> = Result<T, DomainError>;
