use thiserror::Error;

use super::form::FieldId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Field {0:?} does not accept text input")]
    NotATextField(FieldId),
}

/// A single field-local validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Required")]
    Required,
    #[error("Must be at least 1")]
    BelowMinimum,
    #[error("Must be a whole number")]
    NotANumber,
    #[error("Must be at most {max} characters")]
    TooLong { max: usize },
}

pub type DomainResult<T> = Result<T, DomainError>;
