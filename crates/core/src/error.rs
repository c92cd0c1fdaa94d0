//! Record error model.

use thiserror::Error;

/// Result type used when building entities from records.
pub type RecordResult<T> = Result<T, RecordError>;

/// Field-level failure raised by the tokenizer or a field conversion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The record ended before this field.
    #[error("missing field `{field}`")]
    MissingField { field: &'static str },

    /// The field was present but blank.
    #[error("field `{field}` is empty")]
    EmptyField { field: &'static str },

    /// The field could not be converted to its expected type.
    #[error("field `{field}` has invalid value {value:?}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The record carried more fields than the entity consumes.
    #[error("unexpected trailing field {value:?}")]
    TrailingField { value: String },
}

impl ParseError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn empty(field: &'static str) -> Self {
        Self::EmptyField { field }
    }

    pub fn invalid(field: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub fn trailing(value: impl Into<String>) -> Self {
        Self::TrailingField {
            value: value.into(),
        }
    }
}

/// Failure to construct a single entity from its record.
///
/// Construction errors are fatal to that one record only. Whether the run
/// skips the record or aborts is up to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A field was malformed or missing.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// An order record listed no item requests.
    #[error("order for {customer} [{product}] requests no items")]
    EmptyOrder { customer: String, product: String },
}

impl RecordError {
    pub fn empty_order(customer: impl Into<String>, product: impl Into<String>) -> Self {
        Self::EmptyOrder {
            customer: customer.into(),
            product: product.into(),
        }
    }

    pub fn is_empty_order(&self) -> bool {
        matches!(self, Self::EmptyOrder { .. })
    }
}
