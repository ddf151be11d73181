//! Errors raised by storefront domain values.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Rejections from record constructors, page requests and cart edits.
///
/// Catalog fetch failures are not domain errors; the storefront crate reports
/// those separately.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input out of range: blank product name, zero quantity, unknown sort key.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A rule linking several fields broke, e.g. a discount above the list
    /// price or adding a sold-out product.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An id string that is not a non-negative integer.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Cart line or order lookup by id found nothing.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
