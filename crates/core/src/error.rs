//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, missing references). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty text).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No item with this name exists in the catalog.
    #[error("unknown item: {0}")]
    UnknownItem(String),

    /// No supplier with this id exists in the catalog.
    #[error("unknown supplier: {0}")]
    UnknownSupplier(String),

    /// Another item already uses this name (case-insensitive).
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// A quantity was missing, negative, or out of range.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
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

    pub fn unknown_item(name: impl Into<String>) -> Self {
        Self::UnknownItem(name.into())
    }

    pub fn unknown_supplier(id: impl core::fmt::Display) -> Self {
        Self::UnknownSupplier(id.to_string())
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }
}
