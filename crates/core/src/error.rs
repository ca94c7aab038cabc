//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, stock checks). File and IO failures belong to the infra layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value could not be parsed (non-numeric quantity, malformed price or date).
    #[error("invalid input: {0}")]
    InputFormat(String),

    /// A value parsed but is not acceptable (e.g. zero quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A named grocery item does not exist in the inventory.
    #[error("no product named '{0}' found in the current stock")]
    NotFound(String),

    /// A requested product is absent from the chosen marketplace.
    #[error("'{0}' not found in the marketplace")]
    UnknownItem(String),

    /// A requested quantity exceeds what the marketplace has available.
    #[error(
        "the requested quantity ({requested}) for '{name}' exceeds the available quantity ({available})"
    )]
    InsufficientStock {
        name: String,
        requested: u32,
        available: u32,
    },
}

impl DomainError {
    pub fn input_format(msg: impl Into<String>) -> Self {
        Self::InputFormat(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn unknown_item(name: impl Into<String>) -> Self {
        Self::UnknownItem(name.into())
    }

    pub fn insufficient_stock(name: impl Into<String>, requested: u32, available: u32) -> Self {
        Self::InsufficientStock {
            name: name.into(),
            requested,
            available,
        }
    }

    /// Stable machine-readable code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InputFormat(_) => "input_format",
            DomainError::Validation(_) => "validation_error",
            DomainError::InvariantViolation(_) => "invariant_violation",
            DomainError::NotFound(_) => "not_found",
            DomainError::UnknownItem(_) => "unknown_item",
            DomainError::InsufficientStock { .. } => "insufficient_stock",
        }
    }
}
