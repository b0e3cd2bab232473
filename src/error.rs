//! Error types for the ledger engine
//!
//! The engine has exactly two failure modes: input that does not validate,
//! and a position that does not reference an existing record. Both leave the
//! ledger untouched; no error here is fatal to the process.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum TallyError {
    /// Validation errors for transaction input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl TallyError {
    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type alias for ledger operations
pub type TallyResult<T> = Result<T, TallyError>;
