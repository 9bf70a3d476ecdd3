//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Merchant account payload is structurally incomplete or malformed
    #[error("Invalid merchant account: {field} {reason}")]
    InvalidAccount { field: String, reason: String },

    /// Merchant account not found
    #[error("Merchant account not found: {0}")]
    NotFound(String),

    /// Underlying store unreachable or write rejected
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),

    /// More than one account is flagged as default
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Configuration payload rejected
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Sealing or opening a sensitive setting failed
    #[error("Secret error: {0}")]
    SecretError(String),
}

impl CoreError {
    /// Whether it is expected behavior (bad input, missing record) is used for log classification
    /// and for the host's client-error/server-error split.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidAccount { .. } | Self::NotFound(_) | Self::ValidationError(_) => true,
            Self::PersistenceFailure(_)
            | Self::InvariantViolation(_)
            | Self::SerializationError(_)
            | Self::SecretError(_) => false,
        }
    }

    pub(crate) fn invalid_account(field: &str, reason: &str) -> Self {
        Self::InvalidAccount {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
