//! Domain errors

use thiserror::Error;

/// Errors produced by domain services and repositories.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// One or more input fields failed validation
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),

    /// The requested transition is not allowed from the current state
    #[error("{0}")]
    InvalidState(String),

    /// Login failure. Deliberately carries no detail about which field was wrong.
    #[error("Invalid username or password")]
    AuthenticationFailed,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    pub fn gadget_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Gadget",
            id: id.into(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
