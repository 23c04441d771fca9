//! Session-specific error types surfaced by the application services.

use crate::domain::foundation::{DomainError, ErrorCode, SessionCode};
use crate::ports::StoreError;

/// Errors surfaced by session, progress, and account operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No session stored under the given code.
    NotFound(SessionCode),
    /// No account data stored for the given email.
    EmailNotFound(String),
    /// Validation failed; nothing was written.
    ValidationFailed { field: String, message: String },
    /// Operation does not fit the session's current state.
    InvalidState(String),
    /// Verification code missing, expired, or mismatched.
    /// Deliberately coarse: callers render it as "invalid or expired".
    CodeInvalidOrExpired,
    /// Underlying store failure.
    Storage(String),
}

impl SessionError {
    pub fn not_found(code: SessionCode) -> Self {
        SessionError::NotFound(code)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        SessionError::InvalidState(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        SessionError::Storage(message.into())
    }

    /// Maps to the foundation error code taxonomy.
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::EmailNotFound(_) => ErrorCode::SessionNotFound,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::CodeInvalidOrExpired => ErrorCode::CodeExpired,
            SessionError::Storage(_) => ErrorCode::StorageError,
        }
    }

    /// User-facing message.
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(code) => format!("Session not found: {}", code),
            SessionError::EmailNotFound(email) => {
                format!("No sessions found for email: {}", email)
            }
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::InvalidState(msg) => format!("Invalid state: {}", msg),
            SessionError::CodeInvalidOrExpired => {
                "Verification code is invalid or expired".to_string()
            }
            SessionError::Storage(msg) => format!("Storage error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                SessionError::ValidationFailed {
                    field,
                    message: err.message,
                }
            }
            ErrorCode::CodeExpired | ErrorCode::CodeMismatch => SessionError::CodeInvalidOrExpired,
            ErrorCode::StorageError => SessionError::Storage(err.message),
            _ => SessionError::InvalidState(err.message),
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        SessionError::Storage(err.to_string())
    }
}
