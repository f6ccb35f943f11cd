/// Unified error types for the Boom service core
use crate::notify::Severity;
use thiserror::Error;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// No active identity for an operation that requires one
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Lookup by identifier matched nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Login identifier/password pair matched no account
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Registration against an identifier that is already taken
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Spend attempt exceeding the current balance
    #[error("Insufficient balance: need {required}, have {available}")]
    InsufficientBalance { required: u64, available: u64 },

    /// Upload rejected by kind-specific validation
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// General input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session persistence collaborator errors
    #[error("Session storage error: {0}")]
    Persistence(String),

    /// Media storage errors
    #[error("Media storage error: {0}")]
    MediaStorage(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotAuthenticated => "NotAuthenticated",
            CoreError::NotFound(_) => "NotFound",
            CoreError::InvalidCredentials => "InvalidCredentials",
            CoreError::AlreadyExists(_) => "AlreadyExists",
            CoreError::InsufficientBalance { .. } => "InsufficientBalance",
            CoreError::InvalidUpload(_) => "InvalidUpload",
            CoreError::Validation(_) => "InvalidRequest",
            CoreError::Persistence(_) => "PersistenceFailure",
            CoreError::MediaStorage(_) => "MediaStorageFailure",
            CoreError::Internal(_) | CoreError::Io(_) => "InternalError",
        }
    }

    /// Notification severity the presentation layer should surface this with
    pub fn severity(&self) -> Severity {
        match self {
            CoreError::NotAuthenticated | CoreError::InvalidCredentials => Severity::Warning,
            CoreError::InsufficientBalance { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Message suitable for a user-facing notification
    ///
    /// Internal failures are collapsed so details are not leaked to the UI.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Internal(_) | CoreError::Io(_) => "Something went wrong".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for store operations
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(CoreError::NotAuthenticated.code(), "NotAuthenticated");
        assert_eq!(
            CoreError::NotFound("video x".to_string()).code(),
            "NotFound"
        );
        assert_eq!(CoreError::InvalidCredentials.code(), "InvalidCredentials");
        assert_eq!(
            CoreError::InsufficientBalance {
                required: 100,
                available: 50
            }
            .code(),
            "InsufficientBalance"
        );
    }

    #[test]
    fn test_internal_errors_do_not_leak_details() {
        let err = CoreError::Internal("lock poisoned at wallet.rs:42".to_string());
        assert_eq!(err.user_message(), "Something went wrong");

        let err = CoreError::InsufficientBalance {
            required: 100,
            available: 50,
        };
        assert!(err.user_message().contains("100"));
    }

    #[test]
    fn test_severity_mapping() {
        assert!(matches!(
            CoreError::InvalidCredentials.severity(),
            Severity::Warning
        ));
        assert!(matches!(
            CoreError::Internal("boom".to_string()).severity(),
            Severity::Error
        ));
    }
}
