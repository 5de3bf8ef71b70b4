//! Error types for sempro
//!
//! Each error type has a corresponding error code for programmatic handling.

use std::fmt;

use thiserror::Error;

/// Result type alias for sempro operations
pub type Result<T> = std::result::Result<T, SemproError>;

/// Message shown when the server rejects a request without saying why.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed. Please try again.";

/// A single form field that failed client-side validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field
    pub field: String,

    /// Human-readable reason
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All field errors collected from one form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors(Vec::new())
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up the message reported for a field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Turn the collected errors into a result
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(SemproError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Main error type for all sempro operations
#[derive(Debug, Error)]
pub enum SemproError {
    /// Client-side form validation failed; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status that is not a business rejection
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Server refused the request on business grounds (message is verbatim)
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Missing or rejected credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Token refresh failed; the session has been torn down
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// A lifecycle gate denied the operation
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// A submission for this form is already in flight
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    /// Seminar status transition error
    #[error("State transition error: {0}")]
    StateTransition(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SemproError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            SemproError::Validation(_) => "VALIDATION",
            SemproError::Network(_) => "NETWORK",
            SemproError::Http { .. } => "HTTP",
            SemproError::Rejected { .. } => "REJECTED",
            SemproError::Unauthorized(_) => "UNAUTHORIZED",
            SemproError::SessionExpired(_) => "SESSION_EXPIRED",
            SemproError::AccessDenied(_) => "ACCESS_DENIED",
            SemproError::AlreadySubmitting => "ALREADY_SUBMITTING",
            SemproError::StateTransition(_) => "STATE_TRANSITION",
            SemproError::InvalidJson(_) => "INVALID_JSON",
            SemproError::FileNotFound(_) => "FILE_NOT_FOUND",
            SemproError::ConfigError(_) => "CONFIG_ERROR",
            SemproError::Io(_) => "IO_ERROR",
        }
    }

    /// Whether the user may simply resubmit the same request.
    ///
    /// Validation errors need the form fixed first, and an expired session
    /// needs a new login.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SemproError::Network(_)
                | SemproError::Http { .. }
                | SemproError::Rejected { .. }
                | SemproError::AlreadySubmitting
        )
    }

    /// What the user can do next, shown under the error message
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SemproError::Validation(_) => Some("fix the fields above and try again"),
            SemproError::Unauthorized(_) | SemproError::SessionExpired(_) => {
                Some("log in again with `sempro login`")
            }
            e if e.is_retryable() => Some("nothing was changed locally; you can retry"),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SemproError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return SemproError::InvalidJson(error.to_string());
        }
        match error.status() {
            Some(status) => SemproError::Http {
                status: status.as_u16(),
                message: error.to_string(),
            },
            None => SemproError::Network(error.to_string()),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &SemproError) -> i32 {
    match error {
        SemproError::Validation(_) => 2,
        SemproError::Unauthorized(_) | SemproError::SessionExpired(_) => 3,
        SemproError::AccessDenied(_) => 4,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SemproError::Validation(FieldErrors::new()).code(), "VALIDATION");
        assert_eq!(SemproError::Network("down".into()).code(), "NETWORK");
        assert_eq!(
            SemproError::Rejected { status: 409, message: "dup".into() }.code(),
            "REJECTED"
        );
        assert_eq!(SemproError::SessionExpired("x".into()).code(), "SESSION_EXPIRED");
        assert_eq!(SemproError::AccessDenied("x".into()).code(), "ACCESS_DENIED");
        assert_eq!(SemproError::AlreadySubmitting.code(), "ALREADY_SUBMITTING");
        assert_eq!(SemproError::ConfigError("x".into()).code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(to_exit_code(&SemproError::Validation(FieldErrors::new())), 2);
        assert_eq!(to_exit_code(&SemproError::SessionExpired("x".into())), 3);
        assert_eq!(to_exit_code(&SemproError::AccessDenied("x".into())), 4);
        assert_eq!(to_exit_code(&SemproError::Network("x".into())), 1);
    }

    #[test]
    fn test_rejected_displays_server_message_verbatim() {
        let err = SemproError::Rejected {
            status: 409,
            message: "Assessment already submitted".into(),
        };
        assert_eq!(err.to_string(), "Assessment already submitted");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_validation_is_not_retryable() {
        let mut errors = FieldErrors::new();
        errors.push("title", "is required");
        let err = errors.into_result().unwrap_err();
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("title: is required"));
    }

    #[test]
    fn test_hints() {
        assert_eq!(
            SemproError::Network("down".into()).hint(),
            Some("nothing was changed locally; you can retry")
        );
        assert_eq!(
            SemproError::SessionExpired("x".into()).hint(),
            Some("log in again with `sempro login`")
        );
        assert!(SemproError::Validation(FieldErrors::new())
            .hint()
            .unwrap()
            .contains("fix the fields"));
        assert_eq!(SemproError::AccessDenied("x".into()).hint(), None);
    }

    #[test]
    fn test_field_errors_lookup() {
        let mut errors = FieldErrors::new();
        errors.push("writingScore", "must be between 0 and 100");
        assert_eq!(errors.get("writingScore"), Some("must be between 0 and 100"));
        assert_eq!(errors.get("titleScore"), None);
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_wrap_error() {
        let wrapped = SemproError::wrap("inner error", "outer context");
        assert_eq!(wrapped.code(), "WRAPPED_ERROR");
        assert!(wrapped.to_string().contains("outer context"));
        assert!(wrapped.to_string().contains("inner error"));
    }
}
