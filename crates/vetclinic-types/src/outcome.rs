//! Service outcome taxonomy.
//!
//! Every workflow operation returns a [`ServiceResult`]. Success carries the
//! payload (or `()` for operations without one); failure is a
//! [`ServiceError`] that always has a kind and a human-readable message.
//! Nothing else crosses the service boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fmt;

/// Classification of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// A referenced record does not exist.
    NotFound,
    /// Malformed or missing input, including unknown status values.
    ValidationError,
    /// Well-formed input rejected by a scheduling rule.
    BusinessRuleViolation,
    /// Reserved; no operation in this crate family produces it yet.
    Unauthorized,
    /// Unexpected failure in a collaborator (storage, I/O).
    InternalError,
}

impl ErrorKind {
    /// Machine-readable code used in API envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::ValidationError => "VALIDATION_ERROR",
            ErrorKind::BusinessRuleViolation => "BUSINESS_RULE_VIOLATION",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }

    /// HTTP status code this kind maps to at the transport edge.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::Unauthorized => 401,
            ErrorKind::ValidationError | ErrorKind::BusinessRuleViolation => 400,
            ErrorKind::InternalError => 500,
        }
    }

    fn fallback_message(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "The requested record was not found.",
            ErrorKind::ValidationError => "The request is invalid.",
            ErrorKind::BusinessRuleViolation => "The request violates a scheduling rule.",
            ErrorKind::Unauthorized => "Not authorized.",
            ErrorKind::InternalError => "An internal error occurred.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A failed service operation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ServiceError {
    kind: ErrorKind,
    message: String,
}

impl ServiceError {
    /// Build a failure. A blank message is replaced with a generic one for
    /// the kind, so a failure never reaches a client without text.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            kind.fallback_message().to_string()
        } else {
            message
        };
        Self { kind, message }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message)
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BusinessRuleViolation, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalError, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of a service operation. `ServiceResult` (no payload) is the
/// non-generic form.
pub type ServiceResult<T = ()> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_message_gets_fallback() {
        let err = ServiceError::not_found("   ");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!err.message().trim().is_empty());
    }

    #[test]
    fn test_display_is_message() {
        let err = ServiceError::business_rule("Cannot cancel appointment within 1 hour of its start time");
        assert_eq!(
            err.to_string(),
            "Cannot cancel appointment within 1 hour of its start time"
        );
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorKind::NotFound.http_status(), 404);
        assert_eq!(ErrorKind::Unauthorized.http_status(), 401);
        assert_eq!(ErrorKind::ValidationError.http_status(), 400);
        assert_eq!(ErrorKind::BusinessRuleViolation.http_status(), 400);
        assert_eq!(ErrorKind::InternalError.http_status(), 500);
    }

    #[test]
    fn test_kind_serializes_as_code() {
        let json = serde_json::to_string(&ErrorKind::BusinessRuleViolation).unwrap();
        assert_eq!(json, "\"BUSINESS_RULE_VIOLATION\"");
        assert_eq!(ErrorKind::BusinessRuleViolation.code(), "BUSINESS_RULE_VIOLATION");
    }
}
