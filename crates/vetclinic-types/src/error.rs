use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while building domain values.
#[derive(Debug, Error, PartialEq)]
pub enum AppointmentError {
    #[error("end time {end} must be after start time {start}")]
    EndNotAfterStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Errors from repository operations (used by trait definitions in vetclinic-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("constraint violation: {0}")]
    Constraint(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_appointment_error_display() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let err = AppointmentError::EndNotAfterStart { start, end: start };
        assert!(err.to_string().contains("must be after start time"));
    }
}
