//! Business logic services (use cases).
//!
//! Services orchestrate repository calls, scheduling rules and
//! notifications. They depend on traits (ports) -- never on concrete
//! infrastructure implementations -- and report every outcome as a
//! [`ServiceResult`](vetclinic_types::outcome::ServiceResult).

pub mod animal;
pub mod appointment;
pub mod owner;
pub mod veterinarian;

#[cfg(test)]
pub(crate) mod fakes;

use vetclinic_types::error::RepositoryError;
use vetclinic_types::outcome::ServiceError;

/// Convert a storage failure into an `InternalError`.
///
/// The underlying error is logged; only the action reaches the caller.
pub(crate) fn storage_failure(action: &str, err: RepositoryError) -> ServiceError {
    tracing::error!(error = %err, action, "storage operation failed");
    ServiceError::internal(format!("An error occurred while {action}."))
}

/// Minimal email shape check: something on both sides of a single `@`.
pub(crate) fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
