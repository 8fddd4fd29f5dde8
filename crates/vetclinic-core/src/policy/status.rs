//! Appointment status policy.
//!
//! Requested statuses go through three steps, always in this order:
//! 1. [`migrate_status`] maps legacy values onto the canonical set
//! 2. [`is_valid_status`] checks the result is canonical
//! 3. a `Cancelled` result must also pass [`can_be_cancelled`]
//!
//! Because migration comes first, a request for the legacy `NoShow` status
//! is treated as a cancellation and is subject to the one-hour rule.

use chrono::{DateTime, Duration, Utc};

use vetclinic_types::appointment::AppointmentStatus;

/// The only statuses that may be stored.
pub const CANONICAL_STATUSES: [AppointmentStatus; 3] = [
    AppointmentStatus::Scheduled,
    AppointmentStatus::Completed,
    AppointmentStatus::Cancelled,
];

/// Minimum lead time between "now" and the start of an appointment for it
/// to be cancelled.
pub fn cancellation_notice() -> Duration {
    Duration::hours(1)
}

/// Map legacy statuses onto canonical ones; canonical values pass through.
pub fn migrate_status(status: AppointmentStatus) -> AppointmentStatus {
    match status {
        AppointmentStatus::InProgress => AppointmentStatus::Scheduled,
        AppointmentStatus::NoShow => AppointmentStatus::Cancelled,
        other => other,
    }
}

pub fn is_valid_status(status: AppointmentStatus) -> bool {
    CANONICAL_STATUSES.contains(&status)
}

/// Validation message listing the canonical statuses.
pub fn valid_statuses_message() -> String {
    let names: Vec<String> = CANONICAL_STATUSES.iter().map(|s| s.to_string()).collect();
    format!("Invalid status. Valid statuses are: {}", names.join(", "))
}

/// True when the appointment starts at least [`cancellation_notice`] after
/// `now`. Exactly one hour is allowed.
pub fn can_be_cancelled(start_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start_time.signed_duration_since(now) >= cancellation_notice()
}
