//! Notification port.
//!
//! The workflow only ever sends one kind of message: a notice to the owner
//! that an appointment was cancelled. Delivery is fire-and-forget; the status
//! change is already committed when the sender is called, so implementations
//! must swallow (and log) their own failures rather than panic.

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Outbound notification channel (email, SMS, log sink...).
pub trait NotificationSender: Send + Sync {
    /// Tell an owner that their animal's appointment was cancelled.
    fn send_appointment_cancellation(
        &self,
        owner_email: &str,
        animal_name: &str,
        appointment_start: DateTime<Utc>,
    );
}

impl<T: NotificationSender + ?Sized> NotificationSender for Arc<T> {
    fn send_appointment_cancellation(
        &self,
        owner_email: &str,
        animal_name: &str,
        appointment_start: DateTime<Utc>,
    ) {
        (**self).send_appointment_cancellation(owner_email, animal_name, appointment_start)
    }
}

/// Rendered cancellation message, shared by every sender implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationNotice {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl CancellationNotice {
    pub const SUBJECT: &'static str = "Appointment Cancellation Notice";

    pub fn new(owner_email: &str, animal_name: &str, appointment_start: DateTime<Utc>) -> Self {
        let when = appointment_start.format("%Y-%m-%d %H:%M");
        let body = format!(
            "Dear Pet Owner,\n\
             Your appointment for {animal_name} scheduled on {when} has been cancelled.\n\
             Please contact us to reschedule."
        );
        Self {
            to: owner_email.to_string(),
            subject: Self::SUBJECT.to_string(),
            body,
        }
    }
}
