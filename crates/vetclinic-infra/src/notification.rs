//! Notification sender that writes cancellation notices to the log.
//!
//! There is no mail transport; the rendered notice is emitted as a
//! structured `tracing` event on the `vetclinic::notification` target.

use chrono::{DateTime, Utc};

use vetclinic_core::notification::{CancellationNotice, NotificationSender};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationSender;

impl LogNotificationSender {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSender for LogNotificationSender {
    fn send_appointment_cancellation(
        &self,
        owner_email: &str,
        animal_name: &str,
        appointment_start: DateTime<Utc>,
    ) {
        let notice = CancellationNotice::new(owner_email, animal_name, appointment_start);
        tracing::info!(
            target: "vetclinic::notification",
            to = %notice.to,
            subject = %notice.subject,
            body = %notice.body,
            "cancellation notice sent"
        );
    }
}
