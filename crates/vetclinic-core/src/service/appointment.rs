//! Appointment workflow service.
//!
//! Owns the status state machine: every requested status is migrated,
//! validated and checked against the cancellation window before it is
//! written, and a transition into `Cancelled` notifies the owner once.

use chrono::{DateTime, Utc};

use vetclinic_types::appointment::{
    Appointment, AppointmentDetails, AppointmentId, AppointmentStatus, AppointmentSummary,
    CreateAppointmentRequest,
};
use vetclinic_types::outcome::{ServiceError, ServiceResult};
use vetclinic_types::veterinarian::VeterinarianId;

use crate::notification::NotificationSender;
use crate::policy::status::{can_be_cancelled, is_valid_status, migrate_status, valid_statuses_message};
use crate::repository::UnitOfWork;
use crate::repository::appointment::AppointmentRepository;
use crate::service::storage_failure;

/// Service for booking, reading and moving appointments through their
/// lifecycle.
///
/// Generic over the unit of work and notification sender so the core never
/// depends on vetclinic-infra. Build one per request.
pub struct AppointmentService<U: UnitOfWork, N: NotificationSender> {
    uow: U,
    notifier: N,
}

impl<U: UnitOfWork, N: NotificationSender> AppointmentService<U, N> {
    pub fn new(uow: U, notifier: N) -> Self {
        Self { uow, notifier }
    }

    /// Book an appointment.
    ///
    /// A legacy requested status is migrated before anything is stored. The
    /// returned details are reloaded so the animal, owner and veterinarian
    /// are attached.
    pub async fn create(
        &self,
        request: Option<CreateAppointmentRequest>,
    ) -> ServiceResult<AppointmentDetails> {
        let Some(request) = request else {
            return Err(ServiceError::validation("Appointment request cannot be null."));
        };
        if request.animal_id.is_nil() || request.veterinarian_id.is_nil() {
            return Err(ServiceError::validation(
                "Animal id and veterinarian id are required.",
            ));
        }

        let status = migrate_status(request.status);
        let appointment = Appointment::new(
            request.start_time,
            request.end_time,
            request.animal_id,
            request.veterinarian_id,
        )
        .map_err(|_| ServiceError::validation("End time must be after start time"))?
        .with_status(status)
        .with_notes(request.notes);

        let appointments = self.uow.appointments();
        let created = appointments
            .add(&appointment)
            .await
            .map_err(|e| storage_failure("creating appointment", e))?;
        self.uow
            .save_changes()
            .await
            .map_err(|e| storage_failure("creating appointment", e))?;

        tracing::info!(
            appointment_id = %created.id,
            veterinarian_id = %created.veterinarian_id,
            status = %created.status,
            "appointment created"
        );

        let reloaded = appointments
            .get_by_id(&created.id)
            .await
            .map_err(|e| storage_failure("creating appointment", e))?;
        Ok(reloaded.unwrap_or_else(|| AppointmentDetails::bare(created)))
    }

    /// Load one appointment with its related records.
    pub async fn get_by_id(&self, id: &AppointmentId) -> ServiceResult<AppointmentDetails> {
        self.uow
            .appointments()
            .get_by_id(id)
            .await
            .map_err(|e| storage_failure("retrieving appointment", e))?
            .ok_or_else(|| ServiceError::not_found("Appointment not found."))
    }

    /// A veterinarian's schedule for `[start, end)`, ordered by start time.
    ///
    /// An empty schedule is a success. Missing animal or owner data shows up
    /// as "Unknown" in the summary.
    pub async fn list_by_veterinarian_and_range(
        &self,
        veterinarian_id: &VeterinarianId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<AppointmentSummary>> {
        if end < start {
            return Err(ServiceError::validation(
                "End date must be greater than or equal to start date",
            ));
        }

        let mut details = self
            .uow
            .appointments()
            .list_by_veterinarian_and_range(veterinarian_id, start, end)
            .await
            .map_err(|e| storage_failure("retrieving appointments", e))?;
        details.sort_by_key(|d| d.appointment.start_time());

        Ok(details.iter().map(AppointmentSummary::from_details).collect())
    }

    /// Move an appointment to `requested`, evaluated against `now`.
    ///
    /// Steps run in a fixed order: load, migrate, validate, cancellation
    /// window, write, notify. The notification is sent only when the
    /// appointment was not already cancelled, and only after the write is
    /// committed. A failed notification does not undo the write.
    pub async fn update_status(
        &self,
        id: &AppointmentId,
        requested: AppointmentStatus,
        now: DateTime<Utc>,
    ) -> ServiceResult {
        let appointments = self.uow.appointments();
        let Some(details) = appointments
            .get_by_id(id)
            .await
            .map_err(|e| storage_failure("updating appointment status", e))?
        else {
            return Err(ServiceError::not_found("Appointment not found."));
        };

        let status = migrate_status(requested);
        if !is_valid_status(status) {
            return Err(ServiceError::validation(valid_statuses_message()));
        }

        if status == AppointmentStatus::Cancelled
            && !can_be_cancelled(details.appointment.start_time(), now)
        {
            tracing::warn!(
                appointment_id = %id,
                start_time = %details.appointment.start_time(),
                "cancellation rejected inside notice window"
            );
            return Err(ServiceError::business_rule(
                "Cannot cancel appointment within 1 hour of its start time",
            ));
        }

        let previous = details.appointment.status;
        let updated = details.appointment.clone().with_status(status);
        appointments
            .update(&updated)
            .await
            .map_err(|e| storage_failure("updating appointment status", e))?;
        self.uow
            .save_changes()
            .await
            .map_err(|e| storage_failure("updating appointment status", e))?;

        tracing::info!(
            appointment_id = %id,
            from = %previous,
            to = %status,
            "appointment status updated"
        );

        if status == AppointmentStatus::Cancelled && previous != AppointmentStatus::Cancelled {
            self.notify_cancellation(&details);
        }

        Ok(())
    }

    fn notify_cancellation(&self, details: &AppointmentDetails) {
        let resolved = details
            .animal
            .as_ref()
            .and_then(|a| a.owner.as_ref().map(|owner| (owner, &a.animal)));

        match resolved {
            Some((owner, animal)) => self.notifier.send_appointment_cancellation(
                &owner.email,
                &animal.name,
                details.appointment.start_time(),
            ),
            None => tracing::warn!(
                appointment_id = %details.appointment.id,
                "cancellation notice skipped: animal or owner missing"
            ),
        }
    }
}
