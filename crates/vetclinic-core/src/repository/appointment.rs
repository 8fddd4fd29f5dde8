//! Appointment repository trait definition.

use chrono::{DateTime, Utc};

use vetclinic_types::appointment::{Appointment, AppointmentDetails, AppointmentId};
use vetclinic_types::error::RepositoryError;
use vetclinic_types::veterinarian::VeterinarianId;

/// Repository trait for appointment persistence.
pub trait AppointmentRepository: Send + Sync {
    /// Get an appointment with animal, owner and veterinarian attached.
    fn get_by_id(
        &self,
        id: &AppointmentId,
    ) -> impl std::future::Future<Output = Result<Option<AppointmentDetails>, RepositoryError>> + Send;

    /// Stage a new appointment. Returns the staged record.
    fn add(
        &self,
        appointment: &Appointment,
    ) -> impl std::future::Future<Output = Result<Appointment, RepositoryError>> + Send;

    /// Stage an update of an existing appointment.
    fn update(
        &self,
        appointment: &Appointment,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Stage a delete.
    fn delete(
        &self,
        appointment: &Appointment,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Appointments of one veterinarian overlapping `[start, end)`
    /// (`a.start < end && a.end > start`), ordered by start time ascending.
    fn list_by_veterinarian_and_range(
        &self,
        veterinarian_id: &VeterinarianId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<Vec<AppointmentDetails>, RepositoryError>> + Send;
}
