use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::animal::{AnimalId, AnimalWithOwner};
use crate::error::AppointmentError;
pub use crate::id::AppointmentId;
use crate::veterinarian::{Veterinarian, VeterinarianId};

/// Shown in summaries when the related animal or owner cannot be resolved.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Appointment lifecycle states.
///
/// - Scheduled: booked, not yet seen
/// - Completed: the visit took place
/// - Cancelled: called off at least an hour before the start
///
/// `InProgress` and `NoShow` are legacy values. They are still accepted as
/// input and may exist in old data, but are migrated to a canonical state
/// before any rule is applied or anything is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    /// Legacy; migrates to `Scheduled`.
    InProgress,
    Completed,
    Cancelled,
    /// Legacy; migrates to `Cancelled`.
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub fn is_legacy(&self) -> bool {
        matches!(self, AppointmentStatus::InProgress | AppointmentStatus::NoShow)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "Scheduled"),
            AppointmentStatus::InProgress => write!(f, "InProgress"),
            AppointmentStatus::Completed => write!(f, "Completed"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
            AppointmentStatus::NoShow => write!(f, "NoShow"),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    /// Case-insensitive; `in_progress`, `in-progress`, `no_show` and
    /// `no-show` are accepted alongside the PascalCase names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "inprogress" => Ok(AppointmentStatus::InProgress),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "noshow" => Ok(AppointmentStatus::NoShow),
            _ => Err(format!("invalid appointment status: '{s}'")),
        }
    }
}

/// A booked visit of one animal with one veterinarian.
///
/// `end_time > start_time` always holds: the times are private and every
/// constructor, deserialization included, goes through [`Appointment::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AppointmentRecord")]
pub struct Appointment {
    pub id: AppointmentId,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub animal_id: AnimalId,
    pub veterinarian_id: VeterinarianId,
}

/// Unchecked wire form of [`Appointment`].
#[derive(Deserialize)]
struct AppointmentRecord {
    id: AppointmentId,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    status: AppointmentStatus,
    notes: Option<String>,
    animal_id: AnimalId,
    veterinarian_id: VeterinarianId,
}

impl TryFrom<AppointmentRecord> for Appointment {
    type Error = AppointmentError;

    fn try_from(record: AppointmentRecord) -> Result<Self, Self::Error> {
        Ok(Appointment::new(
            record.start_time,
            record.end_time,
            record.animal_id,
            record.veterinarian_id,
        )?
        .with_id(record.id)
        .with_status(record.status)
        .with_notes(record.notes))
    }
}

impl Appointment {
    /// Build a `Scheduled` appointment with a fresh id.
    pub fn new(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        animal_id: AnimalId,
        veterinarian_id: VeterinarianId,
    ) -> Result<Self, AppointmentError> {
        if end_time <= start_time {
            return Err(AppointmentError::EndNotAfterStart {
                start: start_time,
                end: end_time,
            });
        }

        Ok(Self {
            id: AppointmentId::new(),
            start_time,
            end_time,
            status: AppointmentStatus::Scheduled,
            notes: None,
            animal_id,
            veterinarian_id,
        })
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Keep an existing identity, e.g. when loading a stored row.
    pub fn with_id(mut self, id: AppointmentId) -> Self {
        self.id = id;
        self
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}

/// An appointment loaded together with its animal (and the animal's owner)
/// and its veterinarian.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDetails {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub animal: Option<AnimalWithOwner>,
    pub veterinarian: Option<Veterinarian>,
}

impl AppointmentDetails {
    /// Details with no related records attached.
    pub fn bare(appointment: Appointment) -> Self {
        Self {
            appointment,
            animal: None,
            veterinarian: None,
        }
    }
}

/// Schedule row returned by the per-veterinarian listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentSummary {
    pub id: AppointmentId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub animal_name: String,
    pub owner_name: String,
    pub status: AppointmentStatus,
}

impl AppointmentSummary {
    /// Project details into a summary, falling back to [`UNKNOWN_NAME`] for
    /// a missing animal or owner.
    pub fn from_details(details: &AppointmentDetails) -> Self {
        let animal_name = details
            .animal
            .as_ref()
            .map(|a| a.animal.name.clone())
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let owner_name = details
            .animal
            .as_ref()
            .and_then(|a| a.owner.as_ref())
            .map(|o| o.name.clone())
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());

        Self {
            id: details.appointment.id,
            start_time: details.appointment.start_time(),
            end_time: details.appointment.end_time(),
            animal_name,
            owner_name,
            status: details.appointment.status,
        }
    }
}

/// Request to book an appointment. `status` defaults to `Scheduled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub animal_id: AnimalId,
    pub veterinarian_id: VeterinarianId,
    #[serde(default)]
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

/// Body of a status change. Kept as a string so unknown values can be
/// reported with the list of valid statuses rather than a parse error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: String,
}
