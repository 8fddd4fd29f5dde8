use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::id::VeterinarianId;

/// A veterinarian who handles appointments. Email is unique across vets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Veterinarian {
    pub id: VeterinarianId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub specialization: Option<String>,
    /// Inactive vets keep their history but are not offered new bookings.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Veterinarian {
    /// "First Last", as shown on schedules.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Request to register a new veterinarian.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVeterinarianRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub specialization: Option<String>,
}
