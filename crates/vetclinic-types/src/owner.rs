use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::id::OwnerId;

/// A pet owner (clinic client). Email is unique across owners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to register a new owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOwnerRequest {
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}
