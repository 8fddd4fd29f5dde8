use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub use crate::id::AnimalId;
use crate::owner::{Owner, OwnerId};

/// An animal (patient). Belongs to exactly one owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub owner_id: OwnerId,
    pub created_at: DateTime<Utc>,
}

/// An animal loaded together with its owner.
///
/// `owner` is `None` when the owner row could not be resolved; callers decide
/// what to show instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalWithOwner {
    #[serde(flatten)]
    pub animal: Animal,
    pub owner: Option<Owner>,
}

/// Request to register a new animal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAnimalRequest {
    pub name: String,
    pub birth_date: NaiveDate,
    pub owner_id: OwnerId,
}
