//! Shared domain types for the veterinary clinic API.
//!
//! This crate contains the clinic's domain records (Owner, Veterinarian,
//! Animal, Appointment), their request DTOs, the service outcome taxonomy
//! and the configuration schema.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod animal;
pub mod appointment;
pub mod config;
pub mod error;
pub mod id;
pub mod outcome;
pub mod owner;
pub mod veterinarian;
