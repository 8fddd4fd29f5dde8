//! HTTP request handlers for the REST API.

pub mod animal;
pub mod appointment;
pub mod owner;
pub mod veterinarian;
