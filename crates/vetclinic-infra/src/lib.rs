//! Infrastructure layer for the veterinary clinic.
//!
//! Contains implementations of the ports defined in `vetclinic-core`:
//! SQLite storage behind a request-scoped unit of work, a log-backed
//! notification sender, seed data, and configuration loading.

pub mod config;
pub mod notification;
pub mod sqlite;
