//! Scheduling rules, repository ports and workflow services for the
//! veterinary clinic.
//!
//! This crate defines the "ports" (repository and notification traits) that
//! the infrastructure layer implements. It depends only on `vetclinic-types`
//! -- never on `vetclinic-infra` or any database/IO crate.

pub mod notification;
pub mod policy;
pub mod repository;
pub mod service;
