//! Custom Axum extractors.

pub mod query;
