//! Observability setup for the clinic binary: structured logging through
//! `tracing-subscriber`, optionally bridged to OpenTelemetry.

pub mod tracing_setup;
