//! Observability setup for Sitecraft: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
