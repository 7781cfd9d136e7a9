//! # catalog-connector-adapters
//!
//! Adapter implementations for the connector's outward-facing ports.
//! Currently this covers observability: a JSON line logger over a pluggable
//! sink, and a bridge into the `tracing` ecosystem.

pub mod log_sink;
pub mod logger;
pub mod telemetry;
pub mod tracing_logger;

pub use log_sink::{LogSink, StderrLogSink, WriterSink};
pub use logger::JsonLogger;
pub use telemetry::init_tracing;
pub use tracing_logger::TracingLogger;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
