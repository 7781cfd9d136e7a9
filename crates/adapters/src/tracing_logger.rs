//! Bridge from the logging port to the `tracing` ecosystem.

use catalog_connector_ports::{LogEvent, LogLevel, Logger};
use serde_json::Value;

/// Logger adapter forwarding events to `tracing` macros.
///
/// Structured fields are serialized to one JSON payload per event; consumers
/// pick the output format through their `tracing_subscriber` configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a tracing-backed logger.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, event: LogEvent) {
        let fields = event
            .fields
            .map_or(Value::Null, |fields| {
                let mut map = serde_json::Map::new();
                for (key, value) in fields {
                    map.insert(key.to_string(), value);
                }
                Value::Object(map)
            })
            .to_string();

        match event.level {
            LogLevel::Debug => {
                tracing::debug!(event = %event.event, fields = %fields, "{}", event.message);
            },
            LogLevel::Info => {
                tracing::info!(event = %event.event, fields = %fields, "{}", event.message);
            },
            LogLevel::Warn => {
                tracing::warn!(event = %event.event, fields = %fields, "{}", event.message);
            },
            LogLevel::Error => {
                tracing::error!(event = %event.event, fields = %fields, "{}", event.message);
            },
        }
    }
}
