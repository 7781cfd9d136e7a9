//! Structured JSON logger adapter.

use crate::log_sink::LogSink;
use catalog_connector_ports::{LogEvent, LogFields, LogLevel, Logger};
use serde_json::Value;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// JSON logger emitting one line per event.
#[derive(Clone)]
pub struct JsonLogger {
    sink: Arc<dyn LogSink>,
    base_fields: LogFields,
    min_level: LogLevel,
}

impl JsonLogger {
    /// Create a JSON logger backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            base_fields: LogFields::new(),
            min_level: LogLevel::Info,
        }
    }

    /// Set base fields applied to every event.
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }
}

impl Logger for JsonLogger {
    fn log(&self, event: LogEvent) {
        if event.level < self.min_level {
            return;
        }

        let mut fields = self.base_fields.clone();
        if let Some(extra) = event.fields {
            for (key, value) in extra {
                fields.insert(key, value);
            }
        }

        let mut payload = serde_json::Map::new();
        payload.insert("timestampMs".to_string(), Value::from(now_epoch_ms()));
        payload.insert("level".to_string(), Value::String(level_str(event.level)));
        payload.insert("event".to_string(), Value::String(event.event.to_string()));
        payload.insert(
            "message".to_string(),
            Value::String(event.message.to_string()),
        );
        if !fields.is_empty() {
            payload.insert("fields".to_string(), fields_to_json(&fields));
        }

        let line = serde_json::to_string(&Value::Object(payload)).map_or_else(
            |_| {
                "{\"timestampMs\":0,\"level\":\"error\",\"event\":\"logger.serialize_failed\",\"message\":\"log serialization failed\"}\n"
                    .to_string()
            },
            |mut encoded| {
                encoded.push('\n');
                encoded
            },
        );
        self.sink.write_line(&line);
    }
}

fn level_str(level: LogLevel) -> String {
    match level {
        LogLevel::Debug => "debug".to_string(),
        LogLevel::Info => "info".to_string(),
        LogLevel::Warn => "warn".to_string(),
        LogLevel::Error => "error".to_string(),
    }
}

fn fields_to_json(fields: &LogFields) -> Value {
    let mut map = serde_json::Map::new();
    for (key, value) in fields {
        map.insert(key.to_string(), value.clone());
    }
    Value::Object(map)
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_sink::WriterSink;

    #[test]
    fn events_below_min_level_are_dropped() {
        let sink = Arc::new(WriterSink::new(Vec::new()));
        let log_sink: Arc<dyn LogSink> = sink.clone();
        let logger = JsonLogger::new(log_sink).with_min_level(LogLevel::Warn);

        logger.debug("connector.test.debug", "dropped", None);
        logger.error("connector.test.error", "kept", None);

        let written = sink.contents();
        assert_eq!(written.lines().count(), 1);
        assert!(written.contains("connector.test.error"));
        assert!(!written.contains("connector.test.debug"));
    }

    #[test]
    fn base_fields_merge_with_event_fields() {
        let sink = Arc::new(WriterSink::new(Vec::new()));
        let mut base = LogFields::new();
        base.insert("service".into(), Value::from("catalog-connector"));
        let log_sink: Arc<dyn LogSink> = sink.clone();
        let logger = JsonLogger::new(log_sink)
            .with_base_fields(base)
            .with_min_level(LogLevel::Debug);

        let mut fields = LogFields::new();
        fields.insert("storeId".into(), Value::from(2));
        logger.info("connector.test.fields", "merged", Some(fields));

        let written = sink.contents();
        let parsed: Value =
            serde_json::from_str(written.lines().next().unwrap_or_default()).unwrap_or_default();
        assert_eq!(
            parsed.pointer("/fields/service"),
            Some(&Value::from("catalog-connector"))
        );
        assert_eq!(parsed.pointer("/fields/storeId"), Some(&Value::from(2)));
    }
}
