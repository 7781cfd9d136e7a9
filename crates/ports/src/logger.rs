//! Structured logging boundary contract.

use catalog_connector_domain::ScopeContext;
use std::collections::BTreeMap;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug.
    Debug,
    /// Info.
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
}

/// Additional event fields.
pub type LogFields = BTreeMap<Box<str>, serde_json::Value>;

/// Structured log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// Stable event name.
    pub event: Box<str>,
    /// Severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: Box<str>,
    /// Optional structured fields.
    pub fields: Option<LogFields>,
}

/// Build log fields carrying a scope context.
///
/// Components that log "scoped to a store" attach the scope as fields
/// instead of mutating ambient state.
#[must_use]
pub fn scope_fields(scope: &ScopeContext) -> LogFields {
    let mut fields = LogFields::new();
    fields.insert("scope".into(), serde_json::Value::from(scope.kind()));
    if let Some(store_id) = scope.store_id() {
        fields.insert("storeId".into(), serde_json::Value::from(store_id.get()));
    }
    fields
}

/// Boundary contract for structured logging.
pub trait Logger: Send + Sync {
    /// Emit a structured event.
    fn log(&self, event: LogEvent);

    /// Convenience: debug event.
    fn debug(&self, event: &str, message: &str, fields: Option<LogFields>) {
        self.log(LogEvent {
            event: event.to_owned().into_boxed_str(),
            level: LogLevel::Debug,
            message: message.to_owned().into_boxed_str(),
            fields,
        });
    }

    /// Convenience: info event.
    fn info(&self, event: &str, message: &str, fields: Option<LogFields>) {
        self.log(LogEvent {
            event: event.to_owned().into_boxed_str(),
            level: LogLevel::Info,
            message: message.to_owned().into_boxed_str(),
            fields,
        });
    }

    /// Convenience: warn event.
    fn warn(&self, event: &str, message: &str, fields: Option<LogFields>) {
        self.log(LogEvent {
            event: event.to_owned().into_boxed_str(),
            level: LogLevel::Warn,
            message: message.to_owned().into_boxed_str(),
            fields,
        });
    }

    /// Convenience: error event.
    fn error(&self, event: &str, message: &str, fields: Option<LogFields>) {
        self.log(LogEvent {
            event: event.to_owned().into_boxed_str(),
            level: LogLevel::Error,
            message: message.to_owned().into_boxed_str(),
            fields,
        });
    }
}
