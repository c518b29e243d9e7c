//! Log entry structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One emitted record, with its fields already encoded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Dot-joined `named` segments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logger_name: Option<String>,
    /// Lineage fields first, then call fields
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<String>,
}

impl LogEntry {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    pub(crate) fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: impl AsRef<str>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.as_ref()),
            timestamp: Utc::now(),
            logger_name: None,
            fields: Map::new(),
            stacktrace: None,
        }
    }

    /// Set the logger name, sanitized like the message
    pub fn with_logger_name(mut self, name: Option<String>) -> Self {
        self.logger_name = name.map(|n| Self::sanitize_message(&n));
        self
    }

    pub fn with_fields(mut self, fields: Map<String, Value>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_stacktrace(mut self, stacktrace: impl Into<String>) -> Self {
        self.stacktrace = Some(stacktrace.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_sanitized() {
        let entry = LogEntry::new(LogLevel::Info, "line1\nINFO fake\r\tend");
        assert_eq!(entry.message, "line1\\nINFO fake\\r\\tend");
    }

    #[test]
    fn test_logger_name_is_sanitized() {
        let entry = LogEntry::new(LogLevel::Info, "ok").with_logger_name(Some("a\nb\tc".to_string()));
        assert_eq!(entry.logger_name.as_deref(), Some("a\\nb\\tc"));
    }

    #[test]
    fn test_builder_methods() {
        let mut fields = Map::new();
        fields.insert("k".to_string(), Value::from(1));

        let entry = LogEntry::new(LogLevel::Error, "boom")
            .with_logger_name(Some("svc.db".to_string()))
            .with_fields(fields)
            .with_stacktrace("main\n\tsrc/main.rs:1\n");

        assert_eq!(entry.logger_name.as_deref(), Some("svc.db"));
        assert_eq!(entry.fields["k"], 1);
        assert!(entry.stacktrace.is_some());
    }
}
