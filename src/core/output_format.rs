//! Output format configuration for log entries
//!
//! - Json: one object per line (default)
//! - Text: human-readable line with the fields as trailing JSON
//! - Logfmt: key=value pairs for log aggregation tools

use super::encoder::EncoderConfig;
use super::log_entry::LogEntry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output format for log entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format for machine processing
    ///
    /// Example: `{"ts":"2025-01-08T10:30:45.000Z","level":"info","logger":"svc","msg":"Request processed","id":7}`
    #[default]
    Json,

    /// Human-readable text format
    ///
    /// Example: `[2025-01-08T10:30:45.000Z] [INFO ] svc - Request processed {"id":7}`
    Text,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `ts=2025-01-08T10:30:45.000Z level=info logger=svc msg="Request processed" id=7`
    Logfmt,
}

impl OutputFormat {
    /// Render `entry` without a trailing newline
    pub fn format(&self, entry: &LogEntry, config: &EncoderConfig) -> String {
        match self {
            OutputFormat::Json => self.format_json(entry, config),
            OutputFormat::Text => self.format_text(entry, config),
            OutputFormat::Logfmt => self.format_logfmt(entry, config),
        }
    }

    fn format_text(&self, entry: &LogEntry, config: &EncoderConfig) -> String {
        let level = format!("{:5}", config.level_case.render(entry.level));
        text_line(entry, config, &level)
    }

    fn format_json(&self, entry: &LogEntry, config: &EncoderConfig) -> String {
        let mut json_obj = Map::with_capacity(entry.fields.len() + 5);

        json_obj.insert(
            config.time_key.clone(),
            config.timestamp_format.to_json_value(&entry.timestamp),
        );
        json_obj.insert(
            config.level_key.clone(),
            Value::String(config.level_case.render(entry.level).to_string()),
        );
        if let Some(ref name) = entry.logger_name {
            json_obj.insert(config.name_key.clone(), Value::String(name.clone()));
        }
        json_obj.insert(
            config.message_key.clone(),
            Value::String(entry.message.clone()),
        );

        for (key, value) in &entry.fields {
            json_obj.insert(config.field_key(key).into_owned(), value.clone());
        }

        if let Some(ref stacktrace) = entry.stacktrace {
            json_obj.insert(
                config.stacktrace_key.clone(),
                Value::String(stacktrace.clone()),
            );
        }

        serde_json::to_string(&Value::Object(json_obj)).unwrap_or_default()
    }

    fn format_logfmt(&self, entry: &LogEntry, config: &EncoderConfig) -> String {
        let mut parts = Vec::with_capacity(entry.fields.len() + 5);

        parts.push(format!(
            "{}={}",
            config.time_key,
            self.escape_logfmt_value(&config.timestamp_format.format(&entry.timestamp))
        ));
        parts.push(format!(
            "{}={}",
            config.level_key,
            config.level_case.render(entry.level)
        ));
        if let Some(ref name) = entry.logger_name {
            parts.push(format!("{}={}", config.name_key, self.escape_logfmt_value(name)));
        }

        // Message is always quoted
        parts.push(format!(
            "{}={}",
            config.message_key,
            self.quote_logfmt_value(&entry.message)
        ));

        for (key, value) in &entry.fields {
            let formatted_value = match value {
                Value::String(s) => self.quote_logfmt_value(s),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => "null".to_string(),
                nested => self.quote_logfmt_value(&nested.to_string()),
            };
            parts.push(format!(
                "{}={}",
                self.escape_logfmt_key(&config.field_key(key)),
                formatted_value
            ));
        }

        if let Some(ref stacktrace) = entry.stacktrace {
            parts.push(format!(
                "{}={}",
                config.stacktrace_key,
                self.quote_logfmt_value(stacktrace)
            ));
        }

        parts.join(" ")
    }

    /// Keep only characters valid in a logfmt key
    fn escape_logfmt_key(&self, key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
            .collect()
    }

    /// Quote a value only if it contains spaces, quotes or `=`
    fn escape_logfmt_value(&self, value: &str) -> String {
        if value.contains(' ') || value.contains('"') || value.contains('=') {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_logfmt_value(&self, value: &str) -> String {
        format!(
            "\"{}\"",
            value
                .replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n")
                .replace('\r', "\\r")
                .replace('\t', "\\t")
        )
    }
}

/// Text line with a pre-rendered (padded, possibly colored) level
pub(crate) fn text_line(entry: &LogEntry, config: &EncoderConfig, level: &str) -> String {
    let timestamp_str = config.timestamp_format.format(&entry.timestamp);

    let mut line = match entry.logger_name {
        Some(ref name) => format!("[{}] [{}] {} - {}", timestamp_str, level, name, entry.message),
        None => format!("[{}] [{}] {}", timestamp_str, level, entry.message),
    };

    if !entry.fields.is_empty() {
        line.push(' ');
        line.push_str(&serde_json::to_string(&entry.fields).unwrap_or_default());
    }

    if let Some(ref stacktrace) = entry.stacktrace {
        line.push('\n');
        line.push_str(stacktrace.trim_end());
    }

    line
}
