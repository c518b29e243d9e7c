//! Timestamp formatting
//!
//! Configurable timestamp formats for entry timestamps and `time` fields:
//! ISO 8601, RFC 3339, Unix timestamps and custom strftime patterns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use cleanstack_logging::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let timestamp = format.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 with offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format
    ///
    /// ```
    /// use cleanstack_logging::TimestampFormat;
    ///
    /// // Apache log format
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }

    /// JSON rendering: numeric formats become numbers, the rest strings
    #[must_use]
    pub fn to_json_value(&self, datetime: &DateTime<Utc>) -> Value {
        match self {
            TimestampFormat::Unix => Value::from(datetime.timestamp()),
            TimestampFormat::UnixMillis => Value::from(datetime.timestamp_millis()),
            TimestampFormat::UnixMicros => Value::from(datetime.timestamp_micros()),
            _ => Value::String(self.format(datetime)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_iso8601_micros_format() {
        let result = TimestampFormat::Iso8601Micros.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123456Z");
    }

    #[test]
    fn test_rfc3339_format() {
        let result = TimestampFormat::Rfc3339.format(&fixed_datetime());
        assert!(result.starts_with("2025-01-08T10:30:45"));
        assert!(result.contains("+00:00") || result.ends_with('Z'));
    }

    #[test]
    fn test_unix_formats_are_ordered() {
        let secs: i64 = TimestampFormat::Unix.format(&fixed_datetime()).parse().unwrap();
        let millis: i64 = TimestampFormat::UnixMillis
            .format(&fixed_datetime())
            .parse()
            .unwrap();
        let micros: i64 = TimestampFormat::UnixMicros
            .format(&fixed_datetime())
            .parse()
            .unwrap();
        assert_eq!(secs, 1736332245);
        assert!(millis > secs);
        assert!(micros > millis);
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
    }

    #[test]
    fn test_json_value() {
        assert_eq!(
            TimestampFormat::UnixMillis.to_json_value(&fixed_datetime()),
            Value::from(1736332245123_i64)
        );
        assert_eq!(
            TimestampFormat::Iso8601.to_json_value(&fixed_datetime()),
            Value::from("2025-01-08T10:30:45.123Z")
        );
    }

    #[test]
    fn test_serialization_round_trip() {
        let json = serde_json::to_string(&TimestampFormat::Iso8601).unwrap();
        assert_eq!(json, "\"Iso8601\"");

        let format: TimestampFormat = serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).unwrap();
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }
}
