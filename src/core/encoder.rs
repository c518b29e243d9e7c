//! JSON field encoder
//!
//! Translates fields into `serde_json` objects, the backend's native
//! representation. [`EncoderConfig`] carries the presentation choices shared
//! by the encoder and the output formats: entry key names, level casing,
//! duration and time encodings.

use super::error::Result;
use super::log_level::LogLevel;
use super::timestamp::TimestampFormat;
use crate::field::{ArrayEncoder, ArrayMarshaler, ObjectEncoder, ObjectMarshaler};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::time::Duration;

const FIELD_KEY_PREFIX: &str = "fields.";

/// How `duration` fields are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationEncoding {
    /// Floating-point seconds: `1.5`
    #[default]
    Seconds,
    /// Whole nanoseconds: `1500000000`
    Nanos,
    /// Human-readable: `"1.5s"`
    String,
}

impl DurationEncoding {
    pub fn encode(&self, d: Duration) -> Value {
        match self {
            DurationEncoding::Seconds => float_value(d.as_secs_f64()),
            DurationEncoding::Nanos => Value::from(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)),
            DurationEncoding::String => Value::String(format!("{:?}", d)),
        }
    }
}

/// Level rendering in output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelCase {
    /// `info`
    #[default]
    Lower,
    /// `INFO`
    Capital,
}

impl LevelCase {
    pub fn render(&self, level: LogLevel) -> &'static str {
        match self {
            LevelCase::Lower => level.as_lower_str(),
            LevelCase::Capital => level.to_str(),
        }
    }
}

/// Presentation settings shared by the encoder and the output formats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub name_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
    pub level_case: LevelCase,
    pub duration_encoding: DurationEncoding,
    pub timestamp_format: TimestampFormat,
}

impl EncoderConfig {
    /// Lowercase levels, float-second durations, ISO-8601 timestamps
    pub fn production() -> Self {
        Self {
            time_key: "ts".to_string(),
            level_key: "level".to_string(),
            name_key: "logger".to_string(),
            message_key: "msg".to_string(),
            stacktrace_key: "stacktrace".to_string(),
            level_case: LevelCase::Lower,
            duration_encoding: DurationEncoding::Seconds,
            timestamp_format: TimestampFormat::Iso8601,
        }
    }

    /// Capitalized levels and human-readable durations
    pub fn development() -> Self {
        Self {
            level_case: LevelCase::Capital,
            duration_encoding: DurationEncoding::String,
            ..Self::production()
        }
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_duration_encoding(mut self, encoding: DurationEncoding) -> Self {
        self.duration_encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_level_case(mut self, case: LevelCase) -> Self {
        self.level_case = case;
        self
    }

    /// Whether `key` names one of the entry's own keys
    pub fn is_reserved(&self, key: &str) -> bool {
        [
            &self.time_key,
            &self.level_key,
            &self.name_key,
            &self.message_key,
            &self.stacktrace_key,
        ]
        .iter()
        .any(|reserved| reserved.as_str() == key)
    }

    /// Output key for a user field. Fields never replace the entry's own
    /// keys; a clashing field is moved under `fields.`.
    pub fn field_key<'k>(&self, key: &'k str) -> Cow<'k, str> {
        if !self.is_reserved(key) {
            return Cow::Borrowed(key);
        }
        let mut renamed = format!("{FIELD_KEY_PREFIX}{key}");
        while self.is_reserved(&renamed) {
            renamed.insert_str(0, FIELD_KEY_PREFIX);
        }
        Cow::Owned(renamed)
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::production()
    }
}

/// Finite floats become numbers; NaN and infinities become `"NaN"`, `"+Inf"`, `"-Inf"`.
fn float_value(val: f64) -> Value {
    match Number::from_f64(val) {
        Some(n) => Value::Number(n),
        None if val.is_nan() => Value::String("NaN".to_string()),
        None if val.is_sign_positive() => Value::String("+Inf".to_string()),
        None => Value::String("-Inf".to_string()),
    }
}

/// f32 values keep their shortest f32 representation (`0.1`, not `0.10000000149011612`)
fn float32_value(val: f32) -> Value {
    let widened = val.to_string().parse::<f64>().unwrap_or(f64::from(val));
    float_value(widened)
}

/// [`ObjectEncoder`] building a JSON object
///
/// `open_namespace` nests every later field under the namespace key; open
/// namespaces are closed by [`finish`](Self::finish).
pub struct JsonObjectEncoder<'a> {
    config: &'a EncoderConfig,
    current: Map<String, Value>,
    namespaces: Vec<(String, Map<String, Value>)>,
}

impl<'a> JsonObjectEncoder<'a> {
    pub fn new(config: &'a EncoderConfig) -> Self {
        Self {
            config,
            current: Map::new(),
            namespaces: Vec::new(),
        }
    }

    /// Close all open namespaces and return the object
    pub fn finish(mut self) -> Map<String, Value> {
        while let Some((key, mut parent)) = self.namespaces.pop() {
            parent.insert(key, Value::Object(self.current));
            self.current = parent;
        }
        self.current
    }

    fn put(&mut self, key: &str, val: Value) {
        self.current.insert(key.to_string(), val);
    }
}

impl ObjectEncoder for JsonObjectEncoder<'_> {
    fn add_string(&mut self, key: &str, val: &str) {
        self.put(key, Value::String(val.to_string()));
    }

    fn add_i64(&mut self, key: &str, val: i64) {
        self.put(key, Value::from(val));
    }

    fn add_u64(&mut self, key: &str, val: u64) {
        self.put(key, Value::from(val));
    }

    fn add_bool(&mut self, key: &str, val: bool) {
        self.put(key, Value::Bool(val));
    }

    fn add_f64(&mut self, key: &str, val: f64) {
        self.put(key, float_value(val));
    }

    fn add_f32(&mut self, key: &str, val: f32) {
        self.put(key, float32_value(val));
    }

    fn add_duration(&mut self, key: &str, val: Duration) {
        let encoded = self.config.duration_encoding.encode(val);
        self.put(key, encoded);
    }

    fn add_time(&mut self, key: &str, val: &DateTime<Utc>) {
        let encoded = self.config.timestamp_format.to_json_value(val);
        self.put(key, encoded);
    }

    fn add_reflected(&mut self, key: &str, val: &Value) {
        self.put(key, val.clone());
    }

    fn add_object(&mut self, key: &str, val: &dyn ObjectMarshaler) -> Result<()> {
        let mut child = JsonObjectEncoder::new(self.config);
        val.marshal_log_object(&mut child)?;
        self.put(key, Value::Object(child.finish()));
        Ok(())
    }

    fn add_array(&mut self, key: &str, val: &dyn ArrayMarshaler) -> Result<()> {
        let mut child = JsonArrayEncoder::new(self.config);
        val.marshal_log_array(&mut child)?;
        self.put(key, Value::Array(child.finish()));
        Ok(())
    }

    fn open_namespace(&mut self, key: &str) {
        let parent = std::mem::take(&mut self.current);
        self.namespaces.push((key.to_string(), parent));
    }
}

/// [`ArrayEncoder`] building a JSON array
pub struct JsonArrayEncoder<'a> {
    config: &'a EncoderConfig,
    items: Vec<Value>,
}

impl<'a> JsonArrayEncoder<'a> {
    pub fn new(config: &'a EncoderConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
        }
    }

    pub fn finish(self) -> Vec<Value> {
        self.items
    }
}

impl ArrayEncoder for JsonArrayEncoder<'_> {
    fn append_string(&mut self, val: &str) {
        self.items.push(Value::String(val.to_string()));
    }

    fn append_i64(&mut self, val: i64) {
        self.items.push(Value::from(val));
    }

    fn append_u64(&mut self, val: u64) {
        self.items.push(Value::from(val));
    }

    fn append_bool(&mut self, val: bool) {
        self.items.push(Value::Bool(val));
    }

    fn append_f64(&mut self, val: f64) {
        self.items.push(float_value(val));
    }

    fn append_f32(&mut self, val: f32) {
        self.items.push(float32_value(val));
    }

    fn append_duration(&mut self, val: Duration) {
        self.items.push(self.config.duration_encoding.encode(val));
    }

    fn append_time(&mut self, val: &DateTime<Utc>) {
        self.items.push(self.config.timestamp_format.to_json_value(val));
    }

    fn append_reflected(&mut self, val: &Value) {
        self.items.push(val.clone());
    }

    fn append_object(&mut self, val: &dyn ObjectMarshaler) -> Result<()> {
        let mut child = JsonObjectEncoder::new(self.config);
        val.marshal_log_object(&mut child)?;
        self.items.push(Value::Object(child.finish()));
        Ok(())
    }

    fn append_array(&mut self, val: &dyn ArrayMarshaler) -> Result<()> {
        let mut child = JsonArrayEncoder::new(self.config);
        val.marshal_log_array(&mut child)?;
        self.items.push(Value::Array(child.finish()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use crate::field::{ArrayMarshalerFn, ObjectMarshalerFn};
    use serde_json::json;

    #[test]
    fn test_non_finite_floats() {
        let config = EncoderConfig::production();
        let mut enc = JsonObjectEncoder::new(&config);
        enc.add_f64("nan", f64::NAN);
        enc.add_f64("pos", f64::INFINITY);
        enc.add_f32("neg", f32::NEG_INFINITY);

        let out = Value::Object(enc.finish());
        assert_eq!(out, json!({"nan": "NaN", "pos": "+Inf", "neg": "-Inf"}));
    }

    #[test]
    fn test_f32_keeps_short_form() {
        let config = EncoderConfig::production();
        let mut enc = JsonObjectEncoder::new(&config);
        enc.add_f32("x", 0.1);
        assert_eq!(Value::Object(enc.finish())["x"], json!(0.1));
    }

    #[test]
    fn test_duration_encodings() {
        let d = Duration::from_millis(1500);
        assert_eq!(DurationEncoding::Seconds.encode(d), json!(1.5));
        assert_eq!(DurationEncoding::Nanos.encode(d), json!(1_500_000_000u64));
        assert_eq!(DurationEncoding::String.encode(d), json!("1.5s"));
    }

    #[test]
    fn test_namespaces_nest_and_close() {
        let config = EncoderConfig::production();
        let mut enc = JsonObjectEncoder::new(&config);
        enc.add_string("a", "1");
        enc.open_namespace("outer");
        enc.add_string("b", "2");
        enc.open_namespace("inner");
        enc.add_bool("c", true);

        let out = Value::Object(enc.finish());
        assert_eq!(out, json!({"a": "1", "outer": {"b": "2", "inner": {"c": true}}}));
    }

    #[test]
    fn test_namespace_inside_object_stays_inside() {
        let config = EncoderConfig::production();
        let mut enc = JsonObjectEncoder::new(&config);
        let nested = ObjectMarshalerFn(|e: &mut dyn ObjectEncoder| -> Result<()> {
            e.open_namespace("ns");
            e.add_i64("x", 1);
            Ok(())
        });
        enc.add_object("obj", &nested).unwrap();
        enc.add_i64("after", 2);

        let out = Value::Object(enc.finish());
        assert_eq!(out, json!({"obj": {"ns": {"x": 1}}, "after": 2}));
    }

    #[test]
    fn test_arrays_of_objects() {
        let config = EncoderConfig::production();
        let mut enc = JsonObjectEncoder::new(&config);
        let arr = ArrayMarshalerFn(|e: &mut dyn ArrayEncoder| -> Result<()> {
            e.append_i64(1);
            e.append_object(&ObjectMarshalerFn(|o: &mut dyn ObjectEncoder| -> Result<()> {
                o.add_string("k", "v");
                Ok(())
            }))?;
            e.append_array(&ArrayMarshalerFn(|inner: &mut dyn ArrayEncoder| -> Result<()> {
                inner.append_bool(false);
                Ok(())
            }))
        });
        enc.add_array("items", &arr).unwrap();

        let out = Value::Object(enc.finish());
        assert_eq!(out["items"], json!([1, {"k": "v"}, [false]]));
    }

    #[test]
    fn test_failed_object_is_not_inserted() {
        let config = EncoderConfig::production();
        let mut enc = JsonObjectEncoder::new(&config);
        let failing = ObjectMarshalerFn(|_: &mut dyn ObjectEncoder| -> Result<()> {
            Err(LoggerError::other("nope"))
        });

        assert!(enc.add_object("bad", &failing).is_err());
        assert!(enc.finish().is_empty());
    }

    #[test]
    fn test_level_case() {
        assert_eq!(LevelCase::Lower.render(LogLevel::Warn), "warn");
        assert_eq!(LevelCase::Capital.render(LogLevel::Warn), "WARN");
    }

    #[test]
    fn test_reserved_keys_are_moved() {
        let config = EncoderConfig::production();
        for key in ["ts", "level", "logger", "msg", "stacktrace"] {
            assert!(config.is_reserved(key));
            assert_eq!(config.field_key(key), format!("fields.{key}"));
        }
        assert_eq!(config.field_key("user"), "user");
        assert_eq!(config.field_key("fields.msg"), "fields.msg");

        let mut custom = EncoderConfig::production();
        custom.message_key = "fields.msg".to_string();
        assert_eq!(custom.field_key("msg"), "msg");
        assert_eq!(custom.field_key("fields.msg"), "fields.fields.msg");
    }

    #[test]
    fn test_development_config() {
        let config = EncoderConfig::development();
        assert_eq!(config.level_case, LevelCase::Capital);
        assert_eq!(config.duration_encoding, DurationEncoding::String);
        assert_eq!(config.message_key, "msg");
    }
}
