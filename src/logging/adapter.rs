//! [`Logger`] implementation over the in-crate dispatcher

use super::{Logger, SharedLogger};
use crate::core::{Dispatcher, EncoderConfig, JsonObjectEncoder, LogEntry, LogLevel, Result};
use crate::field::{Field, ObjectEncoder, Stacktrace};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Behavior shared by a root logger and everything derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerOptions {
    /// Field encoding settings (durations, times, floats)
    pub encoder: EncoderConfig,
    /// Entries at or above this level carry the caller's stack
    pub stacktrace_level: Option<LogLevel>,
    /// `DPanic` entries panic after they are written
    pub development: bool,
}

impl LoggerOptions {
    pub fn production() -> Self {
        Self {
            encoder: EncoderConfig::production(),
            stacktrace_level: Some(LogLevel::Error),
            development: false,
        }
    }

    pub fn development() -> Self {
        Self {
            encoder: EncoderConfig::development(),
            stacktrace_level: Some(LogLevel::Warn),
            development: true,
        }
    }

    #[must_use]
    pub fn with_encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }

    #[must_use]
    pub fn with_stacktrace_level(mut self, level: Option<LogLevel>) -> Self {
        self.stacktrace_level = level;
        self
    }
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self::production()
    }
}

struct Core {
    dispatcher: Dispatcher,
    options: LoggerOptions,
}

/// Structured logger backed by a [`Dispatcher`]
///
/// Cloning is cheap: the dispatcher is shared, and so is the list of
/// fields added by `with`. Derivation copies the name and appends to a new
/// field list, leaving the receiver untouched.
///
/// ```
/// use cleanstack_logging::prelude::*;
///
/// let memory = MemoryAppender::new();
/// let dispatcher = Dispatcher::builder().appender(memory.clone()).build();
/// let logger = FieldLogger::new(dispatcher, LoggerOptions::production());
///
/// logger.named("http").info("request", &[field::int("status", 200)]);
///
/// let record = &memory.records()[0];
/// assert_eq!(record["logger"], "http");
/// assert_eq!(record["status"], 200);
/// ```
#[derive(Clone)]
pub struct FieldLogger {
    core: Arc<Core>,
    name: Option<String>,
    fields: Arc<Vec<Field>>,
}

impl FieldLogger {
    pub fn new(dispatcher: Dispatcher, options: LoggerOptions) -> Self {
        Self {
            core: Arc::new(Core {
                dispatcher,
                options,
            }),
            name: None,
            fields: Arc::new(Vec::new()),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.core.dispatcher
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.core.options
    }

    /// Dot-joined name path, `None` for an unnamed logger
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Fields added by `with`, oldest first
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.core.dispatcher.enabled(level)
    }

    /// Concrete form of [`Logger::with`]
    #[must_use]
    pub fn with_fields(&self, fields: &[Field]) -> Self {
        if fields.is_empty() {
            return self.clone();
        }

        let mut combined = Vec::with_capacity(self.fields.len() + fields.len());
        combined.extend(self.fields.iter().cloned());
        combined.extend(fields.iter().cloned());

        Self {
            core: Arc::clone(&self.core),
            name: self.name.clone(),
            fields: Arc::new(combined),
        }
    }

    /// Concrete form of [`Logger::named`]
    #[must_use]
    pub fn with_name(&self, segment: &str) -> Self {
        if segment.is_empty() {
            return self.clone();
        }

        let name = match &self.name {
            Some(parent) => format!("{}.{}", parent, segment),
            None => segment.to_string(),
        };

        Self {
            core: Arc::clone(&self.core),
            name: Some(name),
            fields: Arc::clone(&self.fields),
        }
    }

    /// Encode lineage fields followed by `call_fields`
    ///
    /// A field that fails to encode is replaced by a `"<key>Error"` string
    /// holding the failure; the rest of the entry is kept.
    fn encode_fields(&self, call_fields: &[Field]) -> Map<String, Value> {
        let mut enc = JsonObjectEncoder::new(&self.core.options.encoder);

        for field in self.fields.iter().chain(call_fields) {
            if let Err(e) = field.add_to(&mut enc) {
                self.core.dispatcher.metrics().record_encode_error();
                enc.add_string(&format!("{}Error", field.key), &e.to_string());
            }
        }

        enc.finish()
    }

    fn emit(&self, level: LogLevel, msg: &str, fields: &[Field]) {
        let mut entry = LogEntry::new(level, msg)
            .with_logger_name(self.name.clone())
            .with_fields(self.encode_fields(fields));

        if self.core.options.stacktrace_level.is_some_and(|min| level >= min) {
            let stack = Stacktrace::new(0).capture();
            if !stack.is_empty() {
                entry = entry.with_stacktrace(stack);
            }
        }

        self.core.dispatcher.dispatch(entry);

        // Entries above Error precede a panic or exit
        if level > LogLevel::Error {
            let _ = self.core.dispatcher.sync();
        }

        if level == LogLevel::DPanic && self.core.options.development {
            panic!("{}", msg);
        }
    }
}

impl fmt::Debug for FieldLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldLogger")
            .field("name", &self.name)
            .field("fields", &self.fields.len())
            .field("min_level", &self.core.dispatcher.min_level())
            .finish()
    }
}

impl Logger for FieldLogger {
    fn log(&self, level: LogLevel, msg: &str, fields: &[Field]) {
        if self.enabled(level) {
            self.emit(level, msg, fields);
        }
    }

    fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }

        match args.as_str() {
            Some(msg) => self.emit(level, msg, &[]),
            None => self.emit(level, &args.to_string(), &[]),
        }
    }

    fn with(&self, fields: &[Field]) -> SharedLogger {
        Arc::new(self.with_fields(fields))
    }

    fn named(&self, name: &str) -> SharedLogger {
        Arc::new(self.with_name(name))
    }

    fn sync(&self) -> Result<()> {
        self.core.dispatcher.sync()
    }
}
