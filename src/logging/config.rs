//! Declarative logger configuration

use super::adapter::{FieldLogger, LoggerOptions};
use super::root::parse_level;
use crate::appenders::{ConsoleAppender, ConsoleTarget, FileAppender};
use crate::core::{
    Appender, Dispatcher, EncoderConfig, LogLevel, LoggerError, OutputFormat, Result,
    TimestampFormat,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Preset selecting encoder settings, stack capture and default format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl Environment {
    /// `"development"` and `"dev"` (any case) select development; any other
    /// name selects production.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn default_format(&self) -> OutputFormat {
        match self {
            Environment::Production => OutputFormat::Json,
            Environment::Development => OutputFormat::Text,
        }
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => f.write_str("production"),
            Environment::Development => f.write_str("development"),
        }
    }
}

/// Where rendered entries go
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    #[default]
    Stderr,
    Stdout,
    File { path: PathBuf },
}

/// Configuration for a root [`FieldLogger`]
///
/// ```
/// use cleanstack_logging::logging::{Environment, LoggerConfig};
///
/// let config: LoggerConfig = serde_json::from_str(
///     r#"{ "environment": "development", "level": "debug" }"#,
/// ).unwrap();
/// assert_eq!(config.environment, Environment::Development);
/// assert!(config.build().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    #[serde(default)]
    pub environment: Environment,
    /// Minimum level name; empty means `info`
    #[serde(default = "default_level")]
    pub level: String,
    /// Overrides the environment's default format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub output: OutputTarget,
    #[serde(default)]
    pub timestamp_format: TimestampFormat,
    /// Queue capacity; `None` writes synchronously
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub async_buffer: Option<usize>,
}

impl LoggerConfig {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            level: default_level(),
            format: None,
            output: OutputTarget::default(),
            timestamp_format: TimestampFormat::default(),
            async_buffer: None,
        }
    }

    pub fn production() -> Self {
        Self::new(Environment::Production)
    }

    pub fn development() -> Self {
        Self::new(Environment::Development)
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        self.with_output(OutputTarget::File { path: path.into() })
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_async_buffer(mut self, size: usize) -> Self {
        self.async_buffer = Some(size);
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| self.environment.default_format())
    }

    pub fn encoder_config(&self) -> EncoderConfig {
        let base = match self.environment {
            Environment::Production => EncoderConfig::production(),
            Environment::Development => EncoderConfig::development(),
        };
        base.with_timestamp_format(self.timestamp_format.clone())
    }

    pub fn options(&self) -> LoggerOptions {
        let base = match self.environment {
            Environment::Production => LoggerOptions::production(),
            Environment::Development => LoggerOptions::development(),
        };
        base.with_encoder(self.encoder_config())
    }

    /// Build the logger, opening the configured output
    ///
    /// The level is validated before any file is opened.
    pub fn build(&self) -> Result<FieldLogger> {
        let level = parse_level(&self.level)?;
        let appender = self.appender()?;
        self.assemble(level, appender)
    }

    /// Build the logger over a caller-supplied appender, ignoring `output`
    ///
    /// The appender is switched to this configuration's output format and
    /// encoder settings, so it renders exactly like [`build`](Self::build).
    pub fn build_with(&self, mut appender: Box<dyn Appender>) -> Result<FieldLogger> {
        let level = parse_level(&self.level)?;
        appender.configure(self.output_format(), &self.encoder_config());
        self.assemble(level, appender)
    }

    fn assemble(&self, level: LogLevel, appender: Box<dyn Appender>) -> Result<FieldLogger> {
        let mut builder = Dispatcher::builder()
            .min_level(level)
            .boxed_appender(appender);

        if let Some(size) = self.async_buffer {
            if size == 0 {
                return Err(LoggerError::config(
                    "async_buffer",
                    "buffer size must be greater than zero",
                ));
            }
            builder = builder.async_mode(size);
        }

        Ok(FieldLogger::new(builder.build(), self.options()))
    }

    fn appender(&self) -> Result<Box<dyn Appender>> {
        let format = self.output_format();
        let encoder = self.encoder_config();

        let console = |target| {
            let colors = self.environment == Environment::Development && format == OutputFormat::Text;
            Box::new(
                ConsoleAppender::new()
                    .with_target(target)
                    .with_colors(colors)
                    .with_output_format(format)
                    .with_encoder_config(encoder.clone()),
            ) as Box<dyn Appender>
        };

        Ok(match &self.output {
            OutputTarget::Stderr => console(ConsoleTarget::Stderr),
            OutputTarget::Stdout => console(ConsoleTarget::Stdout),
            OutputTarget::File { path } => Box::new(
                FileAppender::new(path.clone())?
                    .with_output_format(format)
                    .with_encoder_config(encoder.clone()),
            ),
        })
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::production()
    }
}

fn default_level() -> String {
    "info".to_string()
}
