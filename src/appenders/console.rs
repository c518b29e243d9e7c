//! Console appender implementation

use crate::core::output_format::text_line;
use crate::core::{Appender, EncoderConfig, LogEntry, OutputFormat, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Standard stream a [`ConsoleAppender`] writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    Stdout,
    #[default]
    Stderr,
}

pub struct ConsoleAppender {
    target: ConsoleTarget,
    use_colors: bool,
    output_format: OutputFormat,
    encoder: EncoderConfig,
}

impl ConsoleAppender {
    /// JSON lines to stderr
    pub fn new() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
            use_colors: false,
            output_format: OutputFormat::Json,
            encoder: EncoderConfig::production(),
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self
    }

    /// Color the level in text output. Without the `console` feature this
    /// has no effect.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the output format for this appender
    ///
    /// # Example
    ///
    /// ```
    /// use cleanstack_logging::appenders::ConsoleAppender;
    /// use cleanstack_logging::OutputFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_output_format(OutputFormat::Logfmt);
    /// ```
    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_encoder_config(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }

    fn render(&self, entry: &LogEntry) -> String {
        match self.output_format {
            OutputFormat::Text if self.use_colors => self.format_colored_text(entry),
            format => format.format(entry, &self.encoder),
        }
    }

    #[cfg(feature = "console")]
    fn format_colored_text(&self, entry: &LogEntry) -> String {
        let level = format!("{:5}", self.encoder.level_case.render(entry.level))
            .color(entry.level.color_code())
            .to_string();
        text_line(entry, &self.encoder, &level)
    }

    #[cfg(not(feature = "console"))]
    fn format_colored_text(&self, entry: &LogEntry) -> String {
        let level = format!("{:5}", self.encoder.level_case.render(entry.level));
        text_line(entry, &self.encoder, &level)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut output = self.render(entry);
        output.push('\n');

        match self.target {
            ConsoleTarget::Stdout => io::stdout().lock().write_all(output.as_bytes())?,
            ConsoleTarget::Stderr => io::stderr().lock().write_all(output.as_bytes())?,
        }
        Ok(())
    }

    /// Flushing a standard stream can fail benignly (e.g. a closed pipe or a
    /// terminal that rejects `fsync`); callers of `sync` tolerate it.
    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stdout => io::stdout().flush()?,
            ConsoleTarget::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    fn configure(&mut self, format: OutputFormat, encoder: &EncoderConfig) {
        self.output_format = format;
        self.encoder = encoder.clone();
    }
}
