//! File appender implementation

use crate::core::{Appender, EncoderConfig, LogEntry, LoggerError, OutputFormat, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered, append-mode file output
pub struct FileAppender {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    output_format: OutputFormat,
    encoder: EncoderConfig,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_appender(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            output_format: OutputFormat::Json,
            encoder: EncoderConfig::production(),
        })
    }

    /// Set the output format for this appender
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cleanstack_logging::appenders::FileAppender;
    /// use cleanstack_logging::OutputFormat;
    ///
    /// let appender = FileAppender::new("/var/log/app.log")
    ///     .unwrap()
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

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        let mut output = self.output_format.format(entry, &self.encoder);
        output.push('\n');

        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
            writer.get_ref().sync_data()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }

    fn configure(&mut self, format: OutputFormat, encoder: &EncoderConfig) {
        self.output_format = format;
        self.encoder = encoder.clone();
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
