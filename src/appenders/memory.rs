//! In-memory appender
//!
//! Keeps rendered lines in a shared buffer. Clones share the buffer, so a
//! test can hand one clone to a dispatcher and inspect the other.

use crate::core::{Appender, EncoderConfig, LogEntry, OutputFormat, Result};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct MemoryAppender {
    lines: Arc<Mutex<Vec<String>>>,
    output_format: OutputFormat,
    encoder: EncoderConfig,
}

impl MemoryAppender {
    /// JSON lines with the production encoder settings
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(Vec::new())),
            output_format: OutputFormat::Json,
            encoder: EncoderConfig::production(),
        }
    }

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

    /// Snapshot of the rendered lines
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Lines parsed as JSON; lines that are not JSON are skipped.
    pub fn records(&self) -> Vec<Value> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Default for MemoryAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let line = self.output_format.format(entry, &self.encoder);
        self.lines.lock().push(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn configure(&mut self, format: OutputFormat, encoder: &EncoderConfig) {
        self.output_format = format;
        self.encoder = encoder.clone();
    }
}
