//! Appender trait for log output destinations

use super::{
    encoder::EncoderConfig, error::Result, log_entry::LogEntry, output_format::OutputFormat,
};

/// A destination for rendered entries
///
/// The dispatcher calls `append` and `flush` under its write lock, so
/// implementations need no locking of their own.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;

    /// Push buffered output to the underlying sink
    fn flush(&mut self) -> Result<()>;

    fn name(&self) -> &str;

    /// Adopt the rendering settings of the logger being built over this
    /// appender. Appenders that do not render text ignore it.
    fn configure(&mut self, _format: OutputFormat, _encoder: &EncoderConfig) {}
}
