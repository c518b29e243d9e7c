//! Backend types: entries, levels, encoding, output formats and dispatch

pub mod appender;
pub mod dispatcher;
pub mod encoder;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod metrics;
pub mod output_format;
pub mod overflow_policy;
pub mod timestamp;

pub use appender::Appender;
pub use dispatcher::{Dispatcher, DispatcherBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use encoder::{DurationEncoding, EncoderConfig, JsonArrayEncoder, JsonObjectEncoder, LevelCase};
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use overflow_policy::{LogPriority, OverflowCallback, OverflowPolicy};
pub use timestamp::TimestampFormat;
