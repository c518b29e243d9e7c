//! # Cleanstack Logging
//!
//! Backend-neutral structured logging for service code.
//!
//! ## Features
//!
//! - **Typed Fields**: One constructor per value kind, nil-safe optional
//!   and slice variants, nested objects and arrays
//! - **Scoped Loggers**: `with` and `named` derive child loggers without
//!   touching the parent
//! - **Swappable Backend**: Call sites see only the [`Logger`] trait
//! - **Sync or Async Output**: Console, file and in-memory appenders behind
//!   one dispatcher
//!
//! ```
//! use cleanstack_logging::prelude::*;
//!
//! let memory = MemoryAppender::new();
//! let logger = LoggerConfig::production()
//!     .build_with(Box::new(memory.clone()))
//!     .unwrap();
//!
//! let svc = logger.named("svc").with(&[field::string("env", "test")]);
//! svc.info("started", &[field::int("port", 8080)]);
//!
//! let record = &memory.records()[0];
//! assert_eq!(record["logger"], "svc");
//! assert_eq!(record["env"], "test");
//! ```

pub mod appenders;
pub mod core;
pub mod field;
pub mod logging;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, ConsoleTarget, FileAppender, MemoryAppender};
    pub use crate::core::{
        Appender, Dispatcher, DispatcherBuilder, EncoderConfig, LogEntry, LogLevel, LoggerError,
        LoggerMetrics, OutputFormat, OverflowCallback, OverflowPolicy, Result, TimestampFormat,
        DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::field::{self, Field, FieldType, FieldValue, ObjectEncoder, ObjectMarshaler};
    pub use crate::logging::{
        self, Context, FieldLogger, Logger, LoggerConfig, LoggerOptions, SharedLogger,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, MemoryAppender};
pub use core::{
    Appender, Dispatcher, DispatcherBuilder, DurationEncoding, EncoderConfig, LevelCase, LogEntry,
    LogLevel, LogPriority, LoggerError, LoggerMetrics, OutputFormat, OverflowCallback,
    OverflowPolicy, Result, TimestampFormat, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use field::{Field, FieldType, FieldValue};
pub use logging::{FieldLogger, Logger, LoggerConfig, SharedLogger};
