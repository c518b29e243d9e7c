//! Backend-neutral logger contract
//!
//! Call sites depend on the [`Logger`] trait and on
//! [`field`](crate::field) constructors only. The concrete backend is
//! chosen once at the composition root through [`root`] constructors or a
//! [`LoggerConfig`], then passed around as a [`SharedLogger`].
//!
//! ```
//! use cleanstack_logging::field;
//! use cleanstack_logging::logging::{self, Logger};
//!
//! let logger = logging::new_nop();
//! let db = logger.named("db").with(&[field::string("pool", "primary")]);
//! db.info("connected", &[field::int("conns", 8)]);
//! db.sync().ok();
//! ```

mod adapter;
mod config;
mod context;
mod global;
mod nop;
pub mod root;

pub use adapter::{FieldLogger, LoggerOptions};
pub use config::{Environment, LoggerConfig, OutputTarget};
pub use context::{Context, TracingContext};
pub use global::{get_logger, set_logger, try_get_logger};
pub use nop::NopLogger;
pub use root::{must, new_development, new_logger, new_nop, new_production, parse_level};

use crate::core::{LogLevel, Result};
use crate::field::Field;
use std::fmt;
use std::sync::Arc;

/// A logger shared between components and threads
pub type SharedLogger = Arc<dyn Logger>;

/// Leveled, structured logging with scoped derivation
///
/// `with` and `named` return new loggers and never change the receiver;
/// loggers derived from the same parent are independent of each other.
/// Every method is safe to call concurrently.
///
/// Implementors provide [`log`](Logger::log), [`log_fmt`](Logger::log_fmt),
/// [`with`](Logger::with), [`named`](Logger::named) and
/// [`sync`](Logger::sync); the leveled methods delegate to them.
pub trait Logger: Send + Sync {
    /// Emit `msg` with `fields` after the logger's own fields
    fn log(&self, level: LogLevel, msg: &str, fields: &[Field]);

    /// Emit a formatted message; formatting is skipped when `level` is disabled
    fn log_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>);

    /// A child logger whose entries carry `fields` after this logger's fields
    fn with(&self, fields: &[Field]) -> SharedLogger;

    /// A child logger with `name` appended to the dot-separated name path
    ///
    /// An empty `name` leaves the path unchanged.
    fn named(&self, name: &str) -> SharedLogger;

    /// Flush buffered entries
    ///
    /// Idempotent. Console streams may report benign flush failures that
    /// callers can ignore.
    fn sync(&self) -> Result<()>;

    fn debug(&self, msg: &str, fields: &[Field]) {
        self.log(LogLevel::Debug, msg, fields);
    }

    fn info(&self, msg: &str, fields: &[Field]) {
        self.log(LogLevel::Info, msg, fields);
    }

    fn warn(&self, msg: &str, fields: &[Field]) {
        self.log(LogLevel::Warn, msg, fields);
    }

    fn error(&self, msg: &str, fields: &[Field]) {
        self.log(LogLevel::Error, msg, fields);
    }

    /// Log, flush, then exit the process with status 1
    fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(LogLevel::Fatal, msg, fields);
        let _ = self.sync();
        std::process::exit(1)
    }

    /// Log, then panic with `msg`
    fn panic(&self, msg: &str, fields: &[Field]) -> ! {
        self.log(LogLevel::Panic, msg, fields);
        panic!("{}", msg)
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Debug, args);
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Info, args);
    }

    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Warn, args);
    }

    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log_fmt(LogLevel::Error, args);
    }

    fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.log_fmt(LogLevel::Fatal, args);
        let _ = self.sync();
        std::process::exit(1)
    }

    fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let msg = args.to_string();
        self.log(LogLevel::Panic, &msg, &[]);
        panic!("{}", msg)
    }

    fn debug_context(&self, _ctx: &Context, msg: &str, fields: &[Field]) {
        self.debug(msg, fields);
    }

    fn info_context(&self, _ctx: &Context, msg: &str, fields: &[Field]) {
        self.info(msg, fields);
    }

    fn warn_context(&self, _ctx: &Context, msg: &str, fields: &[Field]) {
        self.warn(msg, fields);
    }

    fn error_context(&self, _ctx: &Context, msg: &str, fields: &[Field]) {
        self.error(msg, fields);
    }

    fn fatal_context(&self, _ctx: &Context, msg: &str, fields: &[Field]) -> ! {
        self.fatal(msg, fields)
    }

    fn panic_context(&self, _ctx: &Context, msg: &str, fields: &[Field]) -> ! {
        self.panic(msg, fields)
    }

    fn debugf_context(&self, _ctx: &Context, args: fmt::Arguments<'_>) {
        self.debugf(args);
    }

    fn infof_context(&self, _ctx: &Context, args: fmt::Arguments<'_>) {
        self.infof(args);
    }

    fn warnf_context(&self, _ctx: &Context, args: fmt::Arguments<'_>) {
        self.warnf(args);
    }

    fn errorf_context(&self, _ctx: &Context, args: fmt::Arguments<'_>) {
        self.errorf(args);
    }

    fn fatalf_context(&self, _ctx: &Context, args: fmt::Arguments<'_>) -> ! {
        self.fatalf(args)
    }

    fn panicf_context(&self, _ctx: &Context, args: fmt::Arguments<'_>) -> ! {
        self.panicf(args)
    }
}
