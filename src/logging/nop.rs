use super::{Logger, SharedLogger};
use crate::core::{LogLevel, Result};
use crate::field::Field;
use std::fmt;
use std::sync::Arc;

/// A logger that discards every entry
///
/// `fatal` and `panic` still exit and panic; only the output is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopLogger;

impl Logger for NopLogger {
    fn log(&self, _level: LogLevel, _msg: &str, _fields: &[Field]) {}

    fn log_fmt(&self, _level: LogLevel, _args: fmt::Arguments<'_>) {}

    fn with(&self, _fields: &[Field]) -> SharedLogger {
        Arc::new(NopLogger)
    }

    fn named(&self, _name: &str) -> SharedLogger {
        Arc::new(NopLogger)
    }

    fn sync(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field;

    #[test]
    fn test_nop_accepts_everything() {
        let logger = NopLogger;
        let child = logger.named("a").with(&[field::string("k", "v")]);
        child.info("dropped", &[field::int("n", 1)]);
        child.errorf(format_args!("dropped {}", 2));
        assert!(child.sync().is_ok());
        assert!(logger.sync().is_ok());
    }

    #[test]
    #[should_panic(expected = "still panics")]
    fn test_nop_panic_still_panics() {
        NopLogger.panic("still panics", &[]);
    }
}
