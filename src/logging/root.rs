//! Root logger constructors for the composition root

use super::adapter::FieldLogger;
use super::config::{Environment, LoggerConfig};
use super::nop::NopLogger;
use crate::core::{LogLevel, Result};

/// Parse a minimum level name
///
/// Case-insensitive. The empty string selects `Info`.
///
/// ```
/// use cleanstack_logging::logging::parse_level;
/// use cleanstack_logging::LogLevel;
///
/// assert_eq!(parse_level("").unwrap(), LogLevel::Info);
/// assert_eq!(parse_level("DPANIC").unwrap(), LogLevel::DPanic);
/// assert!(parse_level("verbose").is_err());
/// ```
pub fn parse_level(level: &str) -> Result<LogLevel> {
    level.parse()
}

/// JSON lines on stderr; stack traces from `Error` up
pub fn new_production(level: &str) -> Result<FieldLogger> {
    LoggerConfig::production().with_level(level).build()
}

/// Colored text on stderr; stack traces from `Warn` up, `DPanic` panics
pub fn new_development(level: &str) -> Result<FieldLogger> {
    LoggerConfig::development().with_level(level).build()
}

/// Development logger for `"development"`, production logger otherwise
pub fn new_logger(env: &str, level: &str) -> Result<FieldLogger> {
    match Environment::from_name(env) {
        Environment::Development => new_development(level),
        Environment::Production => new_production(level),
    }
}

pub fn new_nop() -> NopLogger {
    NopLogger
}

/// Unwrap a constructed logger, panicking with the construction error
///
/// For bootstrap code where running without a logger is not an option.
///
/// ```should_panic
/// use cleanstack_logging::logging::{must, new_production};
///
/// let logger = must(new_production("chatty"));
/// ```
pub fn must<L>(result: Result<L>) -> L {
    match result {
        Ok(logger) => logger,
        Err(e) => panic!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;

    #[test]
    fn test_parse_level_recognized_set() {
        for name in ["debug", "info", "warn", "error", "dpanic", "panic", "fatal"] {
            assert!(parse_level(name).is_ok(), "{} should parse", name);
        }
        assert_eq!(parse_level("").unwrap(), LogLevel::Info);
        assert_eq!(parse_level("Error").unwrap(), LogLevel::Error);
    }

    #[test]
    fn test_parse_level_rejects_unknown() {
        let err = parse_level("nonsense").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));
        assert!(err.to_string().contains("nonsense"));
    }

    #[test]
    fn test_constructors_apply_level() {
        let production = new_production("error").unwrap();
        assert_eq!(production.dispatcher().min_level(), LogLevel::Error);
        assert!(!production.options().development);

        let development = new_development("").unwrap();
        assert_eq!(development.dispatcher().min_level(), LogLevel::Info);
        assert!(development.options().development);
    }

    #[test]
    fn test_new_logger_selects_environment() {
        assert!(new_logger("development", "info").unwrap().options().development);
        assert!(!new_logger("production", "info").unwrap().options().development);
        assert!(!new_logger("", "info").unwrap().options().development);
        assert!(new_logger("production", "bogus").is_err());
    }

    #[test]
    fn test_must_returns_logger() {
        let logger = must(new_production("warn"));
        assert_eq!(logger.dispatcher().min_level(), LogLevel::Warn);
    }

    #[test]
    #[should_panic(expected = "invalid log level")]
    fn test_must_panics_on_error() {
        must(new_development("loudest"));
    }
}
