//! Formatting macros for the `*f` logger methods.
//!
//! These macros build the message with `format_args!`, so a disabled level
//! costs no formatting. The logger is any expression whose type implements
//! [`Logger`](crate::logging::Logger), including a `SharedLogger`.
//!
//! # Examples
//!
//! ```
//! use cleanstack_logging::prelude::*;
//! use cleanstack_logging::infof;
//!
//! let logger = logging::new_nop();
//!
//! // Basic logging
//! infof!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! infof!(logger, "Server listening on port {}", port);
//! ```

/// Log a formatted message at an explicit level.
///
/// # Examples
///
/// ```
/// # use cleanstack_logging::prelude::*;
/// # let logger = logging::new_nop();
/// use cleanstack_logging::logf;
/// logf!(logger, LogLevel::Info, "Simple message");
/// logf!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        {
            use $crate::logging::Logger as _;
            $logger.log_fmt($level, format_args!($($arg)+))
        }
    };
}

/// Log a formatted debug-level message.
///
/// # Examples
///
/// ```
/// # use cleanstack_logging::prelude::*;
/// # let logger = logging::new_nop();
/// use cleanstack_logging::debugf;
/// debugf!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        {
            use $crate::logging::Logger as _;
            $logger.debugf(format_args!($($arg)+))
        }
    };
}

/// Log a formatted info-level message.
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        {
            use $crate::logging::Logger as _;
            $logger.infof(format_args!($($arg)+))
        }
    };
}

/// Log a formatted warning-level message.
///
/// # Examples
///
/// ```
/// # use cleanstack_logging::prelude::*;
/// # let logger = logging::new_nop();
/// use cleanstack_logging::warnf;
/// warnf!(logger, "Memory usage high: {}%", 85);
/// ```
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        {
            use $crate::logging::Logger as _;
            $logger.warnf(format_args!($($arg)+))
        }
    };
}

/// Log a formatted error-level message.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        {
            use $crate::logging::Logger as _;
            $logger.errorf(format_args!($($arg)+))
        }
    };
}

/// Log a formatted fatal-level message, then exit with status 1.
///
/// # Examples
///
/// ```no_run
/// # use cleanstack_logging::prelude::*;
/// # let logger = logging::new_nop();
/// use cleanstack_logging::fatalf;
/// fatalf!(logger, "Cannot bind port {}", 8080);
/// ```
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        {
            use $crate::logging::Logger as _;
            $logger.fatalf(format_args!($($arg)+))
        }
    };
}

/// Log a formatted panic-level message, then panic with it.
///
/// # Examples
///
/// ```should_panic
/// # use cleanstack_logging::prelude::*;
/// # let logger = logging::new_nop();
/// use cleanstack_logging::panicf;
/// panicf!(logger, "Invariant broken: {}", "negative balance");
/// ```
#[macro_export]
macro_rules! panicf {
    ($logger:expr, $($arg:tt)+) => {
        {
            use $crate::logging::Logger as _;
            $logger.panicf(format_args!($($arg)+))
        }
    };
}
