//! Overflow policies for the asynchronous dispatch queue
//!
//! When the queue between loggers and the worker thread is full, the policy
//! decides what happens to the entry that does not fit.

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Policy for handling queue overflow in async dispatch
///
/// # Example
///
/// ```
/// use cleanstack_logging::OverflowPolicy;
/// use std::time::Duration;
///
/// let policy = OverflowPolicy::default();
/// assert_eq!(policy, OverflowPolicy::AlertAndDrop);
///
/// let policy = OverflowPolicy::BlockWithTimeout(Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Drop the new entry; only metrics record it.
    DropNewest,

    /// Drop the oldest queued entry.
    ///
    /// The channel gives no access to the receiving end from the producer
    /// side, so this falls back to `AlertAndDrop` with an extra warning.
    DropOldest,

    /// Block the caller until space is available.
    Block,

    /// Block up to the timeout, then drop.
    BlockWithTimeout(Duration),

    /// Drop, warn on stderr and invoke the overflow callback.
    #[default]
    AlertAndDrop,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::DropNewest => write!(f, "DropNewest"),
            OverflowPolicy::DropOldest => write!(f, "DropOldest"),
            OverflowPolicy::Block => write!(f, "Block"),
            OverflowPolicy::BlockWithTimeout(d) => write!(f, "BlockWithTimeout({:?})", d),
            OverflowPolicy::AlertAndDrop => write!(f, "AlertAndDrop"),
        }
    }
}

/// Priority level for entry preservation during overflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum LogPriority {
    /// Debug, Info
    #[default]
    Normal = 0,
    /// Warn
    High = 1,
    /// Error and above; never dropped
    Critical = 2,
}

impl fmt::Display for LogPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogPriority::Normal => write!(f, "Normal"),
            LogPriority::High => write!(f, "High"),
            LogPriority::Critical => write!(f, "Critical"),
        }
    }
}

impl LogLevel {
    /// Overflow priority of entries at this level
    pub fn priority(&self) -> LogPriority {
        match self {
            LogLevel::Debug | LogLevel::Info => LogPriority::Normal,
            LogLevel::Warn => LogPriority::High,
            LogLevel::Error | LogLevel::DPanic | LogLevel::Panic | LogLevel::Fatal => {
                LogPriority::Critical
            }
        }
    }
}

/// Callback type for overflow notifications
///
/// The parameter is the total count of dropped entries so far.
pub type OverflowCallback = Arc<dyn Fn(u64) + Send + Sync>;
