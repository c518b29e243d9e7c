//! Dispatcher metrics
//!
//! Counters for monitoring the backend: dropped entries, queue overflow,
//! blocking events and field encoding failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for backend observability
///
/// # Example
///
/// ```
/// use cleanstack_logging::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_dropped();
/// metrics.record_logged();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.total_logged(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Entries dropped due to queue overflow or appender failure
    dropped_count: AtomicU64,

    /// Entries written by every appender
    total_logged: AtomicU64,

    /// Times the queue was found full
    queue_full_events: AtomicU64,

    /// Times a producer blocked waiting for queue space
    block_events: AtomicU64,

    /// Critical entries that waited for queue space instead of being dropped
    critical_logs_preserved: AtomicU64,

    /// Fields whose marshaler failed during encoding
    encode_errors: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            dropped_count: AtomicU64::new(0),
            total_logged: AtomicU64::new(0),
            queue_full_events: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
            critical_logs_preserved: AtomicU64::new(0),
            encode_errors: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_full_events(&self) -> u64 {
        self.queue_full_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn critical_logs_preserved(&self) -> u64 {
        self.critical_logs_preserved.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn encode_errors(&self) -> u64 {
        self.encode_errors.load(Ordering::Relaxed)
    }

    /// Record a dropped entry, returning the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_full(&self) -> u64 {
        self.queue_full_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_critical_preserved(&self) -> u64 {
        self.critical_logs_preserved.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_encode_error(&self) -> u64 {
        self.encode_errors.fetch_add(1, Ordering::Relaxed)
    }

    /// Drop rate as a percentage (0.0 - 100.0); 0.0 before anything is processed.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.total_logged() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.dropped_count.store(0, Ordering::Relaxed);
        self.total_logged.store(0, Ordering::Relaxed);
        self.queue_full_events.store(0, Ordering::Relaxed);
        self.block_events.store(0, Ordering::Relaxed);
        self.critical_logs_preserved.store(0, Ordering::Relaxed);
        self.encode_errors.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            dropped_count: AtomicU64::new(self.dropped_count()),
            total_logged: AtomicU64::new(self.total_logged()),
            queue_full_events: AtomicU64::new(self.queue_full_events()),
            block_events: AtomicU64::new(self.block_events()),
            critical_logs_preserved: AtomicU64::new(self.critical_logs_preserved()),
            encode_errors: AtomicU64::new(self.encode_errors()),
        }
    }
}
