//! Entry dispatcher
//!
//! The backend every [`FieldLogger`](crate::logging::FieldLogger) delegates
//! to: level filtering, then either synchronous writes under the appender
//! lock or a bounded queue drained by one worker thread.

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    overflow_policy::{LogPriority, OverflowCallback, OverflowPolicy},
};
use crossbeam_channel::{bounded, Receiver, SendError, SendTimeoutError, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default shutdown timeout for dispatcher cleanup (5 seconds)
///
/// Used when the dispatcher is dropped without explicit shutdown.
/// For custom timeout control, use [`Dispatcher::shutdown`].
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

const BATCH_SIZE: usize = 50;

type Appenders = Arc<RwLock<Vec<Box<dyn Appender>>>>;

/// Work item for the async worker
enum Message {
    Entry(LogEntry),
    /// Flush barrier: every entry queued before it is written and flushed
    /// before the worker replies.
    Flush(Sender<Result<()>>),
}

pub struct Dispatcher {
    min_level: RwLock<LogLevel>,
    appenders: Appenders,
    sender: RwLock<Option<Sender<Message>>>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    metrics: Arc<LoggerMetrics>,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
}

impl Dispatcher {
    /// Synchronous dispatcher with no appenders
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: RwLock::new(LogLevel::Info),
            appenders: Arc::new(RwLock::new(Vec::new())),
            sender: RwLock::new(None),
            worker: Mutex::new(None),
            metrics: Arc::new(LoggerMetrics::new()),
            overflow_policy: OverflowPolicy::AlertAndDrop,
            on_overflow: None,
        }
    }

    #[must_use]
    pub fn with_async(buffer_size: usize) -> Self {
        Self::with_async_config(buffer_size, OverflowPolicy::AlertAndDrop, None)
    }

    /// Asynchronous dispatcher with custom overflow configuration
    #[must_use]
    pub fn with_async_config(
        buffer_size: usize,
        overflow_policy: OverflowPolicy,
        on_overflow: Option<OverflowCallback>,
    ) -> Self {
        let (sender, receiver) = bounded(buffer_size.max(1));
        let appenders: Appenders = Arc::new(RwLock::new(Vec::new()));
        let appenders_clone = Arc::clone(&appenders);
        let metrics = Arc::new(LoggerMetrics::new());
        let metrics_clone = Arc::clone(&metrics);

        let handle = thread::Builder::new()
            .name("log-dispatcher".to_string())
            .spawn(move || Self::run_worker(&receiver, &appenders_clone, &metrics_clone));

        let (sender, worker) = match handle {
            Ok(handle) => (Some(sender), Some(handle)),
            Err(e) => {
                eprintln!(
                    "[LOGGER ERROR] Failed to spawn dispatcher thread: {}. \
                     Falling back to synchronous mode.",
                    e
                );
                (None, None)
            }
        };

        Self {
            min_level: RwLock::new(LogLevel::Info),
            appenders,
            sender: RwLock::new(sender),
            worker: Mutex::new(worker),
            metrics,
            overflow_policy,
            on_overflow,
        }
    }

    /// Create a builder for Dispatcher
    ///
    /// # Example
    /// ```
    /// use cleanstack_logging::prelude::*;
    ///
    /// let dispatcher = Dispatcher::builder()
    ///     .min_level(LogLevel::Debug)
    ///     .async_mode(1000)
    ///     .build();
    /// assert!(dispatcher.is_async());
    /// ```
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    fn run_worker(receiver: &Receiver<Message>, appenders: &Appenders, metrics: &LoggerMetrics) {
        // Batch processing: collect queued messages before writing to reduce
        // lock contention and I/O operations
        while let Ok(first) = receiver.recv() {
            let mut pending = Vec::with_capacity(BATCH_SIZE);
            pending.push(first);
            while pending.len() < BATCH_SIZE {
                match receiver.try_recv() {
                    Ok(message) => pending.push(message),
                    Err(_) => break,
                }
            }

            Self::process_messages(appenders, pending, metrics);
        }
    }

    /// Write queued entries in order, honoring flush barriers
    fn process_messages(appenders: &Appenders, pending: Vec<Message>, metrics: &LoggerMetrics) {
        let mut appenders_guard = appenders.write();
        let mut wrote_entries = false;

        for message in pending {
            match message {
                Message::Entry(entry) => {
                    Self::write_entry(&mut appenders_guard, &entry, metrics, "");
                    wrote_entries = true;
                }
                Message::Flush(ack) => {
                    let result = Self::flush_all(&mut appenders_guard);
                    wrote_entries = false;
                    // The waiting caller may have given up
                    let _ = ack.send(result);
                }
            }
        }

        // Flush after each batch to ensure timely writes
        if wrote_entries {
            let _ = Self::flush_all(&mut appenders_guard);
        }
    }

    /// Write one entry to every appender with per-appender panic isolation
    ///
    /// Returns `true` if any appender failed.
    fn write_entry(
        appenders: &mut [Box<dyn Appender>],
        entry: &LogEntry,
        metrics: &LoggerMetrics,
        mode: &str,
    ) -> bool {
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = catch_unwind(AssertUnwindSafe(|| appender.append(entry)));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender #{} failed{}: {}", idx, mode, e);
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked{}: {}. \
                         Other appenders continue to function.",
                        idx,
                        mode,
                        panic_message(&*panic_info)
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            metrics.record_dropped();
        } else {
            metrics.record_logged();
        }

        has_error
    }

    /// Flush every appender, returning the first failure
    fn flush_all(appenders: &mut [Box<dyn Appender>]) -> Result<()> {
        let mut first_error = None;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let flush_result = catch_unwind(AssertUnwindSafe(|| appender.flush()));

            let error = match flush_result {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Appender #{} flush failed: {}", idx, e);
                    e
                }
                Err(panic_info) => {
                    let msg = panic_message(&*panic_info);
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked during flush: {}. \
                         Other appenders continue to function.",
                        idx, msg
                    );
                    LoggerError::sync_failed(format!("appender #{} panicked: {}", idx, msg))
                }
            };

            first_error.get_or_insert(error);
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    pub fn is_async(&self) -> bool {
        self.sender.read().is_some()
    }

    /// Route an entry to the appenders, applying the level filter
    pub fn dispatch(&self, entry: LogEntry) {
        if !self.enabled(entry.level) {
            return;
        }

        let sender_guard = self.sender.read();
        if let Some(ref sender) = *sender_guard {
            let priority = entry.level.priority();

            match sender.try_send(Message::Entry(entry)) {
                Ok(()) => {}
                Err(TrySendError::Full(Message::Entry(entry))) => {
                    self.handle_overflow(sender, entry, priority);
                }
                Err(TrySendError::Full(Message::Flush(_))) => {}
                Err(TrySendError::Disconnected(_)) => {
                    // Shutting down
                }
            }
        } else {
            drop(sender_guard);
            let mut appenders = self.appenders.write();
            Self::write_entry(&mut appenders, &entry, &self.metrics, " (sync)");
        }
    }

    /// Handle queue overflow based on configured policy and entry priority
    fn handle_overflow(&self, sender: &Sender<Message>, entry: LogEntry, priority: LogPriority) {
        self.metrics.record_queue_full();

        // Critical entries (Error and above) are never dropped; they wait
        // for space so they stay behind entries queued before them
        if priority == LogPriority::Critical {
            self.send_critical(sender, entry);
            return;
        }

        match &self.overflow_policy {
            OverflowPolicy::DropNewest => {
                self.metrics.record_dropped();
            }

            OverflowPolicy::DropOldest => {
                // Dropping the oldest needs the receiving end
                self.alert_and_drop(true);
            }

            OverflowPolicy::Block => {
                self.metrics.record_block();
                let _ = sender.send(Message::Entry(entry));
            }

            OverflowPolicy::BlockWithTimeout(timeout) => {
                self.metrics.record_block();
                match sender.send_timeout(Message::Entry(entry), *timeout) {
                    Ok(()) => {}
                    Err(SendTimeoutError::Timeout(_)) => self.alert_and_drop(false),
                    Err(SendTimeoutError::Disconnected(_)) => {}
                }
            }

            OverflowPolicy::AlertAndDrop => {
                self.alert_and_drop(false);
            }
        }
    }

    fn send_critical(&self, sender: &Sender<Message>, entry: LogEntry) {
        self.metrics.record_critical_preserved();
        self.metrics.record_block();
        if let Err(SendError(Message::Entry(entry))) = sender.send(Message::Entry(entry)) {
            // Worker gone; write directly
            let mut appenders = self.appenders.write();
            Self::write_entry(&mut appenders, &entry, &self.metrics, " (critical)");
        }
    }

    fn alert_and_drop(&self, is_drop_oldest_fallback: bool) {
        let dropped_count = self.metrics.record_dropped();

        // Alert on first drop and periodically thereafter
        let should_alert = dropped_count == 0 || (dropped_count + 1) % 1000 == 0;

        if should_alert {
            if is_drop_oldest_fallback {
                eprintln!(
                    "[LOGGER WARNING] Queue full, {} logs dropped. \
                     Note: DropOldest policy not fully supported, using AlertAndDrop.",
                    dropped_count + 1
                );
            } else {
                eprintln!(
                    "[LOGGER WARNING] Queue full, {} logs dropped. \
                     Consider increasing buffer size or using a different overflow policy.",
                    dropped_count + 1
                );
            }

            if let Some(ref callback) = self.on_overflow {
                callback(dropped_count + 1);
            }
        }
    }

    /// Counters for dropped, logged and overflowed entries
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Write and flush everything dispatched before this call.
    ///
    /// In async mode a flush barrier is queued and this blocks until the
    /// worker has drained the queue up to it. Safe to call concurrently and
    /// repeatedly. Returns the first appender flush failure.
    pub fn sync(&self) -> Result<()> {
        let barrier = {
            let sender_guard = self.sender.read();
            match *sender_guard {
                Some(ref sender) => {
                    let (ack_tx, ack_rx) = bounded(1);
                    match sender.send(Message::Flush(ack_tx)) {
                        Ok(()) => Some(ack_rx),
                        Err(_) => None,
                    }
                }
                None => None,
            }
        };

        match barrier {
            Some(ack_rx) => ack_rx
                .recv()
                .map_err(|_| LoggerError::ChannelReceiveError)?,
            None => {
                let mut appenders = self.appenders.write();
                Self::flush_all(&mut appenders)
            }
        }
    }

    /// Gracefully stop the worker, waiting up to `timeout` for the queue to drain
    ///
    /// Returns `true` if shutdown completed within the timeout.
    ///
    /// # Example
    ///
    /// ```
    /// use cleanstack_logging::Dispatcher;
    /// use std::time::Duration;
    ///
    /// let dispatcher = Dispatcher::with_async(1000);
    /// assert!(dispatcher.shutdown(Duration::from_secs(10)));
    /// assert!(!dispatcher.is_async());
    /// ```
    pub fn shutdown(&self, timeout: Duration) -> bool {
        // Closing the channel signals the worker to drain and exit
        drop(self.sender.write().take());

        if let Some(handle) = self.worker.lock().take() {
            let start = Instant::now();

            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!(
                            "[LOGGER ERROR] Dispatcher thread panicked during shutdown: {}",
                            panic_message(&*e)
                        );
                        return false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOGGER WARNING] Dispatcher thread did not finish within {:?} timeout. \
                         Some logs may be lost.",
                        timeout
                    );
                    return false;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }

        if let Err(e) = self.sync() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            return false;
        }

        true
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Dispatcher shutting down with {} dropped logs (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing a [`Dispatcher`] with a fluent API
///
/// # Example
/// ```
/// use cleanstack_logging::prelude::*;
/// use std::sync::Arc;
///
/// let dispatcher = Dispatcher::builder()
///     .min_level(LogLevel::Debug)
///     .appender(MemoryAppender::new())
///     .async_mode(1000)
///     .overflow_policy(OverflowPolicy::AlertAndDrop)
///     .on_overflow(Arc::new(|count| {
///         eprintln!("ALERT: {} logs dropped", count);
///     }))
///     .build();
/// ```
pub struct DispatcherBuilder {
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
    async_buffer: Option<usize>,
    overflow_policy: OverflowPolicy,
    on_overflow: Option<OverflowCallback>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            appenders: Vec::new(),
            async_buffer: None,
            overflow_policy: OverflowPolicy::AlertAndDrop,
            on_overflow: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_appender(mut self, appender: Box<dyn Appender>) -> Self {
        self.appenders.push(appender);
        self
    }

    /// Enable async mode with the given queue capacity
    ///
    /// If not called, entries are written synchronously.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_size: usize) -> Self {
        self.async_buffer = Some(buffer_size);
        self
    }

    /// Determines what happens when the async queue is full.
    /// Default is `AlertAndDrop`.
    #[must_use = "builder methods return a new value"]
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = policy;
        self
    }

    /// Invoked with the total dropped count when entries are dropped
    #[must_use = "builder methods return a new value"]
    pub fn on_overflow(mut self, callback: OverflowCallback) -> Self {
        self.on_overflow = Some(callback);
        self
    }

    pub fn build(self) -> Dispatcher {
        let dispatcher = match self.async_buffer {
            Some(size) => Dispatcher::with_async_config(size, self.overflow_policy, self.on_overflow),
            None => Dispatcher::new(),
        };

        dispatcher.set_min_level(self.min_level);
        for appender in self.appenders {
            dispatcher.add_appender(appender);
        }

        dispatcher
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
