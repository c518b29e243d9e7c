//! Process-wide logger slot
//!
//! Only the outermost composition root should touch this; everything else
//! takes a [`SharedLogger`] through its constructor.

use super::SharedLogger;
use parking_lot::RwLock;

static CURRENT: RwLock<Option<SharedLogger>> = parking_lot::const_rwlock(None);

/// Install `logger` as the process-wide logger, replacing any previous one
pub fn set_logger(logger: SharedLogger) {
    *CURRENT.write() = Some(logger);
}

/// The process-wide logger
///
/// # Panics
///
/// Panics if [`set_logger`] has not been called.
pub fn get_logger() -> SharedLogger {
    match try_get_logger() {
        Some(logger) => logger,
        None => panic!("Logging service is not initialized."),
    }
}

pub fn try_get_logger() -> Option<SharedLogger> {
    CURRENT.read().clone()
}

#[cfg(test)]
pub(crate) fn clear_logger() {
    *CURRENT.write() = None;
}
