//! Error types for the logging system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Level string not in the recognized set
    #[error("invalid log level {level:?}: expected one of debug, info, warn, error, dpanic, panic, fatal")]
    InvalidLevel { level: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// A nested object or array marshaler failed
    #[error("failed to marshal field '{key}': {message}")]
    Marshal { key: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// Flushing one or more appenders failed
    #[error("failed to sync logger: {message}")]
    SyncFailed { message: String },

    /// Writer error (generic)
    #[error("Writer error: {0}")]
    WriterError(String),

    /// Channel receive error
    #[error("Failed to receive log entry from channel")]
    ChannelReceiveError,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(level: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            level: level.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a marshal error for the field stored under `key`
    pub fn marshal(key: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Marshal {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a sync error
    pub fn sync_failed(message: impl Into<String>) -> Self {
        LoggerError::SyncFailed {
            message: message.into(),
        }
    }

    /// Create a writer error (generic)
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        LoggerError::WriterError(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
