use std::io;
use thiserror::Error;

/// Custom error type for the process monitor
#[derive(Error, Debug)]
pub enum CommandStateError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the process monitor
pub type Result<T> = std::result::Result<T, CommandStateError>;

impl CommandStateError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        CommandStateError::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        CommandStateError::Other(msg.into())
    }
}
