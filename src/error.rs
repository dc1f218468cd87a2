//! Error types for uemacs-flash

use thiserror::Error;

/// Result type alias for uemacs-flash operations
pub type Result<T> = std::result::Result<T, FlashError>;

/// Flash error types
#[derive(Error, Debug)]
pub enum FlashError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed settings file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid duration: {0} (expected a finite, non-negative number of seconds)")]
    InvalidDuration(f64),

    #[error("Invalid width: {0} (expected a positive integer)")]
    InvalidWidth(usize),

    #[error("Unknown thing: {0}")]
    UnknownThing(String),

    #[error("No such command: {0}")]
    UnknownCommand(String),

    #[error("{0}")]
    Message(String),
}
