// Error types for the fallible edges around the rating engine
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CuratorError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Logging initialization failed: {message}")]
    Logging { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl From<String> for CuratorError {
    fn from(message: String) -> Self {
        CuratorError::InvalidInput { message }
    }
}

impl From<&str> for CuratorError {
    fn from(message: &str) -> Self {
        CuratorError::InvalidInput { message: message.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, CuratorError>;
