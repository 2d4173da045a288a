//! Error types for the simulation

use thiserror::Error;

/// The main error type for simulation operations
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Entity collection has no catcher")]
    MissingCatcher,

    #[error("Entity collection already has a catcher")]
    DuplicateCatcher,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;
