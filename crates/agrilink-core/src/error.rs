//! Error types for agrilink-core

use thiserror::Error;

/// Result type alias using agrilink-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in agrilink-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session storage error
    #[error(transparent)]
    Session(#[from] crate::session::SessionError),

    /// Backend API error
    #[error(transparent)]
    Api(#[from] crate::api::ApiError),
}
