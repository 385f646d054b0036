//! Error types for the scour library.

use thiserror::Error;

/// Main error type for scour operations. The pipeline itself never fails;
/// errors only arise at the configuration and table entry boundaries.
#[derive(Debug, Error)]
pub enum ScourError {
    /// Invalid or inconsistent configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed table handed in by the loader.
    #[error("Malformed table: {0}")]
    Shape(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for scour operations.
pub type Result<T> = std::result::Result<T, ScourError>;
