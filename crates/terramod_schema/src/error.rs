//! Error types for schema handling.

use thiserror::Error;

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while loading or normalizing provider schemas.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Provider '{0}' not found in schema document")]
    ProviderNotFound(String),

    #[error("Resource type '{0}' not found in schema document")]
    ResourceNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
