//! Error types for instruction composition.

use thiserror::Error;

/// Result type alias for prompt operations.
pub type PromptResult<T> = Result<T, PromptError>;

/// Errors that can occur while composing instruction payloads.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Invalid resource type '{0}': expected '<provider>_<name>' form")]
    InvalidResourceType(String),
}
