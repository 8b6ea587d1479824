//! Error types for the generation backend.

use thiserror::Error;

/// Result type alias for backend operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// Errors that can occur while talking to the generation backend.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("No LLM backend configured. Set OPENAI_API_KEY or ANTHROPIC_API_KEY.")]
    NotConfigured,

    #[error("Generation backend error: {0}")]
    Backend(String),

    #[error("Failed to parse backend response: {0}")]
    Parse(String),

    #[error("Generation failed for {0}")]
    Generation(String),
}
