//! Error types for module assembly.

use thiserror::Error;

/// Result type alias for module operations.
pub type ModuleResult<T> = Result<T, ModuleError>;

/// Errors that can occur while sanitizing, validating or writing a module.
#[derive(Error, Debug)]
pub enum ModuleError {
    #[error(
        "Naming token mismatch for {resource_type}: main.tf declares '{main}', \
         outputs.tf references '{outputs}'"
    )]
    NamingMismatch {
        resource_type: String,
        main: String,
        outputs: String,
    },

    #[error("Naming token for {resource_type} could not be located in {artifact}")]
    TokenNotFound {
        resource_type: String,
        artifact: String,
    },

    #[error("Structural check failed: {0}")]
    Structural(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
