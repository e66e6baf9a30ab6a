//! Error types for jars-core

use std::path::PathBuf;

/// Result type for jars-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jars-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "the dependent package may need reinstalling to restore the missing archive ({gav}): {cause}"
    )]
    LoadFailure { gav: String, cause: String },

    #[error("Failed to read properties at {path}: {message}")]
    Properties { path: PathBuf, message: String },
}
