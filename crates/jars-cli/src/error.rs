//! Error types for jars-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from jars-core
    #[error(transparent)]
    Core(#[from] jars_core::Error),

    /// Error from jars-install
    #[error(transparent)]
    Install(#[from] jars_install::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
