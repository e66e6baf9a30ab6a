//! Error types for jars-install

use std::path::PathBuf;
use std::process::ExitStatus;

/// Result type for jars-install operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jars-install operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] jars_core::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No component spec found in {dir} (expected exactly one *.jars.toml)")]
    SpecNotFound { dir: PathBuf },

    #[error("Multiple component specs found in {dir}: {candidates:?}; pass one explicitly")]
    SpecAmbiguous {
        dir: PathBuf,
        candidates: Vec<String>,
    },

    #[error("Invalid component spec at {path}: {message}")]
    InvalidSpec { path: PathBuf, message: String },

    #[error(
        "`{program}` was not found on PATH; install Apache Maven (https://maven.apache.org) so jar dependencies can be resolved"
    )]
    MissingTool { program: String },

    #[error("Dependency listing failed: {status}")]
    ToolFailed { status: ExitStatus },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
