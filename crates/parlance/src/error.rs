//! Error types for the language file store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or saving language files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading, writing or creating a file failed.
    #[error("failed to access \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON language data is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML language data is invalid: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, LoadError>;
