// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced to callers. The tree build itself never fails; these
/// cover the collaborators around it (snapshot files, configuration, CLI input).
#[derive(Debug, Error)]
pub enum RefnetError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("Invalid config {path}: {source}")]
    Config {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("Focus target not found: {0}")]
    FocusNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RefnetError>;

// Allow `?` on std::io::Error by converting to RefnetError::Io with unknown path.
impl From<std::io::Error> for RefnetError {
    fn from(source: std::io::Error) -> Self {
        RefnetError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
