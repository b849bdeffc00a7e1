use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failure reported by a [`ResourceClient`](crate::ResourceClient).
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: String, name: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed resource document {location}: {reason}")]
    Malformed { location: String, reason: String },

    #[error("Resource source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("failed to {operation}: {source}")]
    Fetch {
        operation: String,
        #[source]
        source: FetchError,
    },
}

impl AnalysisError {
    pub fn fetch(operation: impl Into<String>, source: FetchError) -> Self {
        Self::Fetch {
            operation: operation.into(),
            source,
        }
    }
}
