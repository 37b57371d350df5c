//! Errors raised while loading or saving a registry snapshot.

use std::path::PathBuf;

use super::error_code::{self, UnvendorErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("State file I/O failed at {path}: {source}")]
    StateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("State file {path} is corrupt: {message}")]
    StateCorrupt { path: PathBuf, message: String },

    #[error("Invalid template '{name}': {message}")]
    InvalidTemplate { name: String, message: String },
}

impl UnvendorErrorCode for RegistryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::StateIo { .. } => error_code::STATE_IO_ERROR,
            Self::StateCorrupt { .. } => error_code::STATE_CORRUPT,
            Self::InvalidTemplate { .. } => error_code::INVALID_PATTERN,
        }
    }
}
