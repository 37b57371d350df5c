//! Detector errors. Most are logged and swallowed by the scanner.

use std::path::PathBuf;

use super::error_code::{self, UnvendorErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk failed under {root}: {message}")]
    Walk { root: PathBuf, message: String },

    #[error("Invalid pattern '{id}': {message}")]
    InvalidPattern { id: String, message: String },
}

impl UnvendorErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::SCAN_IO_ERROR,
            Self::Walk { .. } => error_code::SCAN_WALK_ERROR,
            Self::InvalidPattern { .. } => error_code::INVALID_PATTERN,
        }
    }
}
