//! Stable, machine-readable error codes.

pub const SCAN_IO_ERROR: &str = "SCAN_IO_ERROR";
pub const SCAN_WALK_ERROR: &str = "SCAN_WALK_ERROR";
pub const INVALID_PATTERN: &str = "INVALID_PATTERN";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
pub const FEATURE_NOT_FOUND: &str = "FEATURE_NOT_FOUND";
pub const NO_MATCHING_TEMPLATE: &str = "NO_MATCHING_TEMPLATE";
pub const STATE_IO_ERROR: &str = "STATE_IO_ERROR";
pub const STATE_CORRUPT: &str = "STATE_CORRUPT";

/// Implemented by every error enum in the workspace.
pub trait UnvendorErrorCode {
    fn error_code(&self) -> &'static str;
}
