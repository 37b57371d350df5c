//! Error types for every subsystem, each mapped to a stable error code.

pub mod config_error;
pub mod error_code;
pub mod generate_error;
pub mod registry_error;
pub mod scan_error;

pub use config_error::ConfigError;
pub use generate_error::GenerateError;
pub use registry_error::RegistryError;
pub use scan_error::ScanError;
