//! Configuration: `unvendor.toml` plus environment overrides.

pub mod registry_config;
pub mod scan_config;
pub mod unvendor_config;

pub use registry_config::RegistryConfig;
pub use scan_config::{DiscoveryMode, ScanConfig};
pub use unvendor_config::UnvendorConfig;
