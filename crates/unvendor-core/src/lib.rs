//! # unvendor-core
//!
//! Foundation crate for the unvendor migration tooling.
//! Defines the feature types, errors, config, change events, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::UnvendorConfig;
pub use errors::error_code::UnvendorErrorCode;
pub use events::dispatcher::EventDispatcher;
pub use events::handler::FeatureChangeHandler;
pub use types::feature::{Feature, FeatureStatus, MigrationStats, NewFeature, Priority};
pub use types::identifiers::FeatureId;
