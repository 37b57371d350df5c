//! Feature registry and the migration template engine.

pub mod feature_registry;
pub mod library;
pub mod snapshot;
pub mod template;
pub mod templating;
