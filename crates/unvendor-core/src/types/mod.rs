//! Shared domain types.

pub mod feature;
pub mod identifiers;
