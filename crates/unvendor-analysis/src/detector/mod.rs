//! Line-level detection of vendor-SDK usage.

pub mod extraction;
pub mod lister;
pub mod patterns;
pub mod report;
pub mod scanner;
pub mod types;
pub mod walker;
