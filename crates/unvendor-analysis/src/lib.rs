//! # unvendor-analysis
//!
//! Vendor-SDK usage detection and migration planning.
//! The detector scans source files for vendor call patterns; the registry
//! tracks the resulting features and renders replacement code from templates.

#![allow(clippy::module_inception)]

pub mod detector;
pub mod registry;

pub use detector::lister::{FixedFileList, SourceLister, WalkingLister};
pub use detector::patterns::{PatternKind, PatternTable};
pub use detector::scanner::UsageDetector;
pub use detector::types::UsageRecord;
pub use registry::feature_registry::FeatureRegistry;
pub use registry::library::TemplateLibrary;
pub use registry::template::MigrationTemplate;
