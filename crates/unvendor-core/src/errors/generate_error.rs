//! Script generation outcomes that produce no script.

use crate::types::identifiers::FeatureId;

use super::error_code::{self, UnvendorErrorCode};

/// Why `generate_migration_script` produced nothing.
///
/// Both variants are ordinary outcomes, not faults. Callers that do not care
/// about the distinction can treat any `Err` as "no suitable template".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("Feature not found: {0}")]
    FeatureNotFound(FeatureId),

    #[error("No suitable template found for feature {0}")]
    NoMatchingTemplate(FeatureId),
}

impl UnvendorErrorCode for GenerateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FeatureNotFound(_) => error_code::FEATURE_NOT_FOUND,
            Self::NoMatchingTemplate(_) => error_code::NO_MATCHING_TEMPLATE,
        }
    }
}
