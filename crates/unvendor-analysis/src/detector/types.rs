//! Usage records produced by a scan.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::patterns::PatternKind;

/// One match of one pattern on one line of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub file: PathBuf,
    /// 1-based.
    pub line: u32,
    /// The whole source line, trimmed.
    pub line_text: String,
    /// The text the pattern matched.
    pub matched_text: String,
    pub kind: PatternKind,
    pub suggestion: String,
    /// Capture groups of the match, in order (entity/method names and the like).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub captures: Vec<String>,
}
