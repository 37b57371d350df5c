//! Vendor-SDK pattern table.
//!
//! Each pattern is independent: a single line may match several kinds, and a
//! pattern may match several times on one line.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unvendor_core::errors::ScanError;

/// The kind of vendor usage a pattern detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    EntityMethod,
    FunctionCall,
    AuthMethod,
    ImportStatement,
    Dependency,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntityMethod => "entity_method",
            Self::FunctionCall => "function_call",
            Self::AuthMethod => "auth_method",
            Self::ImportStatement => "import_statement",
            Self::Dependency => "dependency",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uncompiled pattern definition.
#[derive(Debug, Clone)]
pub struct PatternDef {
    pub kind: PatternKind,
    pub pattern: &'static str,
    pub suggestion: &'static str,
}

/// A compiled pattern.
#[derive(Debug, Clone)]
pub struct UsagePattern {
    pub kind: PatternKind,
    pub regex: Regex,
    pub suggestion: String,
}

impl UsagePattern {
    pub fn compile(def: &PatternDef) -> Result<Self, ScanError> {
        let regex = Regex::new(def.pattern).map_err(|e| ScanError::InvalidPattern {
            id: def.kind.as_str().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            kind: def.kind,
            regex,
            suggestion: def.suggestion.to_string(),
        })
    }
}

/// Ordered set of compiled patterns. Table order decides record order within a line.
#[derive(Debug, Clone)]
pub struct PatternTable {
    patterns: Vec<UsagePattern>,
}

impl PatternTable {
    /// Compile `defs`, logging and skipping any that fail.
    pub fn from_defs(defs: &[PatternDef]) -> Self {
        let mut patterns = Vec::with_capacity(defs.len());
        for def in defs {
            match UsagePattern::compile(def) {
                Ok(p) => patterns.push(p),
                Err(e) => tracing::warn!(kind = def.kind.as_str(), error = %e, "skipping pattern"),
            }
        }
        Self { patterns }
    }

    pub fn patterns(&self) -> &[UsagePattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::from_defs(DEFAULT_PATTERNS)
    }
}

/// The vendor call patterns and their remediation hints.
pub const DEFAULT_PATTERNS: &[PatternDef] = &[
    PatternDef {
        kind: PatternKind::EntityMethod,
        pattern: r"base44Entities\.([A-Za-z_$][\w$]*)\.([A-Za-z_$][\w$]*)\s*\(",
        suggestion: "Replace with REST API call",
    },
    PatternDef {
        kind: PatternKind::FunctionCall,
        pattern: r"base44Entities\.functions\.([A-Za-z_$][\w$]*)\s*\(",
        suggestion: "Replace with REST API function call",
    },
    PatternDef {
        kind: PatternKind::AuthMethod,
        pattern: r"base44Auth\.([A-Za-z_$][\w$]*)\s*\(",
        suggestion: "Replace with REST auth API",
    },
    PatternDef {
        kind: PatternKind::ImportStatement,
        pattern: r"\bimport\b[^;]*base44",
        suggestion: "Remove import and use REST client instead",
    },
    PatternDef {
        kind: PatternKind::Dependency,
        pattern: r"@base44/sdk",
        suggestion: "Remove @base44/sdk dependency",
    },
];
