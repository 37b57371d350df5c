//! Feature records and their lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identifiers::FeatureId;

/// Migration lifecycle of a feature.
///
/// `detected → planned → migrating → migrated`, with any non-terminal state
/// allowed to drop to `failed`. The registry does not enforce this; see
/// [`FeatureStatus::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureStatus {
    Detected,
    Planned,
    Migrating,
    Migrated,
    Failed,
}

impl FeatureStatus {
    pub const ALL: [FeatureStatus; 5] = [
        Self::Detected,
        Self::Planned,
        Self::Migrating,
        Self::Migrated,
        Self::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detected => "detected",
            Self::Planned => "planned",
            Self::Migrating => "migrating",
            Self::Migrated => "migrated",
            Self::Failed => "failed",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "detected" => Some(Self::Detected),
            "planned" => Some(Self::Planned),
            "migrating" => Some(Self::Migrating),
            "migrated" => Some(Self::Migrated),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Migrated | Self::Failed)
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Detected => 0,
            Self::Planned => 1,
            Self::Migrating => 2,
            Self::Migrated => 3,
            Self::Failed => 4,
        }
    }

    /// Whether moving from `self` to `next` follows the lifecycle.
    pub fn can_transition_to(&self, next: FeatureStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        if next == Self::Failed {
            return true;
        }
        next.rank() > self.rank()
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s).ok_or_else(|| {
            format!("unknown status '{s}' (expected detected, planned, migrating, migrated, failed)")
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s).ok_or_else(|| format!("unknown priority '{s}' (expected high, medium, low)"))
    }
}

/// A unit of vendor-SDK usage tracked through migration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: FeatureId,
    pub name: String,
    pub description: String,
    /// Raw call sites or snippets, in the order they were recorded.
    pub usage: Vec<String>,
    /// Target REST endpoints, filled when a template is attached.
    #[serde(default)]
    pub endpoints: Vec<String>,
    /// Names of features this one depends on.
    #[serde(default)]
    pub dependencies: Vec<String>,
    pub priority: Priority,
    pub status: FeatureStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_script: Option<String>,
    /// Percentage in `0.0..=100.0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_coverage: Option<f32>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migrated_at: Option<DateTime<Utc>>,
}

/// Registration input: a feature minus its id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeature {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub usage: Vec<String>,
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub priority: Priority,
    pub status: FeatureStatus,
    #[serde(default)]
    pub migration_script: Option<String>,
    #[serde(default)]
    pub test_coverage: Option<f32>,
}

impl NewFeature {
    /// A freshly detected feature: medium priority, nothing planned yet.
    pub fn detected(
        name: impl Into<String>,
        description: impl Into<String>,
        usage: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            usage,
            endpoints: Vec::new(),
            dependencies: Vec::new(),
            priority: Priority::Medium,
            status: FeatureStatus::Detected,
            migration_script: None,
            test_coverage: None,
        }
    }

    pub(crate) fn into_feature(self, id: FeatureId, created_at: DateTime<Utc>) -> Feature {
        Feature {
            id,
            name: self.name,
            description: self.description,
            usage: self.usage,
            endpoints: self.endpoints,
            dependencies: self.dependencies,
            priority: self.priority,
            status: self.status,
            migration_script: self.migration_script,
            test_coverage: self.test_coverage,
            created_at,
            migrated_at: None,
        }
    }
}

impl Feature {
    /// Stamp a new id and creation time onto registration input.
    pub fn from_new(data: NewFeature) -> Self {
        data.into_feature(FeatureId::generate(), Utc::now())
    }
}

/// Aggregate counts over a set of features.
///
/// `total == migrated + in_progress + failed + pending` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStats {
    pub total: usize,
    pub migrated: usize,
    pub in_progress: usize,
    pub failed: usize,
    pub pending: usize,
}

impl MigrationStats {
    pub fn tally<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Self {
        let mut stats = Self::default();
        for feature in features {
            stats.total += 1;
            match feature.status {
                FeatureStatus::Migrated => stats.migrated += 1,
                FeatureStatus::Migrating => stats.in_progress += 1,
                FeatureStatus::Failed => stats.failed += 1,
                FeatureStatus::Detected | FeatureStatus::Planned => stats.pending += 1,
            }
        }
        stats
    }
}
