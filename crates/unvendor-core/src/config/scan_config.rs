//! Scanner configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source extensions scanned when walking the tree.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// The fixed file list used by `discovery = "fixed"` when `files` is empty.
pub const DEFAULT_FIXED_FILES: &[&str] = &[
    "src/api/base44Client.js",
    "src/api/entities.js",
    "src/api/functions.js",
    "src/api/integrations.js",
    "src/pages/Dashboard.jsx",
    "src/pages/Layout.jsx",
    "src/components/auth/AuthGuard.jsx",
];

/// How the detector finds the files to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    /// Walk the tree, honoring ignore files, filtered by extension.
    #[default]
    Walk,
    /// Scan an explicit list of paths relative to the root.
    Fixed,
}

impl DiscoveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for DiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscoveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "walk" => Ok(Self::Walk),
            "fixed" => Ok(Self::Fixed),
            other => Err(format!("unknown discovery mode '{other}'")),
        }
    }
}

/// Configuration for file discovery.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Discovery strategy. Default: walk.
    pub discovery: Option<DiscoveryMode>,
    /// Paths for fixed discovery, relative to the scan root.
    pub files: Vec<String>,
    /// Extensions (without the dot) accepted by the walker.
    pub extensions: Vec<String>,
    /// Include globs, gitignore syntax. If non-empty, only matching paths are scanned.
    pub include: Vec<String>,
    /// Additional ignore patterns beyond .gitignore/.unvendorignore.
    pub extra_ignore: Vec<String>,
    /// Follow symbolic links. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Maximum file size in bytes. Default: no limit. Larger files are skipped with a warning.
    pub max_file_size: Option<u64>,
    /// Walker threads. 0 = auto-detect.
    pub threads: Option<usize>,
}

impl ScanConfig {
    pub fn effective_discovery(&self) -> DiscoveryMode {
        self.discovery.unwrap_or_default()
    }

    pub fn effective_files(&self) -> Vec<String> {
        if self.files.is_empty() {
            DEFAULT_FIXED_FILES.iter().map(|s| s.to_string()).collect()
        } else {
            self.files.clone()
        }
    }

    /// Configured extensions, normalized to lowercase without a leading dot.
    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
        } else {
            self.extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        }
    }

    pub fn effective_max_file_size(&self) -> Option<u64> {
        self.max_file_size
    }

    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    /// Overlay values set in `other` onto `self`.
    pub fn merge(&mut self, other: ScanConfig) {
        if other.discovery.is_some() {
            self.discovery = other.discovery;
        }
        if !other.files.is_empty() {
            self.files = other.files;
        }
        if !other.extensions.is_empty() {
            self.extensions = other.extensions;
        }
        if !other.include.is_empty() {
            self.include = other.include;
        }
        if !other.extra_ignore.is_empty() {
            self.extra_ignore = other.extra_ignore;
        }
        if other.follow_symlinks.is_some() {
            self.follow_symlinks = other.follow_symlinks;
        }
        if other.max_file_size.is_some() {
            self.max_file_size = other.max_file_size;
        }
        if other.threads.is_some() {
            self.threads = other.threads;
        }
    }
}
