//! Registry snapshot configuration (used by the CLI only).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_STATE_PATH: &str = ".unvendor/features.json";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Snapshot file, relative to the project root unless absolute.
    pub state_path: Option<String>,
    /// Persist the registry between CLI invocations. Default: true.
    pub persist: Option<bool>,
}

impl RegistryConfig {
    pub fn effective_persist(&self) -> bool {
        self.persist.unwrap_or(true)
    }

    /// Resolve the snapshot path against `root`.
    pub fn resolve_state_path(&self, root: &Path) -> PathBuf {
        let raw = Path::new(self.state_path.as_deref().unwrap_or(DEFAULT_STATE_PATH));
        if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            root.join(raw)
        }
    }

    pub fn merge(&mut self, other: RegistryConfig) {
        if other.state_path.is_some() {
            self.state_path = other.state_path;
        }
        if other.persist.is_some() {
            self.persist = other.persist;
        }
    }
}
