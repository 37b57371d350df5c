//! Per-invocation state: configuration, detector, and the registry snapshot.

use std::path::{Path, PathBuf};

use anyhow::Context;
use unvendor_analysis::registry::snapshot::{load_snapshot, save_snapshot};
use unvendor_analysis::{FeatureRegistry, UsageDetector};
use unvendor_core::UnvendorConfig;

pub struct Session {
    pub root: PathBuf,
    pub detector: UsageDetector,
    pub registry: FeatureRegistry,
    /// `None` when persistence is off.
    state_path: Option<PathBuf>,
}

impl Session {
    /// Load configuration for `root` and restore the registry snapshot if persistence is on.
    pub fn open(
        root: &Path,
        user_config: Option<&Path>,
        state_override: Option<PathBuf>,
        persist: bool,
    ) -> anyhow::Result<Self> {
        let config = UnvendorConfig::load(root, user_config)
            .with_context(|| format!("failed to load configuration for {}", root.display()))?;

        let state_path = (persist && config.registry.effective_persist())
            .then(|| state_override.unwrap_or_else(|| config.registry.resolve_state_path(root)));

        let mut session = Self::in_memory(root, &config);
        if let Some(path) = &state_path {
            let features = load_snapshot(path)
                .with_context(|| format!("failed to load registry state from {}", path.display()))?;
            tracing::debug!(path = %path.display(), features = features.len(), "registry restored");
            session.registry.restore(features);
        }
        session.state_path = state_path;
        Ok(session)
    }

    /// A session that never touches the snapshot file.
    pub fn in_memory(root: &Path, config: &UnvendorConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            detector: UsageDetector::from_config(&config.scan),
            registry: FeatureRegistry::new(),
            state_path: None,
        }
    }

    pub fn state_path(&self) -> Option<&Path> {
        self.state_path.as_deref()
    }

    /// Write the registry back to the snapshot, if persistence is on.
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = &self.state_path else {
            return Ok(());
        };
        save_snapshot(path, self.registry.features())
            .with_context(|| format!("failed to save registry state to {}", path.display()))?;
        tracing::debug!(path = %path.display(), features = self.registry.len(), "registry saved");
        Ok(())
    }
}
