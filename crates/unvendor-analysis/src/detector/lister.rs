//! Source file discovery.
//!
//! `SourceLister` is the seam between the detector and the filesystem: the
//! default walks the tree, `FixedFileList` scans an explicit list of paths.

use std::path::{Path, PathBuf};

use unvendor_core::config::{DiscoveryMode, ScanConfig};
use unvendor_core::errors::ScanError;

use super::walker;

/// Lists the source files under a root, in scan order.
pub trait SourceLister {
    fn list_source_files(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError>;
}

/// An explicit list of paths, joined onto the root. Existence is not checked;
/// missing files surface as logged read failures during the scan.
#[derive(Debug, Clone, Default)]
pub struct FixedFileList {
    files: Vec<PathBuf>,
}

impl FixedFileList {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl SourceLister for FixedFileList {
    fn list_source_files(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        Ok(self.files.iter().map(|f| root.join(f)).collect())
    }
}

/// Walks the directory tree, keeping files with configured source extensions.
#[derive(Debug, Clone)]
pub struct WalkingLister {
    config: ScanConfig,
    extensions: Vec<String>,
}

impl WalkingLister {
    pub fn new(config: ScanConfig) -> Self {
        let extensions = config.effective_extensions();
        Self { config, extensions }
    }
}

impl Default for WalkingLister {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

impl SourceLister for WalkingLister {
    fn list_source_files(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        walker::walk_directory(root, &self.config, &self.extensions)
    }
}

/// Build the lister selected by `config.discovery`.
pub fn lister_for_config(config: &ScanConfig) -> Box<dyn SourceLister> {
    match config.effective_discovery() {
        DiscoveryMode::Walk => Box::new(WalkingLister::new(config.clone())),
        DiscoveryMode::Fixed => Box::new(FixedFileList::new(config.effective_files())),
    }
}
