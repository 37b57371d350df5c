//! JSON snapshots of the registry, used to carry features across CLI runs.

use std::path::Path;

use serde::{Deserialize, Serialize};
use unvendor_core::errors::RegistryError;
use unvendor_core::Feature;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub version: u32,
    pub features: Vec<Feature>,
}

/// Load features from `path`. A missing file is an empty registry.
pub fn load_snapshot(path: &Path) -> Result<Vec<Feature>, RegistryError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(RegistryError::StateIo {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let snapshot: RegistrySnapshot =
        serde_json::from_str(&content).map_err(|e| RegistryError::StateCorrupt {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(RegistryError::StateCorrupt {
            path: path.to_path_buf(),
            message: format!("unsupported snapshot version {}", snapshot.version),
        });
    }
    Ok(snapshot.features)
}

/// Write `features` to `path`, creating parent directories. The file is
/// replaced atomically via a sibling temp file.
pub fn save_snapshot(path: &Path, features: &[Feature]) -> Result<(), RegistryError> {
    let io_err = |source: std::io::Error| RegistryError::StateIo {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let snapshot = RegistrySnapshot {
        version: SNAPSHOT_VERSION,
        features: features.to_vec(),
    };
    let json = serde_json::to_string_pretty(&snapshot).map_err(|e| RegistryError::StateCorrupt {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
