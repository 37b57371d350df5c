//! Parallel source walker using the `ignore` crate's `WalkParallel`.
//!
//! Supports `.unvendorignore` (gitignore syntax, hierarchical) and the default
//! ignore directories below.

use std::path::{Path, PathBuf};

use crossbeam_channel as channel;
use unvendor_core::config::ScanConfig;
use unvendor_core::errors::ScanError;

/// Directories never worth scanning for application source.
pub const DEFAULT_IGNORES: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    ".next",
    ".nuxt",
    ".turbo",
    ".cache",
    ".unvendor",
    "vendor",
    "out",
];

/// Custom ignore file honored alongside `.gitignore`.
pub const IGNORE_FILENAME: &str = ".unvendorignore";

/// Walk `root` and return every file whose extension is in `extensions`.
///
/// Files are sorted by path so discovery order is deterministic.
pub fn walk_directory(
    root: &Path,
    config: &ScanConfig,
    extensions: &[String],
) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::Walk {
            root: root.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let (tx, rx) = channel::unbounded();

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false)
        .add_custom_ignore_filename(IGNORE_FILENAME)
        .follow_links(config.effective_follow_symlinks());

    let max_size = config.effective_max_file_size();
    let threads = config.effective_threads();
    if threads > 0 {
        builder.threads(threads);
    }

    // Positive overrides whitelist, negated overrides blacklist.
    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    for pattern in &config.include {
        if let Err(e) = overrides.add(pattern) {
            tracing::warn!(pattern = %pattern, error = %e, "ignoring invalid include pattern");
        }
    }
    for pattern in DEFAULT_IGNORES {
        let _ = overrides.add(&format!("!{pattern}/**"));
        let _ = overrides.add(&format!("!{pattern}"));
    }
    for pattern in &config.extra_ignore {
        if let Err(e) = overrides.add(&format!("!{pattern}")) {
            tracing::warn!(pattern = %pattern, error = %e, "ignoring invalid ignore pattern");
        }
    }
    match overrides.build() {
        Ok(built) => {
            builder.overrides(built);
        }
        Err(e) => tracing::warn!(error = %e, "override build failed, walking without overrides"),
    }

    builder.build_parallel().run(|| {
        let tx = tx.clone();
        Box::new(move |entry| {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    return ignore::WalkState::Continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return ignore::WalkState::Continue;
            }

            let path = entry.path();
            if !has_source_extension(path, extensions) {
                return ignore::WalkState::Continue;
            }
            if let Some(limit) = max_size {
                if let Ok(meta) = entry.metadata() {
                    if meta.len() > limit {
                        tracing::warn!(
                            path = %path.display(),
                            size = meta.len(),
                            limit,
                            "skipping oversized source file"
                        );
                        return ignore::WalkState::Continue;
                    }
                }
            }
            let _ = tx.send(path.to_path_buf());
            ignore::WalkState::Continue
        })
    });

    drop(tx);
    let mut files: Vec<PathBuf> = rx.into_iter().collect();
    files.sort();
    Ok(files)
}

fn has_source_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
}
