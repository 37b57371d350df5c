//! UsageDetector: scans files line by line against the pattern table.
//!
//! Scanning is best effort. A file that cannot be read is logged and yields no
//! records; it never aborts a codebase scan. Files are read one at a time.

use std::io::{self, Write};
use std::path::Path;

use unvendor_core::config::ScanConfig;
use unvendor_core::errors::ScanError;
use unvendor_core::{FeatureId, UnvendorErrorCode};

use crate::registry::feature_registry::FeatureRegistry;

use super::extraction::extract_features;
use super::lister::{lister_for_config, SourceLister, WalkingLister};
use super::patterns::PatternTable;
use super::report;
use super::types::UsageRecord;

/// Outcome of [`UsageDetector::generate_migration_suggestions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionSummary {
    pub usage_count: usize,
    /// `(feature name, assigned id)` in registration order.
    pub registered: Vec<(String, FeatureId)>,
}

pub struct UsageDetector {
    patterns: PatternTable,
    lister: Box<dyn SourceLister>,
}

impl UsageDetector {
    /// Detector with the default pattern table and the given file lister.
    pub fn new(lister: Box<dyn SourceLister>) -> Self {
        Self::with_patterns(PatternTable::default(), lister)
    }

    pub fn with_patterns(patterns: PatternTable, lister: Box<dyn SourceLister>) -> Self {
        Self { patterns, lister }
    }

    /// Detector whose discovery strategy comes from configuration.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(lister_for_config(config))
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Scan one file. Read failures are logged and produce an empty result.
    ///
    /// Invalid UTF-8 is decoded lossily, so a stray byte in a comment does not
    /// hide the rest of the file.
    pub fn scan_file(&self, path: &Path) -> Vec<UsageRecord> {
        match std::fs::read(path) {
            Ok(bytes) => self.scan_source(path, &String::from_utf8_lossy(&bytes)),
            Err(source) => {
                let err = ScanError::Io {
                    path: path.to_path_buf(),
                    source,
                };
                tracing::warn!(code = err.error_code(), error = %err, "skipping unreadable file");
                Vec::new()
            }
        }
    }

    /// Scan in-memory source text attributed to `path`.
    pub fn scan_source(&self, path: &Path, source: &str) -> Vec<UsageRecord> {
        let mut records = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            let line_no = (idx + 1) as u32;
            for pattern in self.patterns.patterns() {
                for caps in pattern.regex.captures_iter(line) {
                    let matched = caps.get(0).map_or("", |m| m.as_str());
                    records.push(UsageRecord {
                        file: path.to_path_buf(),
                        line: line_no,
                        line_text: line.trim().to_string(),
                        matched_text: matched.to_string(),
                        kind: pattern.kind,
                        suggestion: pattern.suggestion.clone(),
                        captures: caps
                            .iter()
                            .skip(1)
                            .flatten()
                            .map(|m| m.as_str().to_string())
                            .collect(),
                    });
                }
            }
        }
        records
    }

    /// Scan every discovered file under `base`, in discovery order.
    pub fn scan_codebase(&self, base: &Path) -> Vec<UsageRecord> {
        let files = match self.lister.list_source_files(base) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(code = e.error_code(), error = %e, "file discovery failed");
                return Vec::new();
            }
        };

        let records: Vec<UsageRecord> = files.iter().flat_map(|f| self.scan_file(f)).collect();
        tracing::info!(
            root = %base.display(),
            files = files.len(),
            usages = records.len(),
            "codebase scan complete"
        );
        records
    }

    /// Scan, print a grouped report, and register one feature per distinct
    /// entity method or function call. Nothing is registered on a clean scan.
    ///
    /// Features already in the registry are registered again; the report notes
    /// how many earlier features share the name.
    pub fn generate_migration_suggestions(
        &self,
        base: &Path,
        registry: &mut FeatureRegistry,
        out: &mut dyn Write,
    ) -> io::Result<SuggestionSummary> {
        writeln!(out, "Scanning {} for Base44 SDK usage...", base.display())?;
        let records = self.scan_codebase(base);

        if records.is_empty() {
            writeln!(out, "No Base44 SDK usage found. Codebase is clean.")?;
            return Ok(SuggestionSummary::default());
        }

        writeln!(out, "Found {} Base44 SDK usage(s):", records.len())?;
        writeln!(out)?;
        report::write_grouped_report(out, base, &records)?;

        let candidates = extract_features(&records);
        let mut summary = SuggestionSummary {
            usage_count: records.len(),
            registered: Vec::with_capacity(candidates.len()),
        };
        if candidates.is_empty() {
            return Ok(summary);
        }

        writeln!(out)?;
        writeln!(out, "Registering {} feature(s) for migration:", candidates.len())?;
        for candidate in candidates {
            let name = candidate.name.clone();
            let earlier = registry.features().iter().filter(|f| f.name == name).count();
            let id = registry.register_feature(candidate);
            if earlier > 0 {
                writeln!(out, "  {name} -> {id} (already registered {earlier} time(s))")?;
            } else {
                writeln!(out, "  {name} -> {id}")?;
            }
            summary.registered.push((name, id));
        }
        Ok(summary)
    }

    /// CI gate: `true` when no usage remains. Otherwise prints every offending
    /// location with its suggestion and returns `false`.
    pub fn check_for_new_usage(&self, base: &Path, out: &mut dyn Write) -> io::Result<bool> {
        let records = self.scan_codebase(base);
        if records.is_empty() {
            return Ok(true);
        }
        writeln!(
            out,
            "Found {} Base44 SDK usage(s) that must be migrated:",
            records.len()
        )?;
        report::write_violations(out, base, &records)?;
        Ok(false)
    }
}

impl Default for UsageDetector {
    fn default() -> Self {
        Self::new(Box::new(WalkingLister::default()))
    }
}
