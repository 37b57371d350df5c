//! Detector tests: line matching, best-effort reads, discovery, suggestions, CI gate.

use std::fs;
use std::path::{Path, PathBuf};

use unvendor_analysis::detector::lister::{lister_for_config, FixedFileList, SourceLister, WalkingLister};
use unvendor_analysis::detector::patterns::PatternKind;
use unvendor_analysis::{FeatureRegistry, UsageDetector};
use unvendor_core::config::{DiscoveryMode, ScanConfig};
use unvendor_core::FeatureStatus;

// ---- Helpers ----

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn fixed_detector(files: &[&str]) -> UsageDetector {
    UsageDetector::new(Box::new(FixedFileList::new(files.iter().copied())))
}

const ENTITIES_JS: &str = r#"import { base44 } from '@base44/sdk';

export async function loadTasks() {
  const tasks = await base44Entities.Task.list();
  const created = await base44Entities.Task.create({ title: 'x' });
  return [tasks, created];
}

export const again = () => base44Entities.Task.list();
"#;

// ---- scan_file ----

#[test]
fn entity_method_reports_line_and_suggestion() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write(dir.path(), "a.js", "const x = 1;\n\nfoo(base44Entities.User.get(id));\n");

    let records = UsageDetector::default().scan_file(&path);
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.kind, PatternKind::EntityMethod);
    assert_eq!(r.line, 3);
    assert_eq!(r.suggestion, "Replace with REST API call");
    assert_eq!(r.matched_text, "base44Entities.User.get(");
    assert_eq!(r.captures, vec!["User", "get"]);
    assert_eq!(r.file, path);
}

#[test]
fn import_line_yields_import_and_dependency() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write(dir.path(), "client.js", "import { base44 } from '@base44/sdk';\n");

    let records = UsageDetector::default().scan_file(&path);
    let kinds: Vec<PatternKind> = records.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![PatternKind::ImportStatement, PatternKind::Dependency]);
    assert!(records.iter().all(|r| r.line == 1));
    assert_eq!(records[1].suggestion, "Remove @base44/sdk dependency");
}

#[test]
fn records_follow_file_order() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = write(dir.path(), "src/entities.js", ENTITIES_JS);

    let records = UsageDetector::default().scan_file(&path);
    let lines: Vec<u32> = records.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![1, 1, 4, 5, 9]);
}

#[test]
fn multiple_matches_on_one_line_are_all_reported() {
    let detector = UsageDetector::default();
    let records = detector.scan_source(
        Path::new("x.js"),
        "Promise.all([base44Entities.A.list(), base44Entities.B.list()])",
    );
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].captures[0], "A");
    assert_eq!(records[1].captures[0], "B");
}

#[test]
fn function_and_auth_calls() {
    let detector = UsageDetector::default();
    let records = detector.scan_source(
        Path::new("x.js"),
        "await base44Entities.functions.scoreAssessment(data);\nconst me = await base44Auth.me();",
    );
    let kinds: Vec<(u32, PatternKind)> = records.iter().map(|r| (r.line, r.kind)).collect();
    // A functions call also has the entity_method shape; kinds are not exclusive.
    assert_eq!(
        kinds,
        vec![
            (1, PatternKind::EntityMethod),
            (1, PatternKind::FunctionCall),
            (2, PatternKind::AuthMethod),
        ]
    );
    assert_eq!(records[1].suggestion, "Replace with REST API function call");
    assert_eq!(records[2].suggestion, "Replace with REST auth API");
}

#[test]
fn scan_file_on_missing_path_is_empty() {
    let records = UsageDetector::default().scan_file(Path::new("/definitely/not/here.js"));
    assert!(records.is_empty());
}

#[test]
fn invalid_utf8_does_not_hide_usage() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("latin1.js");
    let mut bytes = b"// caf".to_vec();
    bytes.push(0xe9);
    bytes.extend_from_slice(b"\nconst t = await base44Entities.Task.list();\n");
    fs::write(&path, bytes).unwrap();

    let records = UsageDetector::default().scan_file(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].line, 2);
    assert_eq!(records[0].kind, PatternKind::EntityMethod);

    let mut out = Vec::new();
    assert!(!UsageDetector::default().check_for_new_usage(dir.path(), &mut out).unwrap());
}

#[test]
fn crlf_lines_are_trimmed() {
    let records = UsageDetector::default()
        .scan_source(Path::new("x.js"), "a();\r\n  base44Entities.Task.delete(id);\r\n");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].line, 2);
    assert_eq!(records[0].line_text, "base44Entities.Task.delete(id);");
}

// ---- discovery ----

#[test]
fn fixed_list_joins_root_in_order() {
    let lister = FixedFileList::new(["b.js", "a.js"]);
    let files = lister.list_source_files(Path::new("/root")).unwrap();
    assert_eq!(files, vec![PathBuf::from("/root/b.js"), PathBuf::from("/root/a.js")]);
}

#[test]
fn walker_filters_extensions_and_ignores() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    write(root, "src/a.ts", "");
    write(root, "src/b.tsx", "");
    write(root, "src/c.jsx", "");
    write(root, "src/d.js", "");
    write(root, "src/readme.md", "");
    write(root, "package.json", "");
    write(root, "node_modules/pkg/index.js", "");
    write(root, "dist/bundle.js", "");
    write(root, "src/generated/skip.ts", "");
    write(root, ".unvendorignore", "src/generated/\n");

    let files = WalkingLister::default().list_source_files(root).unwrap();
    let rel: Vec<String> = files
        .iter()
        .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(rel, vec!["src/a.ts", "src/b.tsx", "src/c.jsx", "src/d.js"]);
}

fn large_bundle(root: &Path) -> PathBuf {
    let mut content = String::from("base44Entities.Task.list();\n");
    let filler = "// padding padding padding padding padding padding padding\n";
    while content.len() < 1_400_000 {
        content.push_str(filler);
    }
    write(root, "dist-src/bundle.js", &content)
}

#[test]
fn large_files_are_scanned_by_default() {
    let dir = tempfile::TempDir::new().unwrap();
    let bundle = large_bundle(dir.path());

    let files = WalkingLister::default().list_source_files(dir.path()).unwrap();
    assert_eq!(files, vec![bundle]);

    let mut out = Vec::new();
    assert!(!UsageDetector::default().check_for_new_usage(dir.path(), &mut out).unwrap());
}

#[test]
fn configured_size_limit_skips_larger_files() {
    let dir = tempfile::TempDir::new().unwrap();
    large_bundle(dir.path());
    let small = write(dir.path(), "src/small.js", "base44Auth.me();\n");

    let config = ScanConfig {
        max_file_size: Some(1_048_576),
        ..Default::default()
    };
    let files = WalkingLister::new(config).list_source_files(dir.path()).unwrap();
    assert_eq!(files, vec![small]);
}

#[test]
fn walker_on_missing_root_is_an_error() {
    let result = WalkingLister::default().list_source_files(Path::new("/no/such/root"));
    assert!(result.is_err());
}

#[test]
fn config_selects_lister() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = ScanConfig {
        discovery: Some(DiscoveryMode::Fixed),
        files: vec!["only.js".into()],
        ..Default::default()
    };
    let files = lister_for_config(&config).list_source_files(dir.path()).unwrap();
    assert_eq!(files, vec![dir.path().join("only.js")]);
}

// ---- scan_codebase ----

#[test]
fn scan_codebase_concatenates_in_discovery_order() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "second.js", "base44Auth.logout();\n");
    write(dir.path(), "first.js", "base44Entities.Task.get(1);\n");

    let detector = fixed_detector(&["first.js", "missing.js", "second.js"]);
    let records = detector.scan_codebase(dir.path());
    let kinds: Vec<PatternKind> = records.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![PatternKind::EntityMethod, PatternKind::AuthMethod]);
}

#[test]
fn scan_codebase_survives_discovery_failure() {
    let records = UsageDetector::default().scan_codebase(Path::new("/no/such/root"));
    assert!(records.is_empty());
}

// ---- check_for_new_usage ----

#[test]
fn check_is_true_iff_scan_is_empty() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "src/clean.ts", "export const ok = true;\n");
    let detector = UsageDetector::default();

    let mut out = Vec::new();
    assert!(detector.scan_codebase(dir.path()).is_empty());
    assert!(detector.check_for_new_usage(dir.path(), &mut out).unwrap());
    assert!(out.is_empty());

    write(dir.path(), "src/dirty.ts", "base44Entities.Task.update(id, d);\n");
    let mut out = Vec::new();
    assert!(!detector.scan_codebase(dir.path()).is_empty());
    assert!(!detector.check_for_new_usage(dir.path(), &mut out).unwrap());
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("src/dirty.ts:1"), "{text}");
    assert!(text.contains("Replace with REST API call"));
}

// ---- generate_migration_suggestions ----

#[test]
fn suggestions_register_deduplicated_features() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "src/entities.js", ENTITIES_JS);
    write(
        dir.path(),
        "src/functions.js",
        "export const run = () => base44Entities.functions.scoreAssessment({});\n",
    );

    let detector = UsageDetector::default();
    let mut registry = FeatureRegistry::new();
    let mut out = Vec::new();
    let summary = detector
        .generate_migration_suggestions(dir.path(), &mut registry, &mut out)
        .unwrap();

    let names: Vec<&str> = summary.registered.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["Task.list", "Task.create", "functions.scoreAssessment", "function.scoreAssessment"]
    );
    assert_eq!(summary.usage_count, 7);
    assert_eq!(registry.len(), 4);

    let first = registry.feature(&summary.registered[0].1).unwrap();
    assert_eq!(first.usage, vec!["const tasks = await base44Entities.Task.list();"]);
    assert_eq!(first.status, FeatureStatus::Detected);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("src/entities.js"));
    assert!(text.contains("Suggestion: Remove import and use REST client instead"));
    for (_, id) in &summary.registered {
        assert!(text.contains(id.as_str()));
    }
}

#[test]
fn repeated_scan_notes_earlier_registrations() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "src/entities.js", "base44Entities.Task.list();\n");

    let detector = UsageDetector::default();
    let mut registry = FeatureRegistry::new();
    let mut out = Vec::new();
    detector
        .generate_migration_suggestions(dir.path(), &mut registry, &mut out)
        .unwrap();
    assert!(!String::from_utf8(out).unwrap().contains("already registered"));

    let mut out = Vec::new();
    let summary = detector
        .generate_migration_suggestions(dir.path(), &mut registry, &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("(already registered 1 time(s))"), "{text}");
    assert_eq!(summary.registered.len(), 1);
    assert_eq!(registry.len(), 2);
}

#[test]
fn clean_scan_registers_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "src/ok.js", "console.log('fine');\n");

    let mut registry = FeatureRegistry::new();
    let mut out = Vec::new();
    let summary = UsageDetector::default()
        .generate_migration_suggestions(dir.path(), &mut registry, &mut out)
        .unwrap();

    assert_eq!(summary.usage_count, 0);
    assert!(summary.registered.is_empty());
    assert!(registry.is_empty());
    assert!(String::from_utf8(out).unwrap().contains("Codebase is clean"));
}

#[test]
fn import_only_usage_reports_without_registering() {
    let dir = tempfile::TempDir::new().unwrap();
    write(dir.path(), "src/client.js", "import { base44 } from '@base44/sdk';\n");

    let mut registry = FeatureRegistry::new();
    let mut out = Vec::new();
    let summary = UsageDetector::default()
        .generate_migration_suggestions(dir.path(), &mut registry, &mut out)
        .unwrap();

    assert_eq!(summary.usage_count, 2);
    assert!(registry.is_empty());
}
