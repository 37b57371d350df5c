//! Configuration tests: defaults, TOML round-trip, layered loading, env overrides.

use std::path::Path;
use std::sync::Mutex;

use unvendor_core::config::scan_config::{DEFAULT_EXTENSIONS, DEFAULT_FIXED_FILES};
use unvendor_core::config::unvendor_config::{ENV_SCAN_DISCOVERY, ENV_STATE_PATH};
use unvendor_core::config::{DiscoveryMode, ScanConfig};
use unvendor_core::errors::ConfigError;
use unvendor_core::{UnvendorConfig, UnvendorErrorCode};

/// Serializes tests that touch process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_env_vars() {
    for key in [ENV_SCAN_DISCOVERY, ENV_STATE_PATH] {
        std::env::remove_var(key);
    }
}

#[test]
fn default_scan_config_values() {
    let config = ScanConfig::default();

    assert!(config.discovery.is_none());
    assert_eq!(config.effective_discovery(), DiscoveryMode::Walk);
    assert_eq!(config.effective_extensions(), DEFAULT_EXTENSIONS);
    assert_eq!(config.effective_files(), DEFAULT_FIXED_FILES);
    assert_eq!(config.effective_max_file_size(), None);
    assert_eq!(config.effective_threads(), 0);
    assert!(!config.effective_follow_symlinks());
}

#[test]
fn extensions_are_normalized() {
    let config = ScanConfig {
        extensions: vec![".TS".into(), "vue".into()],
        ..Default::default()
    };
    assert_eq!(config.effective_extensions(), vec!["ts", "vue"]);
}

#[test]
fn toml_round_trip() {
    let input = r#"
[scan]
discovery = "fixed"
files = ["src/a.js", "src/b.tsx"]
extensions = ["ts"]
extra_ignore = ["*.generated.ts"]
follow_symlinks = true
max_file_size = 2_097_152

[registry]
state_path = "state/features.json"
persist = false
"#;
    let config = UnvendorConfig::from_toml(input).unwrap();
    assert_eq!(config.scan.discovery, Some(DiscoveryMode::Fixed));
    assert_eq!(config.scan.files, vec!["src/a.js", "src/b.tsx"]);
    assert_eq!(config.scan.max_file_size, Some(2_097_152));
    assert_eq!(config.registry.persist, Some(false));

    let serialized = config.to_toml().unwrap();
    let reparsed = UnvendorConfig::from_toml(&serialized).unwrap();
    assert_eq!(config, reparsed);
}

#[test]
fn invalid_toml_reports_parse_code() {
    let err = UnvendorConfig::from_toml("[scan]\ndiscovery = 42").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert_eq!(err.error_code(), "CONFIG_PARSE_ERROR");
}

#[test]
fn load_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let config = UnvendorConfig::load(dir.path(), None).unwrap();
    assert_eq!(config, UnvendorConfig::default());

    let nonexistent = Path::new("/nonexistent/path/that/does/not/exist");
    let config = UnvendorConfig::load(nonexistent, None).unwrap_or_default();
    assert_eq!(config.scan.effective_discovery(), DiscoveryMode::Walk);
}

#[test]
fn project_file_overrides_user_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let user = dir.path().join("user.toml");
    std::fs::write(
        &user,
        "[scan]\ndiscovery = \"fixed\"\nthreads = 4\n[registry]\npersist = false\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("unvendor.toml"),
        "[scan]\ndiscovery = \"walk\"\n",
    )
    .unwrap();

    let config = UnvendorConfig::load(dir.path(), Some(&user)).unwrap();
    assert_eq!(config.scan.discovery, Some(DiscoveryMode::Walk));
    // Values only the user file sets survive the project layer.
    assert_eq!(config.scan.threads, Some(4));
    assert!(!config.registry.effective_persist());
}

#[test]
fn missing_user_file_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let err = UnvendorConfig::load(dir.path(), Some(&dir.path().join("missing.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn env_overrides_win() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("unvendor.toml"), "[scan]\ndiscovery = \"walk\"\n").unwrap();

    std::env::set_var(ENV_SCAN_DISCOVERY, "fixed");
    std::env::set_var(ENV_STATE_PATH, "/tmp/unvendor-state.json");
    let config = UnvendorConfig::load(dir.path(), None).unwrap();
    clear_env_vars();

    assert_eq!(config.scan.effective_discovery(), DiscoveryMode::Fixed);
    assert_eq!(
        config.registry.resolve_state_path(dir.path()),
        Path::new("/tmp/unvendor-state.json")
    );
}

#[test]
fn bad_env_discovery_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    std::env::set_var(ENV_SCAN_DISCOVERY, "crawl");
    let dir = tempfile::TempDir::new().unwrap();
    let result = UnvendorConfig::load(dir.path(), None);
    clear_env_vars();

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn state_path_resolves_relative_to_root() {
    let config = UnvendorConfig::default();
    assert_eq!(
        config.registry.resolve_state_path(Path::new("/project")),
        Path::new("/project/.unvendor/features.json")
    );
}
