//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// Removes an environment variable for the duration of a test.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("panelkit_test_{name}_{}.toml", std::process::id()));
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_contains_panelkit_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("panelkit") && path_str.ends_with("config.toml"),
        "Path should contain 'panelkit' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_panelkit_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("panelkit.log"),
        "Default log path should end with 'panelkit.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = temp_config(
        "valid",
        r#"
log_buffer_capacity = 200
default_max_item_count = 5
state_policy = "purge_on_remove"
use_list_items_for_buttons = true
persistence_path = "/tmp/values.json"
"#,
    );

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.log_buffer_capacity, Some(200));
    assert_eq!(config.default_max_item_count, Some(5));
    assert_eq!(config.state_policy, Some(StatePolicy::PurgeOnRemove));
    assert_eq!(config.use_list_items_for_buttons, Some(true));
    assert_eq!(
        config.persistence_path,
        Some(PathBuf::from("/tmp/values.json"))
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = temp_config("invalid", "this is not valid TOML ][}{");

    let result = load_config_file(&config_path);

    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let config_path = temp_config("unknown", "theme = \"dark\"\n");

    let result = load_config_file(&config_path);

    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Unknown keys should be rejected, got {:?}",
        result
    );

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_rejects_unknown_state_policy() {
    let config_path = temp_config("policy", "state_policy = \"forget\"\n");

    let result = load_config_file(&config_path);

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    fs::remove_file(config_path).ok();
}

#[test]
fn merge_config_without_file_uses_defaults() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_applies_partial_file() {
    let file = ConfigFile {
        default_max_item_count: Some(3),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));

    assert_eq!(resolved.default_max_item_count, 3);
    assert_eq!(
        resolved.log_buffer_capacity,
        ResolvedConfig::default().log_buffer_capacity,
        "Fields missing from the file should keep their defaults"
    );
}

#[test]
#[serial(panelkit_log_capacity)]
fn apply_env_overrides_respects_log_capacity() {
    let _guard = EnvGuard::new(LOG_CAPACITY_ENV_VAR);
    env::set_var(LOG_CAPACITY_ENV_VAR, "64");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(
        result.log_buffer_capacity, 64,
        "PANELKIT_LOG_CAPACITY should override capacity"
    );
}

#[test]
#[serial(panelkit_log_capacity)]
fn apply_env_overrides_ignores_invalid_capacity() {
    let _guard = EnvGuard::new(LOG_CAPACITY_ENV_VAR);
    env::set_var(LOG_CAPACITY_ENV_VAR, "lots");

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone());

    assert_eq!(result, base);
}

#[test]
#[serial(panelkit_log_capacity)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _guard = EnvGuard::new(LOG_CAPACITY_ENV_VAR);

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone());

    assert_eq!(
        result, base,
        "Config should be unchanged when PANELKIT_LOG_CAPACITY not set"
    );
}

#[test]
#[serial(panelkit_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let explicit = temp_config("explicit", "log_buffer_capacity = 1\n");
    let from_env = temp_config("env", "log_buffer_capacity = 2\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .expect("Should load")
        .expect("Should find explicit file");

    assert_eq!(config.log_buffer_capacity, Some(1));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(panelkit_config)]
fn load_config_with_precedence_uses_env_var() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    let from_env = temp_config("env_only", "log_buffer_capacity = 2\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = load_config_with_precedence(None)
        .expect("Should load")
        .expect("Should find env file");

    assert_eq!(config.log_buffer_capacity, Some(2));

    fs::remove_file(from_env).ok();
}

#[test]
#[serial(panelkit_config)]
fn load_config_with_precedence_missing_env_file_is_not_an_error() {
    let _guard = EnvGuard::new(CONFIG_ENV_VAR);
    env::set_var(CONFIG_ENV_VAR, "/nonexistent/panelkit.toml");

    let result = load_config_with_precedence(None);

    assert_eq!(result, Ok(None));
}

#[test]
fn apply_cli_overrides_only_touches_given_flags() {
    let base = ResolvedConfig::default();

    let result = apply_cli_overrides(base.clone(), Some(7), None, None);

    assert_eq!(result.log_buffer_capacity, 7);
    assert_eq!(
        result.use_list_items_for_buttons,
        base.use_list_items_for_buttons
    );
    assert_eq!(result.persistence_path, None);
}

#[test]
fn apply_cli_overrides_sets_persistence_path() {
    let result = apply_cli_overrides(
        ResolvedConfig::default(),
        None,
        Some(true),
        Some(PathBuf::from("/tmp/p.json")),
    );

    assert!(result.use_list_items_for_buttons);
    assert_eq!(result.persistence_path, Some(PathBuf::from("/tmp/p.json")));
}
