//! Configuration file loading with precedence handling.

use super::StatePolicy;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PANELKIT_CONFIG";

/// Environment variable overriding the log buffer capacity.
pub const LOG_CAPACITY_ENV_VAR: &str = "PANELKIT_LOG_CAPACITY";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/panelkit/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Capacity of each log buffer.
    #[serde(default)]
    pub log_buffer_capacity: Option<usize>,

    /// Page size of feeds without their own `max_item_count`.
    #[serde(default)]
    pub default_max_item_count: Option<usize>,

    /// `retain` or `purge_on_remove`.
    #[serde(default)]
    pub state_policy: Option<StatePolicy>,

    /// Draw buttons as list rows.
    #[serde(default)]
    pub use_list_items_for_buttons: Option<bool>,

    /// JSON file for persisted module values.
    #[serde(default)]
    pub persistence_path: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Capacity of each log buffer.
    pub log_buffer_capacity: usize,
    /// Page size of feeds without their own `max_item_count`.
    pub default_max_item_count: usize,
    /// Retention of state for removed modules.
    pub state_policy: StatePolicy,
    /// Draw buttons as list rows.
    pub use_list_items_for_buttons: bool,
    /// JSON file for persisted module values. In-memory storage when `None`.
    pub persistence_path: Option<PathBuf>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_buffer_capacity: crate::state::DEFAULT_CAPACITY,
            default_max_item_count: super::DEFAULT_MAX_ITEM_COUNT,
            state_policy: StatePolicy::Retain,
            use_list_items_for_buttons: false,
            persistence_path: None,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/panelkit/panelkit.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("panelkit").join("panelkit.log")
    } else {
        PathBuf::from("panelkit.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/panelkit/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("panelkit").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `PANELKIT_CONFIG` environment variable
/// 3. Default path `~/.config/panelkit/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PANELKIT_LOG_CAPACITY`: Override log buffer capacity. Values that do
///   not parse as an unsigned integer are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(LOG_CAPACITY_ENV_VAR) {
        match raw.trim().parse() {
            Ok(capacity) => config.log_buffer_capacity = capacity,
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "Ignoring invalid {LOG_CAPACITY_ENV_VAR}")
            }
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        log_buffer_capacity: config
            .log_buffer_capacity
            .unwrap_or(defaults.log_buffer_capacity),
        default_max_item_count: config
            .default_max_item_count
            .unwrap_or(defaults.default_max_item_count),
        state_policy: config.state_policy.unwrap_or(defaults.state_policy),
        use_list_items_for_buttons: config
            .use_list_items_for_buttons
            .unwrap_or(defaults.use_list_items_for_buttons),
        persistence_path: config.persistence_path.or(defaults.persistence_path),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    log_capacity_override: Option<usize>,
    list_buttons_override: Option<bool>,
    persistence_override: Option<PathBuf>,
) -> ResolvedConfig {
    if let Some(capacity) = log_capacity_override {
        config.log_buffer_capacity = capacity;
    }

    if let Some(use_list_items) = list_buttons_override {
        config.use_list_items_for_buttons = use_list_items;
    }

    if let Some(path) = persistence_override {
        config.persistence_path = Some(path);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
