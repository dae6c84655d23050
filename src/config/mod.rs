//! Configuration module.

pub mod loader;

pub use loader::{ConfigError, ConfigFile, ResolvedConfig};

use serde::Deserialize;

/// Page size of feeds that do not set their own `max_item_count`.
pub const DEFAULT_MAX_ITEM_COUNT: usize = 10;

/// What happens to UI and pending state when a module is removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatePolicy {
    /// Keep the state, so a module re-added under the same id restores it.
    #[default]
    Retain,
    /// Drop the state together with the module.
    PurgeOnRemove,
}

/// Engine-level configuration.
///
/// The subset of [`ResolvedConfig`] the engine itself reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Capacity of each log buffer.
    pub log_buffer_capacity: usize,
    /// Page size of feeds that do not set `max_item_count`.
    pub default_max_item_count: usize,
    /// Retention of state for removed modules.
    pub state_policy: StatePolicy,
    /// Draw buttons as list rows instead of buttons.
    pub use_list_items_for_buttons: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_buffer_capacity: crate::state::DEFAULT_CAPACITY,
            default_max_item_count: DEFAULT_MAX_ITEM_COUNT,
            state_policy: StatePolicy::Retain,
            use_list_items_for_buttons: false,
        }
    }
}

impl From<&ResolvedConfig> for EngineConfig {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            log_buffer_capacity: config.log_buffer_capacity,
            default_max_item_count: config.default_max_item_count,
            state_policy: config.state_policy,
            use_list_items_for_buttons: config.use_list_items_for_buttons,
        }
    }
}
