//! Per-module UI state.
//!
//! Expansion, toggle values, selections and feed display limits live here,
//! keyed by module id. Absent fields mean "use the module's initial value".

use crate::model::ModuleId;
use std::collections::HashMap;

/// Mutable UI state of one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Section expansion.
    pub is_expanded: Option<bool>,
    /// Last written toggle value.
    pub toggle_value: Option<bool>,
    /// Selected row of a single-selection list.
    pub selected_id: Option<String>,
    /// Rows shown by a feed after show-more.
    pub display_limit: Option<usize>,
}

/// Id-keyed UI state storage with read-with-default semantics.
#[derive(Debug, Clone, Default)]
pub struct UiStateStore {
    states: HashMap<ModuleId, UiState>,
}

impl UiStateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw state of a module, if any was written.
    pub fn get(&self, id: &ModuleId) -> Option<&UiState> {
        self.states.get(id)
    }

    /// Expansion of `id`, or `default` when never toggled.
    pub fn is_expanded(&self, id: &ModuleId, default: bool) -> bool {
        self.get(id)
            .and_then(|state| state.is_expanded)
            .unwrap_or(default)
    }

    /// Flip the expansion of `id` and return the new value.
    pub fn toggle_expanded(&mut self, id: &ModuleId, default: bool) -> bool {
        let expanded = !self.is_expanded(id, default);
        self.entry(id).is_expanded = Some(expanded);
        expanded
    }

    /// Force the expansion of `id`.
    pub fn set_expanded(&mut self, id: &ModuleId, expanded: bool) {
        self.entry(id).is_expanded = Some(expanded);
    }

    /// Last written toggle value of `id`.
    pub fn toggle_value(&self, id: &ModuleId) -> Option<bool> {
        self.get(id).and_then(|state| state.toggle_value)
    }

    /// Write a toggle value and return the previously written one.
    pub fn set_toggle_value(&mut self, id: &ModuleId, value: bool) -> Option<bool> {
        self.entry(id).toggle_value.replace(value)
    }

    /// Selected row of `id`.
    pub fn selected_id(&self, id: &ModuleId) -> Option<&str> {
        self.get(id).and_then(|state| state.selected_id.as_deref())
    }

    /// Store the selected row of `id`.
    pub fn set_selected_id(&mut self, id: &ModuleId, item_id: impl Into<String>) {
        self.entry(id).selected_id = Some(item_id.into());
    }

    /// Display limit of a feed, if raised by show-more.
    pub fn display_limit(&self, id: &ModuleId) -> Option<usize> {
        self.get(id).and_then(|state| state.display_limit)
    }

    /// Store the display limit of a feed.
    pub fn set_display_limit(&mut self, id: &ModuleId, limit: usize) {
        self.entry(id).display_limit = Some(limit);
    }

    /// Drop all state of `id`.
    pub fn remove(&mut self, id: &ModuleId) -> Option<UiState> {
        self.states.remove(id)
    }

    /// Number of modules with stored state.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no state was written.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn entry(&mut self, id: &ModuleId) -> &mut UiState {
        self.states.entry(id.clone()).or_default()
    }
}
