//! Values held by value-wrapper modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The value wrapped by a value-wrapper module.
///
/// Serialized untagged so persisted values read naturally: `true`, `3`,
/// `"text"` or `["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleValue {
    /// A switch or checkbox state.
    Bool(bool),
    /// A numeric value, such as a slider position.
    Integer(i64),
    /// Free-form text input.
    Text(String),
    /// The ids of the selected items of a multiple-selection list.
    Selection(BTreeSet<String>),
}

impl ModuleValue {
    /// An empty selection.
    pub fn empty_selection() -> Self {
        Self::Selection(BTreeSet::new())
    }

    /// Build a selection from item ids.
    pub fn selection<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Selection(ids.into_iter().map(Into::into).collect())
    }

    /// The boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The selected ids, if this is a `Selection`.
    pub fn as_selection(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Selection(ids) => Some(ids),
            _ => None,
        }
    }

    /// Whether `item_id` is part of the selection. Non-selection values
    /// select nothing.
    pub fn is_selected(&self, item_id: &str) -> bool {
        self.as_selection().is_some_and(|ids| ids.contains(item_id))
    }

    /// Return a copy of this selection with `item_id` added or removed.
    ///
    /// Non-selection values are treated as an empty selection.
    pub fn with_toggled(&self, item_id: &str) -> Self {
        let mut ids = self.as_selection().cloned().unwrap_or_default();
        if !ids.remove(item_id) {
            ids.insert(item_id.to_string());
        }
        Self::Selection(ids)
    }
}

impl From<bool> for ModuleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ModuleValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<String> for ModuleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ModuleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<BTreeSet<String>> for ModuleValue {
    fn from(value: BTreeSet<String>) -> Self {
        Self::Selection(value)
    }
}
