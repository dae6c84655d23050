//! Identifier newtypes for modules, render items and buffered log entries.
//!
//! Module ids are chosen by the host and are used verbatim as persistence
//! keys, so they are plain strings. Entry ids are assigned by the engine.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable identifier of a panel module.
///
/// Exactly one module per id lives in the registry at any time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    /// Create a module id from any string-like value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ModuleId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&ModuleId> for ModuleId {
    fn from(id: &ModuleId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifier of a render item, unique within one published item list.
///
/// Identity is structural: an item standing for module `a/b` never equals
/// row `b` of module `a`, even though both display as `a/b`. Rows are
/// namespaced under their section's module id so two sections can hold
/// rows with the same local id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemId {
    /// The item that represents a module itself.
    Module(ModuleId),
    /// A row inside the section owned by a module.
    Child(ModuleId, String),
    /// An item the engine emits on its own behalf.
    Synthetic(&'static str),
}

impl ItemId {
    /// Id of the item that represents the module itself.
    pub fn module(id: &ModuleId) -> Self {
        Self::Module(id.clone())
    }

    /// Id of a child row inside the section owned by `module`.
    pub fn child(module: &ModuleId, local: impl fmt::Display) -> Self {
        Self::Child(module.clone(), local.to_string())
    }

    /// Id for an item the engine emits on its own behalf.
    pub const fn synthetic(raw: &'static str) -> Self {
        Self::Synthetic(raw)
    }

    /// The module this item belongs to, if any.
    pub fn module_id(&self) -> Option<&ModuleId> {
        match self {
            Self::Module(id) | Self::Child(id, _) => Some(id),
            Self::Synthetic(_) => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module(id) => write!(f, "{id}"),
            Self::Child(module, local) => write!(f, "{module}/{local}"),
            Self::Synthetic(raw) => f.write_str(raw),
        }
    }
}

/// Identifier of a buffered log, network or lifecycle entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(u64);

impl EntryId {
    /// Wrap a raw sequence number.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw sequence number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
