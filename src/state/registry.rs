//! The ordered module registry.
//!
//! Invariants maintained after every mutation:
//!
//! 1. Module ids are unique; upserting an existing id replaces it in place.
//! 2. Header modules come before every other module. The sort is stable, so
//!    relative order within each group is insertion order.
//! 3. A new id is placed according to its [`Positioning`], falling back to
//!    the nearest end when the reference module is absent.

use crate::model::{Module, ModuleId, ModuleKind};
use std::collections::HashSet;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

/// Where a newly inserted module goes.
///
/// Only consulted when the id is new; replacing an existing module keeps
/// its index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Positioning {
    /// Append.
    #[default]
    Bottom,
    /// Prepend.
    Top,
    /// Insert at the reference module's index, or prepend when absent.
    Above(ModuleId),
    /// Insert after the reference module, or append when absent.
    Below(ModuleId),
}

/// Ordered, id-unique collection of modules.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<Module>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole registry. Duplicate ids keep their first occurrence.
    pub fn replace_all(&mut self, modules: impl IntoIterator<Item = Module>) {
        let mut seen = HashSet::new();
        self.modules = modules
            .into_iter()
            .filter(|module| seen.insert(module.id().clone()))
            .collect();
        self.sort_headers_first();
    }

    /// Insert or replace a module.
    pub fn upsert(&mut self, module: Module, positioning: Positioning) {
        if let Some(index) = self.index_of(module.id()) {
            self.modules[index] = module;
        } else {
            let index = self.insertion_index(&positioning);
            self.modules.insert(index, module);
        }
        self.sort_headers_first();
    }

    /// Remove a module. Unknown ids are ignored.
    pub fn remove(&mut self, id: &ModuleId) -> Option<Module> {
        self.index_of(id).map(|index| self.modules.remove(index))
    }

    /// Copy of the current modules, in order.
    pub fn snapshot(&self) -> Vec<Module> {
        self.modules.clone()
    }

    /// Look up a module by id.
    pub fn get(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|module| module.id() == id)
    }

    /// Whether a module with `id` is registered.
    pub fn contains(&self, id: &ModuleId) -> bool {
        self.index_of(id).is_some()
    }

    /// First module of the given kind.
    pub fn find_first(&self, kind: &ModuleKind) -> Option<&Module> {
        self.modules.iter().find(|module| &module.kind() == kind)
    }

    /// Iterate over modules in order.
    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    /// Number of registered modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn index_of(&self, id: &ModuleId) -> Option<usize> {
        self.modules.iter().position(|module| module.id() == id)
    }

    fn insertion_index(&self, positioning: &Positioning) -> usize {
        match positioning {
            Positioning::Bottom => self.modules.len(),
            Positioning::Top => 0,
            Positioning::Above(reference) => self.index_of(reference).unwrap_or(0),
            Positioning::Below(reference) => self
                .index_of(reference)
                .map_or(self.modules.len(), |index| index + 1),
        }
    }

    fn sort_headers_first(&mut self) {
        // `sort_by_key` is stable.
        self.modules.sort_by_key(|module| !module.is_header());
    }
}
