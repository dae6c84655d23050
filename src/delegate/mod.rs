//! Pending-change delegates.
//!
//! Value-wrapper modules do not hold their own value: a [`Delegate`] looked
//! up by [`ModuleKind`] owns the committed and staged values of every
//! module of that kind. With confirmation required, edits are staged until
//! [`Delegate::apply_pending_changes`] commits them or
//! [`Delegate::reset_pending_changes`] discards them.
//!
//! A kind without a registered delegate degrades to no-ops; the no-op
//! engine is simply an engine built with [`DelegateRegistry::empty`].

mod pending;

pub use pending::{PendingValue, ValueWrapperDelegate};

use crate::model::{Module, ModuleId, ModuleKind, ModuleValue};
use crate::persistence::PersistenceStore;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[cfg(test)]
#[path = "delegate_tests.rs"]
mod tests;

/// Owner of the pending-change state of one module kind.
///
/// All methods take the module descriptor so the delegate can read its
/// value-wrapper configuration. Modules that wrap no value are ignored.
pub trait Delegate: Send + Sync + fmt::Debug {
    /// `staged ?? committed`.
    fn current_value(&self, module: &Module) -> Option<ModuleValue>;

    /// Commit `value` immediately, or stage it when the module requires
    /// confirmation.
    fn set_current_value(&self, module: &Module, value: ModuleValue);

    /// Whether a staged value differs from the committed one.
    fn has_pending_changes(&self, module: &Module) -> bool;

    /// Commit the staged value. No-op when nothing is pending.
    fn apply_pending_changes(&self, module: &Module);

    /// Discard the staged value without notifying the module.
    fn reset_pending_changes(&self, module: &Module);

    /// Drop any state kept for a removed module.
    fn forget(&self, id: &ModuleId) {
        let _ = id;
    }
}

/// Lookup table from module kind to delegate.
#[derive(Debug, Clone, Default)]
pub struct DelegateRegistry {
    delegates: HashMap<ModuleKind, Arc<dyn Delegate>>,
}

impl DelegateRegistry {
    /// A registry without delegates: every pending-change operation is a
    /// no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with the built-in value-wrapper delegates, persisting
    /// through `store`.
    pub fn with_builtins(store: Arc<dyn PersistenceStore>) -> Self {
        let mut registry = Self::empty();
        registry.register(
            ModuleKind::MultipleSelectionList,
            Arc::new(ValueWrapperDelegate::new(store)),
        );
        registry
    }

    /// Register or replace the delegate of `kind`.
    pub fn register(&mut self, kind: ModuleKind, delegate: Arc<dyn Delegate>) {
        self.delegates.insert(kind, delegate);
    }

    /// Delegate responsible for `kind`.
    pub fn delegate_for(&self, kind: &ModuleKind) -> Option<&Arc<dyn Delegate>> {
        self.delegates.get(kind)
    }

    /// Whether a delegate is registered for `kind`.
    pub fn contains(&self, kind: &ModuleKind) -> bool {
        self.delegates.contains_key(kind)
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    /// Whether no kind has a delegate.
    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}
