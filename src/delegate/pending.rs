//! The shared value-wrapper delegate.

use super::Delegate;
use crate::model::{Module, ModuleId, ModuleValue, ValueWrapper};
use crate::persistence::PersistenceStore;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Committed value plus an optional staged edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingValue<T> {
    /// Last applied value.
    pub committed: T,
    /// Edit awaiting confirmation.
    pub staged: Option<T>,
}

impl<T: PartialEq> PendingValue<T> {
    /// State with nothing staged.
    pub fn new(committed: T) -> Self {
        Self {
            committed,
            staged: None,
        }
    }

    /// `staged ?? committed`.
    pub fn current(&self) -> &T {
        self.staged.as_ref().unwrap_or(&self.committed)
    }

    /// Whether the staged edit would change the committed value.
    pub fn has_pending_changes(&self) -> bool {
        self.staged
            .as_ref()
            .is_some_and(|staged| *staged != self.committed)
    }

    /// Move the staged edit into `committed`, returning it. `None` when
    /// nothing was staged.
    pub fn commit(&mut self) -> Option<&T> {
        let staged = self.staged.take()?;
        self.committed = staged;
        Some(&self.committed)
    }
}

/// Delegate backing every built-in value-wrapper kind.
///
/// State is created lazily: the first access loads the persisted value
/// (when the module asks for persistence) or falls back to the module's
/// initial value. Listener callbacks and saves run after the state lock is
/// released, so a callback may call back into the delegate.
#[derive(Debug)]
pub struct ValueWrapperDelegate {
    store: Arc<dyn PersistenceStore>,
    values: Mutex<HashMap<ModuleId, PendingValue<ModuleValue>>>,
}

impl ValueWrapperDelegate {
    /// Create a delegate persisting through `store`.
    pub fn new(store: Arc<dyn PersistenceStore>) -> Self {
        Self {
            store,
            values: Mutex::new(HashMap::new()),
        }
    }

    fn initial_value(&self, id: &ModuleId, wrapper: &ValueWrapper) -> ModuleValue {
        if !wrapper.is_value_persisted {
            return wrapper.initial_value.clone();
        }

        match self.store.load(id) {
            Ok(Some(value)) => value,
            Ok(None) => wrapper.initial_value.clone(),
            Err(e) => {
                warn!(module = %id, error = %e, "Failed to load persisted value, using initial value");
                wrapper.initial_value.clone()
            }
        }
    }

    /// Run `f` on the module's state, creating it first if needed.
    fn with_state<R>(
        &self,
        id: &ModuleId,
        wrapper: &ValueWrapper,
        f: impl FnOnce(&mut PendingValue<ModuleValue>) -> R,
    ) -> R {
        // Loading under the lock keeps two racing first accesses from both
        // reading the store.
        let mut values = self.values.lock();
        let state = values
            .entry(id.clone())
            .or_insert_with(|| PendingValue::new(self.initial_value(id, wrapper)));
        f(state)
    }

    fn commit(&self, id: &ModuleId, wrapper: &ValueWrapper, value: ModuleValue) {
        if wrapper.is_value_persisted {
            if let Err(e) = self.store.save(id, &value) {
                warn!(module = %id, error = %e, "Failed to persist value");
            }
        }
        debug!(module = %id, ?value, "Value committed");
        wrapper.on_value_changed.on_value_changed(&value);
    }
}

impl Delegate for ValueWrapperDelegate {
    fn current_value(&self, module: &Module) -> Option<ModuleValue> {
        let wrapper = module.value_wrapper()?;
        Some(self.with_state(module.id(), wrapper, |state| state.current().clone()))
    }

    fn set_current_value(&self, module: &Module, value: ModuleValue) {
        let Some(wrapper) = module.value_wrapper() else {
            return;
        };

        if wrapper.should_require_confirmation {
            self.with_state(module.id(), wrapper, |state| state.staged = Some(value));
            return;
        }

        self.with_state(module.id(), wrapper, |state| {
            state.committed = value.clone();
            state.staged = None;
        });
        self.commit(module.id(), wrapper, value);
    }

    fn has_pending_changes(&self, module: &Module) -> bool {
        let Some(wrapper) = module.value_wrapper() else {
            return false;
        };
        self.with_state(module.id(), wrapper, |state| state.has_pending_changes())
    }

    fn apply_pending_changes(&self, module: &Module) {
        let Some(wrapper) = module.value_wrapper() else {
            return;
        };

        let committed = self.with_state(module.id(), wrapper, |state| {
            if state.has_pending_changes() {
                state.commit().cloned()
            } else {
                state.staged = None;
                None
            }
        });
        if let Some(value) = committed {
            self.commit(module.id(), wrapper, value);
        }
    }

    fn reset_pending_changes(&self, module: &Module) {
        let Some(wrapper) = module.value_wrapper() else {
            return;
        };
        self.with_state(module.id(), wrapper, |state| state.staged = None);
    }

    fn forget(&self, id: &ModuleId) {
        self.values.lock().remove(id);
    }
}
