//! The panel engine: the host-facing service object.
//!
//! An [`Engine`] owns the module registry, the UI state store, the log
//! buffers and the delegate registry. Every mutation goes through `&mut
//! self` on the host's control thread and ends with a rebuild request; the
//! rebuild itself runs on the tokio runtime and publishes to observers.
//!
//! ```no_run
//! use panelkit::{Engine, Module, Positioning};
//!
//! # async fn demo() -> Result<(), panelkit::EngineError> {
//! let mut engine = Engine::builder().build()?;
//! engine.replace_all(vec![
//!     Module::header("title", "Debug menu"),
//!     Module::toggle("dark", "Dark mode", false, |on: bool| println!("dark: {on}")),
//! ]);
//! engine.upsert(Module::text("note", "Build 42"), Positioning::Top);
//! engine.settled().await;
//! assert_eq!(engine.items().len(), 3);
//! # Ok(())
//! # }
//! ```

mod host;

pub use host::{HostActions, NoopHostActions};

use crate::config::{EngineConfig, StatePolicy};
use crate::delegate::{Delegate, DelegateRegistry};
use crate::logging::TracedEvent;
use crate::model::{
    EngineError, EntryId, ItemAction, KeylineOverlayToggleModule, LifecycleLogEntry, LogEntry,
    Module, ModuleBody, ModuleId, ModuleKind, ModuleValue, NetworkLogEntry, RenderItem,
};
use crate::persistence::{MemoryStore, PersistenceStore};
use crate::pipeline::{self, PipelineOptions, RebuildInput};
use crate::scheduler::{RebuildScheduler, RuntimeHandle};
use crate::state::{LogBuffers, ModuleRegistry, Positioning, UiStateStore};
use crate::surface::{ItemsObserver, ObserverId};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::mpsc;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, trace};

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

/// Builder for [`Engine`].
#[derive(Debug, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    delegates: Option<DelegateRegistry>,
    persistence: Option<Arc<dyn PersistenceStore>>,
    host: Option<Arc<dyn HostActions>>,
    runtime: Option<Handle>,
}

impl EngineBuilder {
    /// Engine configuration. Defaults to [`EngineConfig::default`].
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Delegate registry. Defaults to the built-in delegates persisting
    /// through the configured store; pass [`DelegateRegistry::empty`] for
    /// an engine whose pending-change operations are all no-ops.
    pub fn delegates(mut self, delegates: DelegateRegistry) -> Self {
        self.delegates = Some(delegates);
        self
    }

    /// Store for persisted values. Defaults to a [`MemoryStore`].
    pub fn persistence(mut self, store: Arc<dyn PersistenceStore>) -> Self {
        self.persistence = Some(store);
        self
    }

    /// Host capabilities used by the built-in utility modules.
    pub fn host_actions(mut self, host: Arc<dyn HostActions>) -> Self {
        self.host = Some(host);
        self
    }

    /// Runtime that runs rebuilds. Defaults to the ambient runtime, or an
    /// engine-owned one outside tokio.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Build the engine.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Runtime`] when no runtime was given, none is
    /// ambient and one could not be created.
    pub fn build(self) -> Result<Engine, EngineError> {
        let runtime = RuntimeHandle::resolve(self.runtime)?;
        let delegates = match self.delegates {
            Some(delegates) => delegates,
            None => {
                let store = self
                    .persistence
                    .unwrap_or_else(|| Arc::new(MemoryStore::new()));
                DelegateRegistry::with_builtins(store)
            }
        };

        debug!(
            delegates = delegates.len(),
            capacity = self.config.log_buffer_capacity,
            "Building engine"
        );

        Ok(Engine {
            buffers: LogBuffers::with_capacity(self.config.log_buffer_capacity),
            config: self.config,
            registry: ModuleRegistry::new(),
            ui_state: UiStateStore::new(),
            delegates,
            host: self.host.unwrap_or_else(|| Arc::new(NoopHostActions)),
            next_entry_id: 0,
            is_enabled: true,
            scheduler: RebuildScheduler::new(runtime),
        })
    }
}

/// The panel engine.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    registry: ModuleRegistry,
    ui_state: UiStateStore,
    buffers: LogBuffers,
    delegates: DelegateRegistry,
    host: Arc<dyn HostActions>,
    next_entry_id: u64,
    is_enabled: bool,
    scheduler: RebuildScheduler,
}

impl Engine {
    /// Start building an engine.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ===== Registry =====

    /// Replace the whole module list. Duplicate ids keep their first
    /// occurrence; headers are moved to the top.
    pub fn replace_all(&mut self, modules: impl IntoIterator<Item = Module>) {
        let previous = self.registry.snapshot();
        self.registry.replace_all(modules);

        if self.config.state_policy == StatePolicy::PurgeOnRemove {
            let kept: HashSet<&ModuleId> = self.registry.iter().map(Module::id).collect();
            let dropped: Vec<&Module> = previous.iter().filter(|m| !kept.contains(m.id())).collect();
            for module in dropped {
                purge_state(&mut self.ui_state, &self.delegates, module);
            }
        }

        info!(modules = self.registry.len(), "Replaced modules");
        self.request_rebuild();
    }

    /// Insert `module`, or replace the module with the same id in place.
    pub fn upsert(&mut self, module: Module, positioning: Positioning) {
        debug!(module = %module.id(), ?positioning, "Upserting module");
        self.registry.upsert(module, positioning);
        self.request_rebuild();
    }

    /// Remove the module with `id`. Unknown ids are ignored.
    ///
    /// With [`StatePolicy::PurgeOnRemove`] the module's UI and pending state
    /// go with it; otherwise a module re-added under the same id finds its
    /// state again.
    pub fn remove(&mut self, id: &ModuleId) -> Option<Module> {
        let removed = self.registry.remove(id);
        match &removed {
            Some(module) => {
                debug!(module = %id, "Removed module");
                if self.config.state_policy == StatePolicy::PurgeOnRemove {
                    purge_state(&mut self.ui_state, &self.delegates, module);
                }
            }
            None => trace!(module = %id, "Remove of unknown module ignored"),
        }
        self.request_rebuild();
        removed
    }

    /// Registry snapshot, in display order.
    pub fn modules(&self) -> Vec<Module> {
        self.registry.snapshot()
    }

    /// Module with `id`.
    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.registry.get(id)
    }

    // ===== Render surface =====

    /// Register a render observer. It receives the latest published list
    /// right away when there is one.
    pub fn subscribe(&self, observer: Arc<dyn ItemsObserver>) -> ObserverId {
        self.scheduler.subscribe(observer)
    }

    /// Remove a render observer. Returns false when it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.scheduler.unsubscribe(id)
    }

    /// Latest published list. Empty before the first publication.
    pub fn items(&self) -> Arc<[RenderItem]> {
        self.scheduler.items().unwrap_or_else(|| Arc::from(Vec::new()))
    }

    /// Resolves once every rebuild requested so far has converged.
    pub fn settled(&self) -> impl Future<Output = ()> + Send + 'static {
        self.scheduler.settled()
    }

    /// Enable or disable the panel. A disabled panel publishes an empty
    /// list and ignores dispatched actions.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.is_enabled == enabled {
            return;
        }
        self.is_enabled = enabled;
        info!(enabled, "Panel enabled state changed");
        self.request_rebuild();
    }

    /// Whether the panel is enabled.
    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    /// Perform the interaction a render item carries.
    pub fn dispatch(&mut self, action: ItemAction) {
        if !self.is_enabled {
            debug!(?action, "Panel disabled, ignoring action");
            return;
        }
        trace!(?action, "Dispatching action");

        match action {
            ItemAction::ToggleExpansion(module) => self.toggle_expansion(&module),
            ItemAction::SetToggle { module, value } => self.set_toggle_value(&module, value),
            ItemAction::PressButton(module) => self.press_button(&module),
            ItemAction::SelectListItem { module, item_id } => {
                self.select_list_item(&module, &item_id)
            }
            ItemAction::SelectSingle { module, item_id } => self.select_single(&module, &item_id),
            ItemAction::ToggleMultiple { module, item_id } => {
                self.toggle_multiple_selection(&module, &item_id)
            }
            ItemAction::ShowMore(module) => self.show_more(&module),
            ItemAction::SetKeylineOverlay { module, enabled } => {
                self.set_keyline_overlay(&module, enabled)
            }
            ItemAction::OpenAppInfo => self.host.open_app_info(),
            ItemAction::TakeScreenshot => self.host.take_screenshot(),
            ItemAction::ShowLogPayload(entry) => {
                if let Some(entry) = self.buffers.logs.find(entry) {
                    self.host.show_log_payload(entry);
                }
            }
            ItemAction::ShowNetworkEntry { module, entry } => {
                let show_headers = match self.registry.get(&module).map(Module::body) {
                    Some(ModuleBody::NetworkLogFeed(feed)) => feed.should_show_headers,
                    _ => false,
                };
                if let Some(entry) = self.buffers.network.find(entry) {
                    self.host.show_network_entry(entry, show_headers);
                }
            }
            ItemAction::ApplyPendingChanges => self.apply_all_pending_changes(),
            ItemAction::ResetPendingChanges => self.reset_all_pending_changes(),
        }
    }

    // ===== UI interactions =====

    /// Expand or collapse an expandable module. Other ids are ignored.
    pub fn toggle_expansion(&mut self, id: &ModuleId) {
        let Some(default) = self.registry.get(id).and_then(Module::initial_expansion) else {
            trace!(module = %id, "Not an expandable module");
            return;
        };
        let expanded = self.ui_state.toggle_expanded(id, default);
        debug!(module = %id, expanded, "Toggled expansion");
        self.request_rebuild();
    }

    /// Write the value of a toggle module.
    ///
    /// The listener fires only when `value` differs from the last written
    /// value; a repeated write is a no-op.
    pub fn set_toggle_value(&mut self, id: &ModuleId, value: bool) {
        let Some(ModuleBody::Toggle(toggle)) = self.registry.get(id).map(Module::body) else {
            trace!(module = %id, "Not a toggle module");
            return;
        };
        let listener = toggle.on_value_changed.clone();

        let previous = self.ui_state.set_toggle_value(id, value);
        if previous == Some(value) {
            return;
        }
        self.request_rebuild();
        listener.on_toggled(value);
    }

    /// Press a button-like module.
    pub fn press_button(&mut self, id: &ModuleId) {
        match self.registry.get(id).map(Module::body) {
            Some(ModuleBody::Button(button)) => button.on_button_pressed.on_button_pressed(),
            Some(ModuleBody::AppInfoButton(_)) => self.host.open_app_info(),
            Some(ModuleBody::ScreenshotButton(_)) => self.host.take_screenshot(),
            _ => trace!(module = %id, "Not a button module"),
        }
    }

    /// Tap a row of a simple list.
    pub fn select_list_item(&mut self, id: &ModuleId, item_id: &str) {
        if let Some(ModuleBody::SimpleList(list)) = self.registry.get(id).map(Module::body) {
            list.on_item_selected.on_item_selected(item_id);
        }
    }

    /// Pick a row of a single-selection list. The listener fires even when
    /// the row was already selected.
    pub fn select_single(&mut self, id: &ModuleId, item_id: &str) {
        let Some(ModuleBody::SingleSelectionList(list)) = self.registry.get(id).map(Module::body)
        else {
            trace!(module = %id, "Not a single-selection module");
            return;
        };
        let listener = list.on_selection_changed.clone();

        self.ui_state.set_selected_id(id, item_id);
        self.request_rebuild();
        listener.on_item_selected(item_id);
    }

    /// Check or uncheck a row of a multiple-selection list through its
    /// delegate. Disabled lists and lists without a delegate are ignored.
    pub fn toggle_multiple_selection(&mut self, id: &ModuleId, item_id: &str) {
        let Some(module) = self.registry.get(id) else {
            return;
        };
        let Some(wrapper) = module.value_wrapper() else {
            return;
        };
        if !wrapper.is_enabled {
            trace!(module = %id, "Selection disabled, ignoring");
            return;
        }
        let Some(delegate) = self.delegates.delegate_for(&module.kind()) else {
            return;
        };

        let current = delegate
            .current_value(module)
            .unwrap_or_else(|| wrapper.initial_value.clone());
        delegate.set_current_value(module, current.with_toggled(item_id));
        self.request_rebuild();
    }

    /// Raise a feed's display limit by one page.
    pub fn show_more(&mut self, id: &ModuleId) {
        let Some(module) = self.registry.get(id).filter(|m| m.is_feed()) else {
            return;
        };
        let page =
            pipeline::page_size_for(module.max_item_count(), self.config.default_max_item_count);
        let limit = self.ui_state.display_limit(id).unwrap_or(page) + page;
        self.ui_state.set_display_limit(id, limit);
        debug!(module = %id, limit, "Showing more entries");
        self.request_rebuild();
    }

    /// Switch the keyline overlay and tell the host.
    pub fn set_keyline_overlay(&mut self, id: &ModuleId, enabled: bool) {
        let Some(ModuleBody::KeylineOverlayToggle(overlay)) =
            self.registry.get(id).map(Module::body)
        else {
            return;
        };
        let overlay = overlay.clone();

        if self.ui_state.set_toggle_value(id, enabled) == Some(enabled) {
            return;
        }
        self.request_rebuild();
        self.host.set_keyline_overlay(enabled.then_some(&overlay));
    }

    /// The keyline overlay the host should currently draw, if any.
    ///
    /// Hosts that recreate their overlay view read this instead of replaying
    /// [`HostActions::set_keyline_overlay`] calls.
    pub fn active_keyline_overlay(&self) -> Option<&KeylineOverlayToggleModule> {
        let module = self.registry.find_first(&ModuleKind::KeylineOverlayToggle)?;
        let ModuleBody::KeylineOverlayToggle(overlay) = module.body() else {
            return None;
        };
        (self.ui_state.toggle_value(module.id()) == Some(true)).then_some(overlay)
    }

    // ===== Pending changes =====

    /// Current value of a value-wrapper module. `None` without a delegate.
    pub fn current_value(&self, id: &ModuleId) -> Option<ModuleValue> {
        let (module, delegate) = self.delegated(id)?;
        delegate.current_value(module)
    }

    /// Write the value of a value-wrapper module through its delegate.
    pub fn set_current_value(&mut self, id: &ModuleId, value: ModuleValue) {
        let Some((module, delegate)) = self.delegated(id) else {
            return;
        };
        delegate.set_current_value(module, value);
        self.request_rebuild();
    }

    /// Whether the module has a staged edit.
    pub fn has_pending_changes(&self, id: &ModuleId) -> bool {
        self.delegated(id)
            .is_some_and(|(module, delegate)| delegate.has_pending_changes(module))
    }

    /// Commit the module's staged edit.
    pub fn apply_pending_changes(&mut self, id: &ModuleId) {
        let Some((module, delegate)) = self.delegated(id) else {
            return;
        };
        delegate.apply_pending_changes(module);
        self.request_rebuild();
    }

    /// Discard the module's staged edit.
    pub fn reset_pending_changes(&mut self, id: &ModuleId) {
        let Some((module, delegate)) = self.delegated(id) else {
            return;
        };
        delegate.reset_pending_changes(module);
        self.request_rebuild();
    }

    /// Whether any registered module has a staged edit.
    pub fn has_any_pending_changes(&self) -> bool {
        has_any_pending_changes(&self.registry, &self.delegates)
    }

    /// Commit every staged edit.
    pub fn apply_all_pending_changes(&mut self) {
        for (module, delegate) in self.all_delegated() {
            if delegate.has_pending_changes(module) {
                delegate.apply_pending_changes(module);
            }
        }
        info!("Applied pending changes");
        self.request_rebuild();
    }

    /// Discard every staged edit.
    pub fn reset_all_pending_changes(&mut self) {
        for (module, delegate) in self.all_delegated() {
            delegate.reset_pending_changes(module);
        }
        info!("Reset pending changes");
        self.request_rebuild();
    }

    /// Register the delegate a custom module supplies for its kind.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] for built-in modules, which
    /// have no delegate of their own.
    pub fn register_module_delegate(&mut self, module: &Module) -> Result<(), EngineError> {
        let delegate = module.create_module_delegate()?;
        debug!(kind = %module.kind(), "Registered module delegate");
        self.delegates.register(module.kind(), delegate);
        self.request_rebuild();
        Ok(())
    }

    /// Whether a delegate handles `kind`.
    pub fn has_delegate(&self, kind: &ModuleKind) -> bool {
        self.delegates.contains(kind)
    }

    // ===== Log ingestion =====

    /// A fresh id for a log entry.
    pub fn next_entry_id(&mut self) -> EntryId {
        self.next_entry_id += 1;
        EntryId::new(self.next_entry_id)
    }

    /// Append a free-form log message and return its id.
    pub fn log(
        &mut self,
        message: impl Into<String>,
        label: Option<String>,
        payload: Option<String>,
    ) -> EntryId {
        let id = self.next_entry_id();
        let mut entry = LogEntry::new(id, message);
        entry.label = label;
        entry.payload = payload;
        self.append_log(entry);
        id
    }

    /// Append a log entry.
    pub fn append_log(&mut self, entry: LogEntry) {
        self.buffers.logs.append(entry);
        self.request_rebuild();
    }

    /// Append a network entry.
    pub fn append_network_log(&mut self, entry: NetworkLogEntry) {
        self.buffers.network.append(entry);
        self.request_rebuild();
    }

    /// Append a lifecycle entry.
    pub fn append_lifecycle_log(&mut self, entry: LifecycleLogEntry) {
        self.buffers.lifecycle.append(entry);
        self.request_rebuild();
    }

    /// Move every event waiting in `receiver` into the log buffer, labelled
    /// by level. Requests a single rebuild; returns the number of entries.
    pub fn drain_log_channel(&mut self, receiver: &mpsc::Receiver<TracedEvent>) -> usize {
        let mut drained = 0;
        for event in receiver.try_iter() {
            let id = self.next_entry_id();
            let label = event.label();
            let mut entry = LogEntry::new(id, event.message).with_label(label);
            entry.timestamp = event.timestamp;
            self.buffers.logs.append(entry);
            drained += 1;
        }
        if drained > 0 {
            self.request_rebuild();
        }
        drained
    }

    /// The log buffers.
    pub fn buffers(&self) -> &LogBuffers {
        &self.buffers
    }

    /// The UI state store.
    pub fn ui_state(&self) -> &UiStateStore {
        &self.ui_state
    }

    // ===== Internals =====

    fn delegated(&self, id: &ModuleId) -> Option<(&Module, &Arc<dyn Delegate>)> {
        let module = self.registry.get(id)?;
        let delegate = self.delegates.delegate_for(&module.kind())?;
        Some((module, delegate))
    }

    fn all_delegated(&self) -> Vec<(&Module, &Arc<dyn Delegate>)> {
        self.registry
            .iter()
            .filter_map(|module| {
                self.delegates
                    .delegate_for(&module.kind())
                    .map(|delegate| (module, delegate))
            })
            .collect()
    }

    fn request_rebuild(&mut self) {
        let values: HashMap<ModuleId, ModuleValue> = self
            .all_delegated()
            .into_iter()
            .filter_map(|(module, delegate)| {
                delegate
                    .current_value(module)
                    .map(|value| (module.id().clone(), value))
            })
            .collect();

        let input = RebuildInput {
            modules: self.registry.snapshot(),
            ui_state: self.ui_state.clone(),
            buffers: self.buffers.clone(),
            values,
            has_pending_changes: self.has_any_pending_changes(),
            is_enabled: self.is_enabled,
            options: PipelineOptions {
                use_list_items_for_buttons: self.config.use_list_items_for_buttons,
                default_max_item_count: self.config.default_max_item_count,
            },
        };
        self.scheduler.request(input);
    }
}

fn has_any_pending_changes(registry: &ModuleRegistry, delegates: &DelegateRegistry) -> bool {
    registry.iter().any(|module| {
        delegates
            .delegate_for(&module.kind())
            .is_some_and(|delegate| delegate.has_pending_changes(module))
    })
}

fn purge_state(ui_state: &mut UiStateStore, delegates: &DelegateRegistry, module: &Module) {
    ui_state.remove(module.id());
    if let Some(delegate) = delegates.delegate_for(&module.kind()) {
        delegate.forget(module.id());
    }
    trace!(module = %module.id(), "Purged module state");
}
