//! panelkit
//!
//! Embeddable, runtime-configurable debug panel engine.
//!
//! A host registers declarative [`Module`] descriptors with an [`Engine`];
//! the engine turns them, together with UI state and streamed log entries,
//! into an ordered list of [`RenderItem`]s and publishes it to observers.
//! Rebuilds run asynchronously under cancel-and-restart scheduling, and
//! value-wrapper modules can stage edits that are later applied or reset
//! through per-kind [`Delegate`]s.
//!
//! Pure core: [`model`], [`state`], [`pipeline`]. Impure shell: [`engine`],
//! [`persistence`], [`logging`], [`config`] and the rebuild scheduler.

pub mod config;
pub mod delegate;
pub mod engine;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod pipeline;
pub mod state;
pub mod surface;

mod scheduler;

pub use config::{EngineConfig, StatePolicy};
pub use delegate::{Delegate, DelegateRegistry};
pub use engine::{Engine, EngineBuilder, HostActions, NoopHostActions};
pub use model::{
    ConfigurationError, EngineError, ItemAction, ItemId, ListItem, Module, ModuleId, ModuleKind,
    ModuleValue, RenderContent, RenderItem, ValueWrapper,
};
pub use persistence::{JsonFileStore, MemoryStore, PersistenceError, PersistenceStore};
pub use state::Positioning;
pub use surface::{ItemsObserver, ObserverId};
