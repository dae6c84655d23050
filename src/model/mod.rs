//! Domain model types (pure).
//!
//! All types in this module are plain data: module descriptors created by
//! the host, values they wrap, entries streamed into the log buffers and
//! the render items the pipeline produces.

pub mod entries;
pub mod error;
pub mod identifiers;
pub mod listeners;
pub mod module;
pub mod render;
pub mod value;

// Re-export for convenience
pub use entries::{BufferedEntry, LifecycleEvent, LifecycleLogEntry, LogEntry, NetworkLogEntry};
pub use error::{ConfigurationError, EngineError};
pub use identifiers::{EntryId, ItemId, ModuleId};
pub use listeners::{ButtonListener, Callback, SelectionListener, ToggleListener, ValueListener};
pub use module::{
    AppInfoButtonModule, ButtonModule, CustomModule, HeaderModule, KeyValueListModule,
    KeylineOverlayToggleModule, LifecycleLogFeedModule, ListItem, LogFeedModule, LongTextModule,
    Module, ModuleBody, ModuleKind, MultipleSelectionListModule, NetworkLogFeedModule,
    ScreenshotButtonModule, SimpleListModule, SingleSelectionListModule, TextModule,
    ToggleModule, ValueWrapper,
};
pub use render::{
    ItemAction, RenderContent, RenderItem, APPLY_PENDING_CHANGES_ID, RESET_PENDING_CHANGES_ID,
};
pub use value::ModuleValue;
