//! Engine-owned mutable state (pure).
//!
//! All state transitions are plain methods testable without a runtime.

pub mod buffers;
pub mod registry;
pub mod ui_state;

// Re-export for convenience
pub use buffers::{EntryBuffer, LogBuffers, DEFAULT_CAPACITY};
pub use registry::{ModuleRegistry, Positioning};
pub use ui_state::{UiState, UiStateStore};
