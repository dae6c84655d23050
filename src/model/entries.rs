//! Entries streamed into the panel's log buffers.
//!
//! Three independent streams exist: free-form log messages, network calls
//! and component lifecycle events. All are immutable once appended.

use super::identifiers::EntryId;
use chrono::{DateTime, Utc};
use std::fmt;

/// Common access for entries stored in an [`EntryBuffer`](crate::state::EntryBuffer).
pub trait BufferedEntry: Clone + Send + Sync + 'static {
    /// The entry's id, used for deduplication inside a section.
    fn id(&self) -> EntryId;

    /// Label used for filtering. Entries without a label never match a
    /// label filter.
    fn label(&self) -> Option<&str> {
        None
    }
}

/// A free-form log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Unique id of the entry.
    pub id: EntryId,
    /// When the message was logged.
    pub timestamp: DateTime<Utc>,
    /// The message text.
    pub message: String,
    /// Optional label (tag) used by log feeds to filter their rows.
    pub label: Option<String>,
    /// Optional longer payload a host can show when the row is opened.
    pub payload: Option<String>,
}

impl LogEntry {
    /// Create an unlabeled entry stamped with the current time.
    pub fn new(id: EntryId, message: impl Into<String>) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            message: message.into(),
            label: None,
            payload: None,
        }
    }

    /// Attach a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach a payload.
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }
}

impl BufferedEntry for LogEntry {
    fn id(&self) -> EntryId {
        self.id
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// A single network call observed by host instrumentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkLogEntry {
    /// Unique id of the entry.
    pub id: EntryId,
    /// When the call was observed.
    pub timestamp: DateTime<Utc>,
    /// Full request url.
    pub url: String,
    /// HTTP method, e.g. `GET`.
    pub method: String,
    /// `true` for requests leaving the app, `false` for responses.
    pub is_outgoing: bool,
    /// Request or response body.
    pub payload: String,
    /// Header lines, shown only by feeds configured to show them.
    pub headers: Vec<String>,
    /// Round-trip duration, for responses.
    pub duration_ms: Option<u64>,
}

impl NetworkLogEntry {
    /// Create an entry for an outgoing request stamped with the current time.
    pub fn request(id: EntryId, method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            url: url.into(),
            method: method.into(),
            is_outgoing: true,
            payload: String::new(),
            headers: Vec::new(),
            duration_ms: None,
        }
    }

    /// Create an entry for an incoming response stamped with the current time.
    pub fn response(
        id: EntryId,
        method: impl Into<String>,
        url: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            is_outgoing: false,
            duration_ms: Some(duration_ms),
            ..Self::request(id, method, url)
        }
    }
}

impl BufferedEntry for NetworkLogEntry {
    fn id(&self) -> EntryId {
        self.id
    }
}

/// Lifecycle transitions a host component can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Component created.
    Created,
    /// Component became visible.
    Started,
    /// Component gained focus.
    Resumed,
    /// Component lost focus.
    Paused,
    /// Component no longer visible.
    Stopped,
    /// Component state saved.
    SaveInstanceState,
    /// Component destroyed.
    Destroyed,
}

impl LifecycleEvent {
    /// Lowercase name used in rendered rows.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Started => "started",
            Self::Resumed => "resumed",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::SaveInstanceState => "save_instance_state",
            Self::Destroyed => "destroyed",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lifecycle transition of a host component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleLogEntry {
    /// Unique id of the entry.
    pub id: EntryId,
    /// When the transition happened.
    pub timestamp: DateTime<Utc>,
    /// Name of the component that transitioned.
    pub class_name: String,
    /// The transition.
    pub event: LifecycleEvent,
    /// Whether saved state was present, for `Created` events.
    pub has_saved_state: Option<bool>,
}

impl LifecycleLogEntry {
    /// Create an entry stamped with the current time.
    pub fn new(id: EntryId, class_name: impl Into<String>, event: LifecycleEvent) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            class_name: class_name.into(),
            event,
            has_saved_state: None,
        }
    }
}

impl BufferedEntry for LifecycleLogEntry {
    fn id(&self) -> EntryId {
        self.id
    }
}
