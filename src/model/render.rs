//! Render items produced by the rebuild pipeline.
//!
//! Items are ephemeral: every rebuild produces a fresh list. Surfaces diff
//! consecutive lists by [`RenderItem::id`] and send the item's
//! [`ItemAction`] back to the engine when the user interacts with it.

use super::identifiers::{EntryId, ItemId, ModuleId};
use chrono::{DateTime, Utc};

/// Id of the apply button of the pending-changes bar.
pub const APPLY_PENDING_CHANGES_ID: &str = "apply_pending_changes";

/// Id of the reset button of the pending-changes bar.
pub const RESET_PENDING_CHANGES_ID: &str = "reset_pending_changes";

/// One render-ready row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderItem {
    /// Identity of the row within one published list.
    pub id: ItemId,
    /// What to draw.
    pub content: RenderContent,
    /// What to dispatch when the user interacts with the row.
    pub action: Option<ItemAction>,
}

impl RenderItem {
    /// A row without interaction.
    pub fn new(id: ItemId, content: RenderContent) -> Self {
        Self {
            id,
            content,
            action: None,
        }
    }

    /// Attach an interaction.
    pub fn with_action(mut self, action: ItemAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// Display payload of a [`RenderItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderContent {
    Header {
        title: String,
        subtitle: Option<String>,
        text: Option<String>,
    },
    Text {
        text: String,
        is_title: bool,
    },
    /// Expanded body of a long text section.
    LongText {
        text: String,
    },
    Toggle {
        title: String,
        is_on: bool,
        is_enabled: bool,
    },
    Button {
        text: String,
        /// Draw as a list row rather than a button.
        use_list_item: bool,
    },
    KeyValueList {
        title: String,
        pairs: Vec<(String, String)>,
    },
    /// Header row of an expandable section.
    SectionHeader {
        title: String,
        is_expanded: bool,
        /// False when expanding the section would show nothing.
        is_icon_visible: bool,
    },
    ListItem {
        title: String,
    },
    SingleSelectionItem {
        title: String,
        is_selected: bool,
    },
    MultipleSelectionItem {
        title: String,
        is_selected: bool,
        is_enabled: bool,
    },
    LogItem {
        message: String,
        label: Option<String>,
        timestamp: Option<DateTime<Utc>>,
        has_payload: bool,
    },
    NetworkLogItem {
        /// Url with the feed's base url stripped.
        url: String,
        method: String,
        is_outgoing: bool,
        timestamp: Option<DateTime<Utc>>,
        duration_ms: Option<u64>,
        /// Empty unless the feed shows headers.
        headers: Vec<String>,
    },
    LifecycleLogItem {
        class_name: String,
        event: String,
        timestamp: Option<DateTime<Utc>>,
    },
    /// Trailing row of a truncated feed.
    ShowMore {
        remaining: usize,
    },
}

/// Interaction a surface dispatches back through
/// [`Engine::dispatch`](crate::Engine::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAction {
    /// Expand or collapse a section.
    ToggleExpansion(ModuleId),
    /// Write a toggle value.
    SetToggle { module: ModuleId, value: bool },
    /// Press a button module.
    PressButton(ModuleId),
    /// Tap a row of a simple list.
    SelectListItem { module: ModuleId, item_id: String },
    /// Pick a row of a single-selection list.
    SelectSingle { module: ModuleId, item_id: String },
    /// Check or uncheck a row of a multiple-selection list.
    ToggleMultiple { module: ModuleId, item_id: String },
    /// Raise a feed's display limit by one page.
    ShowMore(ModuleId),
    /// Switch the keyline overlay.
    SetKeylineOverlay { module: ModuleId, enabled: bool },
    OpenAppInfo,
    TakeScreenshot,
    /// Open the payload of a log row.
    ShowLogPayload(EntryId),
    /// Open the detail of a network row.
    ShowNetworkEntry { module: ModuleId, entry: EntryId },
    ApplyPendingChanges,
    ResetPendingChanges,
}
