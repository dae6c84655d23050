//! Module descriptors.
//!
//! A [`Module`] is an immutable description of one panel entry created by
//! the host. Built-in kinds are a closed set of payload structs in
//! [`ModuleBody`]; hosts extend the panel through [`CustomModule`].

use super::error::ConfigurationError;
use super::identifiers::ModuleId;
use super::listeners::{
    ButtonListener, Callback, SelectionListener, ToggleListener, ValueListener,
};
use super::render::RenderItem;
use super::value::ModuleValue;
use crate::delegate::Delegate;
use std::fmt;
use std::sync::Arc;

/// Runtime kind of a module. Delegates are registered per kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// [`HeaderModule`]
    Header,
    /// [`TextModule`]
    Text,
    /// [`LongTextModule`]
    LongText,
    /// [`ToggleModule`]
    Toggle,
    /// [`ButtonModule`]
    Button,
    /// [`SimpleListModule`]
    SimpleList,
    /// [`SingleSelectionListModule`]
    SingleSelectionList,
    /// [`MultipleSelectionListModule`]
    MultipleSelectionList,
    /// [`KeyValueListModule`]
    KeyValueList,
    /// [`KeylineOverlayToggleModule`]
    KeylineOverlayToggle,
    /// [`AppInfoButtonModule`]
    AppInfoButton,
    /// [`ScreenshotButtonModule`]
    ScreenshotButton,
    /// [`LogFeedModule`]
    LogFeed,
    /// [`NetworkLogFeedModule`]
    NetworkLogFeed,
    /// [`LifecycleLogFeedModule`]
    LifecycleLogFeed,
    /// A host-defined kind, named by [`CustomModule::kind_name`].
    Custom(String),
}

impl ModuleKind {
    /// Stable name of the kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Header => "header",
            Self::Text => "text",
            Self::LongText => "long_text",
            Self::Toggle => "toggle",
            Self::Button => "button",
            Self::SimpleList => "simple_list",
            Self::SingleSelectionList => "single_selection_list",
            Self::MultipleSelectionList => "multiple_selection_list",
            Self::KeyValueList => "key_value_list",
            Self::KeylineOverlayToggle => "keyline_overlay_toggle",
            Self::AppInfoButton => "app_info_button",
            Self::ScreenshotButton => "screenshot_button",
            Self::LogFeed => "log_feed",
            Self::NetworkLogFeed => "network_log_feed",
            Self::LifecycleLogFeed => "lifecycle_log_feed",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable row of a list module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Id of the row, unique within its list.
    pub id: String,
    /// Displayed title.
    pub title: String,
}

impl ListItem {
    /// Create a row.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Create a row whose id is its title.
    pub fn titled(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: title.clone(),
            title,
        }
    }
}

/// Configuration shared by every value-wrapper module.
#[derive(Debug, Clone)]
pub struct ValueWrapper {
    /// Value used until the user changes it. When `is_value_persisted` is
    /// set, a stored value overrides it.
    pub initial_value: ModuleValue,
    /// Persist the committed value under the module id.
    pub is_value_persisted: bool,
    /// Stage edits until they are explicitly applied.
    pub should_require_confirmation: bool,
    /// Disabled modules are rendered but do not react to interaction.
    pub is_enabled: bool,
    /// Called whenever a value is committed.
    pub on_value_changed: Callback<dyn ValueListener>,
}

impl ValueWrapper {
    /// A wrapper with the given initial value and callback, not persisted
    /// and applied immediately.
    pub fn new(initial_value: ModuleValue, on_value_changed: impl ValueListener + 'static) -> Self {
        Self {
            initial_value,
            is_value_persisted: false,
            should_require_confirmation: false,
            is_enabled: true,
            on_value_changed: Callback::value(on_value_changed),
        }
    }

    /// Persist the committed value under the module id.
    pub fn persisted(mut self) -> Self {
        self.is_value_persisted = true;
        self
    }

    /// Stage edits until they are applied.
    pub fn requiring_confirmation(mut self) -> Self {
        self.should_require_confirmation = true;
        self
    }

    /// Render the module as static.
    pub fn disabled(mut self) -> Self {
        self.is_enabled = false;
        self
    }
}

/// Large title block, always sorted above every other module.
#[derive(Debug, Clone)]
pub struct HeaderModule {
    /// Main title.
    pub title: String,
    /// Optional second line.
    pub subtitle: Option<String>,
    /// Optional third line.
    pub text: Option<String>,
}

/// A short piece of text.
#[derive(Debug, Clone)]
pub struct TextModule {
    /// The text.
    pub text: String,
    /// Render emphasised, as a section title.
    pub is_title: bool,
}

/// A longer piece of text hidden behind an expandable section.
#[derive(Debug, Clone)]
pub struct LongTextModule {
    /// Section title.
    pub title: String,
    /// Text shown when expanded.
    pub text: String,
    /// Expansion state used until the user toggles it.
    pub is_initially_expanded: bool,
}

/// A switch whose state lives in the UI state store.
#[derive(Debug, Clone)]
pub struct ToggleModule {
    /// Label next to the switch.
    pub title: String,
    /// State used until the user toggles it.
    pub initial_value: bool,
    /// Called when a different value is written.
    pub on_value_changed: Callback<dyn ToggleListener>,
}

/// A plain button.
#[derive(Debug, Clone)]
pub struct ButtonModule {
    /// Button caption.
    pub text: String,
    /// Called on every press.
    pub on_button_pressed: Callback<dyn ButtonListener>,
}

/// An expandable list of tappable rows.
#[derive(Debug, Clone)]
pub struct SimpleListModule {
    /// Section title.
    pub title: String,
    /// Rows.
    pub items: Vec<ListItem>,
    /// Expansion state used until the user toggles it.
    pub is_initially_expanded: bool,
    /// Called with the id of the tapped row.
    pub on_item_selected: Callback<dyn SelectionListener>,
}

/// An expandable radio-button list.
#[derive(Debug, Clone)]
pub struct SingleSelectionListModule {
    /// Section title.
    pub title: String,
    /// Rows.
    pub items: Vec<ListItem>,
    /// Expansion state used until the user toggles it.
    pub is_initially_expanded: bool,
    /// Row selected until the user picks another one.
    pub initial_selection_id: Option<String>,
    /// Called after the selection is stored.
    pub on_selection_changed: Callback<dyn SelectionListener>,
}

/// An expandable checkbox list. Its selection is a value-wrapper value
/// managed by a [`Delegate`].
#[derive(Debug, Clone)]
pub struct MultipleSelectionListModule {
    /// Section title.
    pub title: String,
    /// Rows.
    pub items: Vec<ListItem>,
    /// Expansion state used until the user toggles it.
    pub is_initially_expanded: bool,
    /// Selection value configuration. `initial_value` should be a
    /// [`ModuleValue::Selection`].
    pub value: ValueWrapper,
}

/// Static key/value pairs.
#[derive(Debug, Clone)]
pub struct KeyValueListModule {
    /// Title above the pairs.
    pub title: String,
    /// The pairs, in display order.
    pub pairs: Vec<(String, String)>,
}

/// Switch for the host's keyline (layout grid) overlay.
#[derive(Debug, Clone)]
pub struct KeylineOverlayToggleModule {
    /// Label next to the switch.
    pub title: String,
    /// Grid spacing the host should draw, in host units.
    pub grid_size: Option<u32>,
}

impl KeylineOverlayToggleModule {
    /// Default module id.
    pub const ID: &'static str = "keyline_overlay";
}

/// Button opening the host application's system settings page.
#[derive(Debug, Clone)]
pub struct AppInfoButtonModule {
    /// Button caption.
    pub text: String,
}

impl AppInfoButtonModule {
    /// Default module id.
    pub const ID: &'static str = "app_info_button";
}

/// Button asking the host to capture a screenshot.
#[derive(Debug, Clone)]
pub struct ScreenshotButtonModule {
    /// Button caption.
    pub text: String,
}

impl ScreenshotButtonModule {
    /// Default module id.
    pub const ID: &'static str = "screenshot_button";
}

/// Expandable feed of free-form log messages.
#[derive(Debug, Clone)]
pub struct LogFeedModule {
    /// Section title.
    pub title: String,
    /// Only show entries carrying this label.
    pub label: Option<String>,
    /// Rows per page; the engine's configured default when `None`.
    pub max_item_count: Option<usize>,
    /// Expansion state used until the user toggles it.
    pub is_initially_expanded: bool,
    /// Include timestamps in the rows.
    pub should_show_timestamp: bool,
}

impl LogFeedModule {
    /// Default module id.
    pub const ID: &'static str = "log_feed";
}

/// Expandable feed of network calls.
#[derive(Debug, Clone)]
pub struct NetworkLogFeedModule {
    /// Section title.
    pub title: String,
    /// Prefix stripped from displayed urls.
    pub base_url: Option<String>,
    /// Rows per page; the engine's configured default when `None`.
    pub max_item_count: Option<usize>,
    /// Expansion state used until the user toggles it.
    pub is_initially_expanded: bool,
    /// Include timestamps in the rows.
    pub should_show_timestamp: bool,
    /// Include header lines in the rows.
    pub should_show_headers: bool,
}

impl NetworkLogFeedModule {
    /// Default module id.
    pub const ID: &'static str = "network_log_feed";
}

/// Expandable feed of host lifecycle events.
#[derive(Debug, Clone)]
pub struct LifecycleLogFeedModule {
    /// Section title.
    pub title: String,
    /// Rows per page; the engine's configured default when `None`.
    pub max_item_count: Option<usize>,
    /// Expansion state used until the user toggles it.
    pub is_initially_expanded: bool,
    /// Include timestamps in the rows.
    pub should_show_timestamp: bool,
}

impl LifecycleLogFeedModule {
    /// Default module id.
    pub const ID: &'static str = "lifecycle_log_feed";
}

/// Host-defined module kind.
///
/// Custom kinds render themselves and must supply their own delegate when
/// they wrap a value.
pub trait CustomModule: Send + Sync + fmt::Debug {
    /// Name of the kind; delegates are looked up by it.
    fn kind_name(&self) -> &str;

    /// Value-wrapper configuration, when the module wraps a value.
    fn value_wrapper(&self) -> Option<&ValueWrapper> {
        None
    }

    /// Create the delegate that manages this kind's pending changes.
    fn create_module_delegate(&self) -> Arc<dyn Delegate>;

    /// Render items for the module. `value` is the delegate's current
    /// value when one is registered.
    fn render(&self, id: &ModuleId, value: Option<&ModuleValue>) -> Vec<RenderItem> {
        let _ = (id, value);
        Vec::new()
    }
}

/// Kind-specific payload of a module.
#[derive(Debug, Clone)]
pub enum ModuleBody {
    /// See [`HeaderModule`].
    Header(HeaderModule),
    /// See [`TextModule`].
    Text(TextModule),
    /// See [`LongTextModule`].
    LongText(LongTextModule),
    /// See [`ToggleModule`].
    Toggle(ToggleModule),
    /// See [`ButtonModule`].
    Button(ButtonModule),
    /// See [`SimpleListModule`].
    SimpleList(SimpleListModule),
    /// See [`SingleSelectionListModule`].
    SingleSelectionList(SingleSelectionListModule),
    /// See [`MultipleSelectionListModule`].
    MultipleSelectionList(MultipleSelectionListModule),
    /// See [`KeyValueListModule`].
    KeyValueList(KeyValueListModule),
    /// See [`KeylineOverlayToggleModule`].
    KeylineOverlayToggle(KeylineOverlayToggleModule),
    /// See [`AppInfoButtonModule`].
    AppInfoButton(AppInfoButtonModule),
    /// See [`ScreenshotButtonModule`].
    ScreenshotButton(ScreenshotButtonModule),
    /// See [`LogFeedModule`].
    LogFeed(LogFeedModule),
    /// See [`NetworkLogFeedModule`].
    NetworkLogFeed(NetworkLogFeedModule),
    /// See [`LifecycleLogFeedModule`].
    LifecycleLogFeed(LifecycleLogFeedModule),
    /// A host-defined module.
    Custom(Arc<dyn CustomModule>),
}

/// An immutable panel entry descriptor.
#[derive(Debug, Clone)]
pub struct Module {
    id: ModuleId,
    body: ModuleBody,
}

impl Module {
    /// Create a module from an id and a payload.
    pub fn new(id: impl Into<ModuleId>, body: ModuleBody) -> Self {
        Self {
            id: id.into(),
            body,
        }
    }

    /// The module's id.
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    /// The module's payload.
    pub fn body(&self) -> &ModuleBody {
        &self.body
    }

    /// The module's runtime kind.
    pub fn kind(&self) -> ModuleKind {
        match &self.body {
            ModuleBody::Header(_) => ModuleKind::Header,
            ModuleBody::Text(_) => ModuleKind::Text,
            ModuleBody::LongText(_) => ModuleKind::LongText,
            ModuleBody::Toggle(_) => ModuleKind::Toggle,
            ModuleBody::Button(_) => ModuleKind::Button,
            ModuleBody::SimpleList(_) => ModuleKind::SimpleList,
            ModuleBody::SingleSelectionList(_) => ModuleKind::SingleSelectionList,
            ModuleBody::MultipleSelectionList(_) => ModuleKind::MultipleSelectionList,
            ModuleBody::KeyValueList(_) => ModuleKind::KeyValueList,
            ModuleBody::KeylineOverlayToggle(_) => ModuleKind::KeylineOverlayToggle,
            ModuleBody::AppInfoButton(_) => ModuleKind::AppInfoButton,
            ModuleBody::ScreenshotButton(_) => ModuleKind::ScreenshotButton,
            ModuleBody::LogFeed(_) => ModuleKind::LogFeed,
            ModuleBody::NetworkLogFeed(_) => ModuleKind::NetworkLogFeed,
            ModuleBody::LifecycleLogFeed(_) => ModuleKind::LifecycleLogFeed,
            ModuleBody::Custom(custom) => ModuleKind::Custom(custom.kind_name().to_string()),
        }
    }

    /// Whether this is a header module.
    pub fn is_header(&self) -> bool {
        matches!(self.body, ModuleBody::Header(_))
    }

    /// Expansion state of an expandable module before any user
    /// interaction. `None` for kinds that never expand.
    pub fn initial_expansion(&self) -> Option<bool> {
        match &self.body {
            ModuleBody::LongText(m) => Some(m.is_initially_expanded),
            ModuleBody::SimpleList(m) => Some(m.is_initially_expanded),
            ModuleBody::SingleSelectionList(m) => Some(m.is_initially_expanded),
            ModuleBody::MultipleSelectionList(m) => Some(m.is_initially_expanded),
            ModuleBody::LogFeed(m) => Some(m.is_initially_expanded),
            ModuleBody::NetworkLogFeed(m) => Some(m.is_initially_expanded),
            ModuleBody::LifecycleLogFeed(m) => Some(m.is_initially_expanded),
            _ => None,
        }
    }

    /// Configured page size of a feed module. `None` for non-feed kinds or
    /// when the engine default applies.
    pub fn max_item_count(&self) -> Option<usize> {
        match &self.body {
            ModuleBody::LogFeed(m) => m.max_item_count,
            ModuleBody::NetworkLogFeed(m) => m.max_item_count,
            ModuleBody::LifecycleLogFeed(m) => m.max_item_count,
            _ => None,
        }
    }

    /// Whether the module streams rows from a log buffer.
    pub fn is_feed(&self) -> bool {
        matches!(
            self.body,
            ModuleBody::LogFeed(_) | ModuleBody::NetworkLogFeed(_) | ModuleBody::LifecycleLogFeed(_)
        )
    }

    /// Value-wrapper configuration, for modules that wrap a value.
    pub fn value_wrapper(&self) -> Option<&ValueWrapper> {
        match &self.body {
            ModuleBody::MultipleSelectionList(m) => Some(&m.value),
            ModuleBody::Custom(custom) => custom.value_wrapper(),
            _ => None,
        }
    }

    /// Create the delegate for a custom module kind.
    ///
    /// # Errors
    ///
    /// Built-in kinds never create their own delegates; asking one to is a
    /// host programming error reported as [`ConfigurationError::BuiltInDelegate`].
    pub fn create_module_delegate(&self) -> Result<Arc<dyn Delegate>, ConfigurationError> {
        match &self.body {
            ModuleBody::Custom(custom) => Ok(custom.create_module_delegate()),
            _ => Err(ConfigurationError::BuiltInDelegate {
                module: self.id.clone(),
                kind: self.kind(),
            }),
        }
    }

    // ===== Convenience constructors =====

    /// A header with a title.
    pub fn header(id: impl Into<ModuleId>, title: impl Into<String>) -> Self {
        Self::new(
            id,
            ModuleBody::Header(HeaderModule {
                title: title.into(),
                subtitle: None,
                text: None,
            }),
        )
    }

    /// A short text.
    pub fn text(id: impl Into<ModuleId>, text: impl Into<String>) -> Self {
        Self::new(
            id,
            ModuleBody::Text(TextModule {
                text: text.into(),
                is_title: false,
            }),
        )
    }

    /// A collapsed long text section.
    pub fn long_text(
        id: impl Into<ModuleId>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            ModuleBody::LongText(LongTextModule {
                title: title.into(),
                text: text.into(),
                is_initially_expanded: false,
            }),
        )
    }

    /// A toggle.
    pub fn toggle(
        id: impl Into<ModuleId>,
        title: impl Into<String>,
        initial_value: bool,
        on_value_changed: impl ToggleListener + 'static,
    ) -> Self {
        Self::new(
            id,
            ModuleBody::Toggle(ToggleModule {
                title: title.into(),
                initial_value,
                on_value_changed: Callback::toggle(on_value_changed),
            }),
        )
    }

    /// A button.
    pub fn button(
        id: impl Into<ModuleId>,
        text: impl Into<String>,
        on_button_pressed: impl ButtonListener + 'static,
    ) -> Self {
        Self::new(
            id,
            ModuleBody::Button(ButtonModule {
                text: text.into(),
                on_button_pressed: Callback::button(on_button_pressed),
            }),
        )
    }

    /// A collapsed list of tappable rows.
    pub fn simple_list(
        id: impl Into<ModuleId>,
        title: impl Into<String>,
        items: Vec<ListItem>,
        on_item_selected: impl SelectionListener + 'static,
    ) -> Self {
        Self::new(
            id,
            ModuleBody::SimpleList(SimpleListModule {
                title: title.into(),
                items,
                is_initially_expanded: false,
                on_item_selected: Callback::selection(on_item_selected),
            }),
        )
    }

    /// A collapsed single-selection list.
    pub fn single_selection_list(
        id: impl Into<ModuleId>,
        title: impl Into<String>,
        items: Vec<ListItem>,
        initial_selection_id: Option<String>,
        on_selection_changed: impl SelectionListener + 'static,
    ) -> Self {
        Self::new(
            id,
            ModuleBody::SingleSelectionList(SingleSelectionListModule {
                title: title.into(),
                items,
                is_initially_expanded: false,
                initial_selection_id,
                on_selection_changed: Callback::selection(on_selection_changed),
            }),
        )
    }

    /// A collapsed multiple-selection list.
    pub fn multiple_selection_list(
        id: impl Into<ModuleId>,
        title: impl Into<String>,
        items: Vec<ListItem>,
        value: ValueWrapper,
    ) -> Self {
        Self::new(
            id,
            ModuleBody::MultipleSelectionList(MultipleSelectionListModule {
                title: title.into(),
                items,
                is_initially_expanded: false,
                value,
            }),
        )
    }

    /// Static key/value pairs.
    pub fn key_value_list(
        id: impl Into<ModuleId>,
        title: impl Into<String>,
        pairs: Vec<(String, String)>,
    ) -> Self {
        Self::new(
            id,
            ModuleBody::KeyValueList(KeyValueListModule {
                title: title.into(),
                pairs,
            }),
        )
    }

    /// The keyline overlay switch under its default id.
    pub fn keyline_overlay_toggle() -> Self {
        Self::new(
            KeylineOverlayToggleModule::ID,
            ModuleBody::KeylineOverlayToggle(KeylineOverlayToggleModule {
                title: "Keyline overlay".to_string(),
                grid_size: None,
            }),
        )
    }

    /// The app info button under its default id.
    pub fn app_info_button() -> Self {
        Self::new(
            AppInfoButtonModule::ID,
            ModuleBody::AppInfoButton(AppInfoButtonModule {
                text: "Show app info".to_string(),
            }),
        )
    }

    /// The screenshot button under its default id.
    pub fn screenshot_button() -> Self {
        Self::new(
            ScreenshotButtonModule::ID,
            ModuleBody::ScreenshotButton(ScreenshotButtonModule {
                text: "Take a screenshot".to_string(),
            }),
        )
    }

    /// A collapsed, unfiltered log feed under its default id.
    pub fn log_feed() -> Self {
        Self::new(
            LogFeedModule::ID,
            ModuleBody::LogFeed(LogFeedModule {
                title: "Logs".to_string(),
                label: None,
                max_item_count: None,
                is_initially_expanded: false,
                should_show_timestamp: false,
            }),
        )
    }

    /// A collapsed network log feed under its default id.
    pub fn network_log_feed() -> Self {
        Self::new(
            NetworkLogFeedModule::ID,
            ModuleBody::NetworkLogFeed(NetworkLogFeedModule {
                title: "Network activity".to_string(),
                base_url: None,
                max_item_count: None,
                is_initially_expanded: false,
                should_show_timestamp: false,
                should_show_headers: false,
            }),
        )
    }

    /// A collapsed lifecycle log feed under its default id.
    pub fn lifecycle_log_feed() -> Self {
        Self::new(
            LifecycleLogFeedModule::ID,
            ModuleBody::LifecycleLogFeed(LifecycleLogFeedModule {
                title: "Lifecycle logs".to_string(),
                max_item_count: None,
                is_initially_expanded: false,
                should_show_timestamp: false,
            }),
        )
    }

    /// A host-defined module.
    pub fn custom(id: impl Into<ModuleId>, custom: Arc<dyn CustomModule>) -> Self {
        Self::new(id, ModuleBody::Custom(custom))
    }

    /// Return a copy with the expansion default changed. Kinds that never
    /// expand are returned unchanged.
    pub fn initially_expanded(mut self, expanded: bool) -> Self {
        match &mut self.body {
            ModuleBody::LongText(m) => m.is_initially_expanded = expanded,
            ModuleBody::SimpleList(m) => m.is_initially_expanded = expanded,
            ModuleBody::SingleSelectionList(m) => m.is_initially_expanded = expanded,
            ModuleBody::MultipleSelectionList(m) => m.is_initially_expanded = expanded,
            ModuleBody::LogFeed(m) => m.is_initially_expanded = expanded,
            ModuleBody::NetworkLogFeed(m) => m.is_initially_expanded = expanded,
            ModuleBody::LifecycleLogFeed(m) => m.is_initially_expanded = expanded,
            _ => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_body() {
        assert_eq!(Module::header("h", "Title").kind(), ModuleKind::Header);
        assert_eq!(Module::log_feed().kind(), ModuleKind::LogFeed);
        assert_eq!(
            Module::toggle("t", "T", false, |_value: bool| {}).kind(),
            ModuleKind::Toggle
        );
    }

    #[test]
    fn only_expandable_kinds_report_initial_expansion() {
        let long_text = Module::long_text("lt", "Title", "Body").initially_expanded(true);
        assert_eq!(long_text.initial_expansion(), Some(true));

        let text = Module::text("t", "Body").initially_expanded(true);
        assert_eq!(text.initial_expansion(), None);
    }

    #[test]
    fn built_in_kinds_refuse_to_create_delegates() {
        let module = Module::multiple_selection_list(
            "colors",
            "Colors",
            vec![ListItem::titled("Red")],
            ValueWrapper::new(ModuleValue::empty_selection(), |_value: &ModuleValue| {}),
        );

        let err = module.create_module_delegate().expect_err("built-ins have no own delegate");
        assert_eq!(
            err,
            ConfigurationError::BuiltInDelegate {
                module: ModuleId::from("colors"),
                kind: ModuleKind::MultipleSelectionList,
            }
        );
    }

    #[test]
    fn multiple_selection_list_exposes_value_wrapper() {
        let module = Module::multiple_selection_list(
            "colors",
            "Colors",
            Vec::new(),
            ValueWrapper::new(ModuleValue::selection(["red"]), |_value: &ModuleValue| {})
                .requiring_confirmation(),
        );

        let wrapper = module.value_wrapper().expect("value wrapper");
        assert!(wrapper.should_require_confirmation);
        assert_eq!(wrapper.initial_value, ModuleValue::selection(["red"]));
        assert!(Module::text("t", "x").value_wrapper().is_none());
    }

    #[test]
    fn unique_built_ins_use_default_ids() {
        assert_eq!(Module::app_info_button().id().as_str(), AppInfoButtonModule::ID);
        assert_eq!(Module::network_log_feed().id().as_str(), NetworkLogFeedModule::ID);
        assert!(Module::lifecycle_log_feed().is_feed());
    }
}
