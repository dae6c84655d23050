//! The rebuild pipeline (pure).
//!
//! [`build`] turns a snapshot of the registry, the UI state, the log
//! buffers and the delegate values into the ordered list of render items.
//! It touches no shared state, so the scheduler can run it on any thread
//! and throw the result away when a newer rebuild supersedes it.

mod feeds;

pub(crate) use feeds::page_size_for;

use crate::model::{
    ItemAction, ItemId, Module, ModuleBody, ModuleId, ModuleValue, RenderContent, RenderItem,
    APPLY_PENDING_CHANGES_ID, RESET_PENDING_CHANGES_ID,
};
use crate::state::{LogBuffers, UiStateStore};
use std::collections::{HashMap, HashSet};

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

/// Rendering switches that come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Draw buttons as list rows.
    pub use_list_items_for_buttons: bool,
    /// Page size of feeds that do not set `max_item_count`.
    pub default_max_item_count: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            use_list_items_for_buttons: false,
            default_max_item_count: crate::config::DEFAULT_MAX_ITEM_COUNT,
        }
    }
}

/// Everything one rebuild reads, captured on the control thread.
#[derive(Debug, Clone, Default)]
pub struct RebuildInput {
    /// Registry snapshot, in order.
    pub modules: Vec<Module>,
    /// UI state snapshot.
    pub ui_state: UiStateStore,
    /// Log buffer snapshot.
    pub buffers: LogBuffers,
    /// Current delegate values of value-wrapper modules.
    pub values: HashMap<ModuleId, ModuleValue>,
    /// Whether any value-wrapper module has a staged edit.
    pub has_pending_changes: bool,
    /// A disabled panel renders nothing.
    pub is_enabled: bool,
    /// Rendering switches.
    pub options: PipelineOptions,
}

/// Compute the render items for `input`.
pub fn build(input: &RebuildInput) -> Vec<RenderItem> {
    if !input.is_enabled {
        return Vec::new();
    }

    let mut items = Vec::new();
    for module in &input.modules {
        render_module(input, module, &mut items);
    }

    if input.has_pending_changes {
        items.push(
            RenderItem::new(
                ItemId::synthetic(APPLY_PENDING_CHANGES_ID),
                RenderContent::Button {
                    text: "Apply".to_string(),
                    use_list_item: input.options.use_list_items_for_buttons,
                },
            )
            .with_action(ItemAction::ApplyPendingChanges),
        );
        items.push(
            RenderItem::new(
                ItemId::synthetic(RESET_PENDING_CHANGES_ID),
                RenderContent::Button {
                    text: "Reset".to_string(),
                    use_list_item: input.options.use_list_items_for_buttons,
                },
            )
            .with_action(ItemAction::ResetPendingChanges),
        );
    }

    items
}

fn render_module(input: &RebuildInput, module: &Module, items: &mut Vec<RenderItem>) {
    let id = module.id();
    let item_id = ItemId::module(id);
    let use_list_item = input.options.use_list_items_for_buttons;

    match module.body() {
        ModuleBody::Header(header) => items.push(RenderItem::new(
            item_id,
            RenderContent::Header {
                title: header.title.clone(),
                subtitle: header.subtitle.clone(),
                text: header.text.clone(),
            },
        )),
        ModuleBody::Text(text) => items.push(RenderItem::new(
            item_id,
            RenderContent::Text {
                text: text.text.clone(),
                is_title: text.is_title,
            },
        )),
        ModuleBody::LongText(long_text) => {
            let children = vec![RenderItem::new(
                ItemId::child(id, "text"),
                RenderContent::LongText {
                    text: long_text.text.clone(),
                },
            )];
            push_section(input, module, &long_text.title, children, items);
        }
        ModuleBody::Toggle(toggle) => {
            let is_on = input
                .ui_state
                .toggle_value(id)
                .unwrap_or(toggle.initial_value);
            items.push(
                RenderItem::new(
                    item_id,
                    RenderContent::Toggle {
                        title: toggle.title.clone(),
                        is_on,
                        is_enabled: true,
                    },
                )
                .with_action(ItemAction::SetToggle {
                    module: id.clone(),
                    value: !is_on,
                }),
            );
        }
        ModuleBody::Button(button) => items.push(
            RenderItem::new(
                item_id,
                RenderContent::Button {
                    text: button.text.clone(),
                    use_list_item,
                },
            )
            .with_action(ItemAction::PressButton(id.clone())),
        ),
        ModuleBody::SimpleList(list) => {
            let children = list
                .items
                .iter()
                .map(|item| {
                    RenderItem::new(
                        ItemId::child(id, &item.id),
                        RenderContent::ListItem {
                            title: item.title.clone(),
                        },
                    )
                    .with_action(ItemAction::SelectListItem {
                        module: id.clone(),
                        item_id: item.id.clone(),
                    })
                })
                .collect();
            push_section(input, module, &list.title, children, items);
        }
        ModuleBody::SingleSelectionList(list) => {
            let selected = input
                .ui_state
                .selected_id(id)
                .or(list.initial_selection_id.as_deref());
            let children = list
                .items
                .iter()
                .map(|item| {
                    RenderItem::new(
                        ItemId::child(id, &item.id),
                        RenderContent::SingleSelectionItem {
                            title: item.title.clone(),
                            is_selected: selected == Some(item.id.as_str()),
                        },
                    )
                    .with_action(ItemAction::SelectSingle {
                        module: id.clone(),
                        item_id: item.id.clone(),
                    })
                })
                .collect();
            push_section(input, module, &list.title, children, items);
        }
        ModuleBody::MultipleSelectionList(list) => {
            let value = input.values.get(id).unwrap_or(&list.value.initial_value);
            let is_enabled = list.value.is_enabled;
            let children = list
                .items
                .iter()
                .map(|item| {
                    let row = RenderItem::new(
                        ItemId::child(id, &item.id),
                        RenderContent::MultipleSelectionItem {
                            title: item.title.clone(),
                            is_selected: value.is_selected(&item.id),
                            is_enabled,
                        },
                    );
                    if is_enabled {
                        row.with_action(ItemAction::ToggleMultiple {
                            module: id.clone(),
                            item_id: item.id.clone(),
                        })
                    } else {
                        row
                    }
                })
                .collect();
            push_section(input, module, &list.title, children, items);
        }
        ModuleBody::KeyValueList(list) => items.push(RenderItem::new(
            item_id,
            RenderContent::KeyValueList {
                title: list.title.clone(),
                pairs: list.pairs.clone(),
            },
        )),
        ModuleBody::KeylineOverlayToggle(keyline) => {
            let is_on = input.ui_state.toggle_value(id).unwrap_or(false);
            items.push(
                RenderItem::new(
                    item_id,
                    RenderContent::Toggle {
                        title: keyline.title.clone(),
                        is_on,
                        is_enabled: true,
                    },
                )
                .with_action(ItemAction::SetKeylineOverlay {
                    module: id.clone(),
                    enabled: !is_on,
                }),
            );
        }
        ModuleBody::AppInfoButton(button) => items.push(
            RenderItem::new(
                item_id,
                RenderContent::Button {
                    text: button.text.clone(),
                    use_list_item,
                },
            )
            .with_action(ItemAction::OpenAppInfo),
        ),
        ModuleBody::ScreenshotButton(button) => items.push(
            RenderItem::new(
                item_id,
                RenderContent::Button {
                    text: button.text.clone(),
                    use_list_item,
                },
            )
            .with_action(ItemAction::TakeScreenshot),
        ),
        ModuleBody::LogFeed(feed) => {
            let children = feeds::log_rows(input, id, feed);
            push_section(input, module, &feed.title, children, items);
        }
        ModuleBody::NetworkLogFeed(feed) => {
            let children = feeds::network_rows(input, id, feed);
            push_section(input, module, &feed.title, children, items);
        }
        ModuleBody::LifecycleLogFeed(feed) => {
            let children = feeds::lifecycle_rows(input, id, feed);
            push_section(input, module, &feed.title, children, items);
        }
        ModuleBody::Custom(custom) => items.extend(custom.render(id, input.values.get(id))),
    }
}

/// Emit a section header and, when expanded, its rows deduplicated by id.
fn push_section(
    input: &RebuildInput,
    module: &Module,
    title: &str,
    children: Vec<RenderItem>,
    items: &mut Vec<RenderItem>,
) {
    let id = module.id();
    let is_expanded = input
        .ui_state
        .is_expanded(id, module.initial_expansion().unwrap_or(false));

    items.push(
        RenderItem::new(
            ItemId::module(id),
            RenderContent::SectionHeader {
                title: title.to_string(),
                is_expanded,
                is_icon_visible: !children.is_empty(),
            },
        )
        .with_action(ItemAction::ToggleExpansion(id.clone())),
    );

    if is_expanded {
        let mut seen = HashSet::new();
        items.extend(
            children
                .into_iter()
                .filter(|child| seen.insert(child.id.clone())),
        );
    }
}
