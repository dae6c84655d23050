//! Rows of the log feed sections.

use super::RebuildInput;
use crate::model::{
    ItemAction, ItemId, LifecycleLogFeedModule, LogFeedModule, ModuleId, NetworkLogFeedModule,
    RenderContent, RenderItem,
};

/// Rows shown by a feed: the raised limit if show-more was used, otherwise
/// one page.
fn display_limit(input: &RebuildInput, id: &ModuleId, max_item_count: Option<usize>) -> usize {
    input
        .ui_state
        .display_limit(id)
        .unwrap_or_else(|| page_size(input, max_item_count))
}

/// Rows added by one show-more. Never zero, so paging always progresses.
pub(crate) fn page_size_for(max_item_count: Option<usize>, default: usize) -> usize {
    max_item_count.unwrap_or(default).max(1)
}

fn page_size(input: &RebuildInput, max_item_count: Option<usize>) -> usize {
    page_size_for(max_item_count, input.options.default_max_item_count)
}

fn show_more(id: &ModuleId, total: usize, limit: usize) -> Option<RenderItem> {
    (total > limit).then(|| {
        RenderItem::new(
            ItemId::child(id, "show_more"),
            RenderContent::ShowMore {
                remaining: total - limit,
            },
        )
        .with_action(ItemAction::ShowMore(id.clone()))
    })
}

pub(super) fn log_rows(input: &RebuildInput, id: &ModuleId, feed: &LogFeedModule) -> Vec<RenderItem> {
    let buffer = &input.buffers.logs;
    let label = feed.label.as_deref();
    let limit = display_limit(input, id, feed.max_item_count);

    let mut rows: Vec<RenderItem> = buffer
        .entries(label, limit)
        .into_iter()
        .map(|entry| {
            let has_payload = entry.payload.is_some();
            let row = RenderItem::new(
                ItemId::child(id, entry.id),
                RenderContent::LogItem {
                    message: entry.message,
                    label: entry.label,
                    timestamp: feed.should_show_timestamp.then_some(entry.timestamp),
                    has_payload,
                },
            );
            if has_payload {
                row.with_action(ItemAction::ShowLogPayload(entry.id))
            } else {
                row
            }
        })
        .collect();
    rows.extend(show_more(id, buffer.count(label), limit));
    rows
}

pub(super) fn network_rows(
    input: &RebuildInput,
    id: &ModuleId,
    feed: &NetworkLogFeedModule,
) -> Vec<RenderItem> {
    let buffer = &input.buffers.network;
    let limit = display_limit(input, id, feed.max_item_count);

    let mut rows: Vec<RenderItem> = buffer
        .entries(None, limit)
        .into_iter()
        .map(|entry| {
            let url = match feed.base_url.as_deref() {
                Some(base) => entry.url.strip_prefix(base).unwrap_or(entry.url.as_str()),
                None => entry.url.as_str(),
            }
            .to_string();
            RenderItem::new(
                ItemId::child(id, entry.id),
                RenderContent::NetworkLogItem {
                    url,
                    method: entry.method.clone(),
                    is_outgoing: entry.is_outgoing,
                    timestamp: feed.should_show_timestamp.then_some(entry.timestamp),
                    duration_ms: entry.duration_ms,
                    headers: if feed.should_show_headers {
                        entry.headers.clone()
                    } else {
                        Vec::new()
                    },
                },
            )
            .with_action(ItemAction::ShowNetworkEntry {
                module: id.clone(),
                entry: entry.id,
            })
        })
        .collect();
    rows.extend(show_more(id, buffer.len(), limit));
    rows
}

pub(super) fn lifecycle_rows(
    input: &RebuildInput,
    id: &ModuleId,
    feed: &LifecycleLogFeedModule,
) -> Vec<RenderItem> {
    let buffer = &input.buffers.lifecycle;
    let limit = display_limit(input, id, feed.max_item_count);

    let mut rows: Vec<RenderItem> = buffer
        .entries(None, limit)
        .into_iter()
        .map(|entry| {
            RenderItem::new(
                ItemId::child(id, entry.id),
                RenderContent::LifecycleLogItem {
                    class_name: entry.class_name,
                    event: entry.event.to_string(),
                    timestamp: feed.should_show_timestamp.then_some(entry.timestamp),
                },
            )
        })
        .collect();
    rows.extend(show_more(id, buffer.len(), limit));
    rows
}
