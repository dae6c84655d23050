//! Plain-text rendering of an item list.
//!
//! One line per item (key/value lists and network headers take one line
//! per entry). Section rows are indented under their header.

use crate::model::{RenderContent, RenderItem};
use std::fmt::Write as _;

/// Timestamp format used in log rows.
const TIME_FORMAT: &str = "%H:%M:%S";

/// Render `items` as text, one line per row, with a trailing newline.
pub fn render_items(items: &[RenderItem]) -> String {
    let mut out = String::new();
    for item in items {
        render_item(&mut out, item);
    }
    out
}

fn render_item(out: &mut String, item: &RenderItem) {
    // `write!` into a String cannot fail.
    let _ = match &item.content {
        RenderContent::Header {
            title,
            subtitle,
            text,
        } => {
            let mut line = format!("# {title}");
            for extra in [subtitle, text].into_iter().flatten() {
                let _ = write!(line, " | {extra}");
            }
            writeln!(out, "{line}")
        }
        RenderContent::Text { text, is_title } => {
            if *is_title {
                writeln!(out, "## {text}")
            } else {
                writeln!(out, "{text}")
            }
        }
        RenderContent::LongText { text } => writeln!(out, "  {text}"),
        RenderContent::Toggle {
            title,
            is_on,
            is_enabled,
        } => {
            let mark = if *is_on { "x" } else { " " };
            let suffix = if *is_enabled { "" } else { " (disabled)" };
            writeln!(out, "[{mark}] {title}{suffix}")
        }
        RenderContent::Button {
            text,
            use_list_item,
        } => {
            if *use_list_item {
                writeln!(out, "> {text}")
            } else {
                writeln!(out, "<{text}>")
            }
        }
        RenderContent::KeyValueList { title, pairs } => {
            let _ = writeln!(out, "{title}");
            for (key, value) in pairs {
                let _ = writeln!(out, "  {key}: {value}");
            }
            Ok(())
        }
        RenderContent::SectionHeader {
            title,
            is_expanded,
            is_icon_visible,
        } => {
            let marker = match (is_icon_visible, is_expanded) {
                (false, _) => " ",
                (true, true) => "-",
                (true, false) => "+",
            };
            writeln!(out, "{marker} {title}")
        }
        RenderContent::ListItem { title } => writeln!(out, "  * {title}"),
        RenderContent::SingleSelectionItem { title, is_selected } => {
            let mark = if *is_selected { "o" } else { " " };
            writeln!(out, "  ({mark}) {title}")
        }
        RenderContent::MultipleSelectionItem {
            title,
            is_selected,
            is_enabled,
        } => {
            let mark = if *is_selected { "x" } else { " " };
            let suffix = if *is_enabled { "" } else { " (disabled)" };
            writeln!(out, "  [{mark}] {title}{suffix}")
        }
        RenderContent::LogItem {
            message,
            label,
            timestamp,
            ..
        } => {
            let _ = write!(out, "  ");
            if let Some(timestamp) = timestamp {
                let _ = write!(out, "{} ", timestamp.format(TIME_FORMAT));
            }
            if let Some(label) = label {
                let _ = write!(out, "[{label}] ");
            }
            writeln!(out, "{message}")
        }
        RenderContent::NetworkLogItem {
            url,
            method,
            is_outgoing,
            timestamp,
            duration_ms,
            headers,
        } => {
            let arrow = if *is_outgoing { "->" } else { "<-" };
            let _ = write!(out, "  {arrow} ");
            if let Some(timestamp) = timestamp {
                let _ = write!(out, "{} ", timestamp.format(TIME_FORMAT));
            }
            let _ = write!(out, "{method} {url}");
            if let Some(duration) = duration_ms {
                let _ = write!(out, " ({duration} ms)");
            }
            let _ = writeln!(out);
            for header in headers {
                let _ = writeln!(out, "     {header}");
            }
            Ok(())
        }
        RenderContent::LifecycleLogItem {
            class_name,
            event,
            timestamp,
        } => {
            let _ = write!(out, "  ");
            if let Some(timestamp) = timestamp {
                let _ = write!(out, "{} ", timestamp.format(TIME_FORMAT));
            }
            writeln!(out, "{class_name}: {event}")
        }
        RenderContent::ShowMore { remaining } => writeln!(out, "  ... {remaining} more"),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemId, RenderContent};

    fn item(content: RenderContent) -> RenderItem {
        RenderItem::new(ItemId::synthetic("x"), content)
    }

    #[test]
    fn empty_list_renders_nothing() {
        assert_eq!(render_items(&[]), "");
    }

    #[test]
    fn header_joins_optional_lines() {
        let text = render_items(&[item(RenderContent::Header {
            title: "App".to_string(),
            subtitle: None,
            text: Some("v1.0".to_string()),
        })]);

        assert_eq!(text, "# App | v1.0\n");
    }

    #[test]
    fn section_marker_reflects_expansion_and_icon() {
        let section = |is_expanded, is_icon_visible| {
            item(RenderContent::SectionHeader {
                title: "S".to_string(),
                is_expanded,
                is_icon_visible,
            })
        };

        let text = render_items(&[section(true, true), section(false, true), section(true, false)]);

        assert_eq!(text, "- S\n+ S\n  S\n");
    }

    #[test]
    fn network_rows_show_direction_and_duration() {
        let text = render_items(&[item(RenderContent::NetworkLogItem {
            url: "/users".to_string(),
            method: "GET".to_string(),
            is_outgoing: false,
            timestamp: None,
            duration_ms: Some(42),
            headers: vec!["Accept: */*".to_string()],
        })]);

        assert_eq!(text, "  <- GET /users (42 ms)\n     Accept: */*\n");
    }
}
