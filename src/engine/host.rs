//! Host capabilities invoked by built-in modules.

use crate::model::{KeylineOverlayToggleModule, LogEntry, NetworkLogEntry};
use std::fmt;
use tracing::debug;

/// Actions only the host can perform.
///
/// Every method has a default that logs and does nothing, so hosts only
/// implement what their platform supports.
pub trait HostActions: Send + Sync + fmt::Debug {
    /// Open the host application's system settings page.
    fn open_app_info(&self) {
        debug!("open_app_info requested, host does not support it");
    }

    /// Capture and share a screenshot.
    fn take_screenshot(&self) {
        debug!("take_screenshot requested, host does not support it");
    }

    /// Show (`Some`) or hide (`None`) the keyline overlay.
    fn set_keyline_overlay(&self, overlay: Option<&KeylineOverlayToggleModule>) {
        debug!(enabled = overlay.is_some(), "set_keyline_overlay requested, host does not support it");
    }

    /// Show the payload of a log entry.
    fn show_log_payload(&self, entry: &LogEntry) {
        debug!(entry = %entry.id, "show_log_payload requested, host does not support it");
    }

    /// Show the detail of a network entry.
    fn show_network_entry(&self, entry: &NetworkLogEntry, show_headers: bool) {
        debug!(entry = %entry.id, show_headers, "show_network_entry requested, host does not support it");
    }
}

/// Host without any capabilities.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHostActions;

impl HostActions for NoopHostActions {}
