//! Tracing subscriber initialization and the log feed layer.
//!
//! [`init`] writes the host's logs to a file. [`LogFeedLayer`] mirrors
//! tracing events into a channel that
//! [`Engine::drain_log_channel`](crate::Engine::drain_log_channel) turns
//! into log feed entries.

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log path has no parent directory
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Respects RUST_LOG environment variable, defaults to "info" level.
/// Creates the log directory if it doesn't exist.
///
/// # Errors
///
/// Returns an error if the subscriber was already initialized or directory
/// creation failed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    init_with_feed(log_path, None)
}

/// Like [`init`], additionally mirroring every event into `feed`.
///
/// # Errors
///
/// Same as [`init`].
pub fn init_with_feed(
    log_path: &Path,
    feed: Option<mpsc::Sender<TracedEvent>>,
) -> Result<(), LoggingError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    // Create log directory if it doesn't exist
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| LoggingError::DirectoryCreation {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    // Respect RUST_LOG, default to "info"
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false); // No ANSI colors in log files

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(feed.map(LogFeedLayer::new))
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

/// A tracing event captured for the log feed.
#[derive(Debug, Clone)]
pub struct TracedEvent {
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
    /// Severity of the event.
    pub level: Level,
    /// Module path that emitted the event.
    pub target: String,
    /// The formatted message.
    pub message: String,
}

impl TracedEvent {
    /// Label used for the feed entry: the lowercase level name.
    pub fn label(&self) -> String {
        self.level.to_string().to_ascii_lowercase()
    }
}

/// Layer forwarding every event into a channel.
///
/// A dropped receiver silently disables forwarding.
#[derive(Debug, Clone)]
pub struct LogFeedLayer {
    sender: mpsc::Sender<TracedEvent>,
}

impl LogFeedLayer {
    /// Create a layer sending into `sender`.
    pub fn new(sender: mpsc::Sender<TracedEvent>) -> Self {
        Self { sender }
    }
}

impl<S: Subscriber> Layer<S> for LogFeedLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let traced = TracedEvent {
            timestamp: Utc::now(),
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.finish(),
        };
        // Receiver gone: nothing left to feed.
        let _ = self.sender.send(traced);
    }
}

/// Collects the `message` field and appends other fields as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            return self.message;
        }
        let fields = self.fields.join(" ");
        if self.message.is_empty() {
            fields
        } else {
            format!("{} {}", self.message, fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}
