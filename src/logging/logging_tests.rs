//! Tests for logging initialization and the log feed layer.

use super::*;
use serial_test::serial;
use std::fs;
use std::sync::mpsc;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[test]
#[serial(tracing_init)]
fn init_creates_log_directory_if_missing() {
    let test_dir = std::env::temp_dir().join("panelkit_test_logs_create");
    let log_file = test_dir.join("test.log");

    // Ensure directory doesn't exist
    let _ = fs::remove_dir_all(&test_dir);

    // Initialize logging (may fail if subscriber already set, which is fine)
    let _ = init(&log_file);

    // Directory should exist (created even if subscriber init failed)
    assert!(
        test_dir.exists(),
        "Log directory should be created: {:?}",
        test_dir
    );

    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
#[serial(tracing_init)]
fn init_succeeds_when_directory_already_exists() {
    let test_dir = std::env::temp_dir().join("panelkit_test_logs_exists");
    let log_file = test_dir.join("test.log");
    let _ = fs::create_dir_all(&test_dir);

    let _ = init(&log_file);

    assert!(
        test_dir.exists(),
        "Log directory should exist: {:?}",
        test_dir
    );

    let _ = fs::remove_dir_all(&test_dir);
}

#[test]
fn init_rejects_path_without_file_name() {
    let result = init(Path::new("/"));

    assert!(
        matches!(
            result,
            Err(LoggingError::InvalidPath(_)) | Err(LoggingError::DirectoryCreation { .. })
        ),
        "Root path has no file name, got {:?}",
        result
    );
}

#[test]
fn on_event_sends_info_level_entry() {
    // GIVEN a layer with a channel receiver
    let (tx, rx) = mpsc::channel();
    let subscriber = tracing_subscriber::registry().with(LogFeedLayer::new(tx));

    // WHEN a tracing INFO event is emitted
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("test info message");
    });

    // THEN an event with INFO level and the message is received
    let event = rx.try_recv().expect("should receive event from channel");
    assert_eq!(event.level, Level::INFO);
    assert_eq!(event.message, "test info message");
    assert_eq!(event.label(), "info");
}

#[test]
fn on_event_handles_dropped_receiver_gracefully() {
    // GIVEN a layer whose receiver is dropped
    let (tx, rx) = mpsc::channel();
    drop(rx);
    let subscriber = tracing_subscriber::registry().with(LogFeedLayer::new(tx));

    // WHEN a tracing event is emitted
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("this should not panic");
    });

    // THEN no panic occurs
}

#[test]
fn on_event_captures_timestamp() {
    let (tx, rx) = mpsc::channel();
    let subscriber = tracing_subscriber::registry().with(LogFeedLayer::new(tx));

    let before = chrono::Utc::now();
    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!("timestamped message");
    });
    let after = chrono::Utc::now();

    let event = rx.try_recv().expect("should receive event");
    assert!(event.timestamp >= before);
    assert!(event.timestamp <= after);
}

#[test]
fn on_event_handles_formatted_messages() {
    let (tx, rx) = mpsc::channel();
    let subscriber = tracing_subscriber::registry().with(LogFeedLayer::new(tx));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("value: {}, count: {}", 42, 7);
    });

    let event = rx.try_recv().expect("should receive event");
    assert_eq!(event.message, "value: 42, count: 7");
}

#[test]
fn on_event_appends_structured_fields() {
    let (tx, rx) = mpsc::channel();
    let subscriber = tracing_subscriber::registry().with(LogFeedLayer::new(tx));

    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!(module = "colors", generation = 3, "Rebuild done");
    });

    let event = rx.try_recv().expect("should receive event");
    assert_eq!(event.message, "Rebuild done module=colors generation=3");
    assert_eq!(event.level, Level::DEBUG);
}

#[test]
fn multiple_events_send_multiple_entries() {
    let (tx, rx) = mpsc::channel();
    let subscriber = tracing_subscriber::registry().with(LogFeedLayer::new(tx));

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("first");
        tracing::warn!("second");
        tracing::error!("third");
    });

    let received: Vec<_> = rx.try_iter().map(|e| (e.level, e.message)).collect();
    assert_eq!(
        received,
        vec![
            (Level::INFO, "first".to_string()),
            (Level::WARN, "second".to_string()),
            (Level::ERROR, "third".to_string()),
        ]
    );
}
