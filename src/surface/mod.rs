//! Render surfaces observing the published item list.
//!
//! The engine renders nothing itself. Surfaces subscribe an
//! [`ItemsObserver`] and receive every published list; [`text`] renders a
//! list as plain text for terminals, logs and snapshot tests.

pub mod text;

use crate::model::RenderItem;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Receives every published item list.
///
/// Called on the rebuild runtime while the engine's publication lock is
/// held: implementations must return quickly and must not call back into
/// the engine.
pub trait ItemsObserver: Send + Sync {
    /// Called with the complete new list.
    fn on_items_changed(&self, items: &[RenderItem]);
}

impl<F> ItemsObserver for F
where
    F: Fn(&[RenderItem]) + Send + Sync,
{
    fn on_items_changed(&self, items: &[RenderItem]) {
        self(items)
    }
}

/// Handle returned by [`Engine::subscribe`](crate::Engine::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Registered observers, in subscription order.
#[derive(Default)]
pub(crate) struct ObserverSet {
    next_id: u64,
    observers: Vec<(ObserverId, Arc<dyn ItemsObserver>)>,
}

impl ObserverSet {
    pub fn insert(&mut self, observer: Arc<dyn ItemsObserver>) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.observers.push((id, observer));
        id
    }

    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn notify(&self, items: &[RenderItem]) {
        for (_, observer) in &self.observers {
            observer.on_items_changed(items);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }
}

impl fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverSet")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Observer that keeps every list it receives.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    snapshots: Mutex<Vec<Vec<RenderItem>>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every list received so far, oldest first.
    pub fn snapshots(&self) -> Vec<Vec<RenderItem>> {
        self.snapshots.lock().clone()
    }

    /// The most recent list.
    pub fn last(&self) -> Option<Vec<RenderItem>> {
        self.snapshots.lock().last().cloned()
    }

    /// Number of lists received.
    pub fn count(&self) -> usize {
        self.snapshots.lock().len()
    }
}

impl ItemsObserver for RecordingObserver {
    fn on_items_changed(&self, items: &[RenderItem]) {
        self.snapshots.lock().push(items.to_vec());
    }
}
