use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// Monotonic epoch counter for rebuild requests.
#[derive(Debug, Default, Clone)]
pub(crate) struct GenerationClock {
    latest: Arc<AtomicU64>,
}

impl GenerationClock {
    /// Creates a new clock. The first generation handed out is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock and returns the new generation.
    pub fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
    }

    /// Returns the most recently issued generation, 0 before the first.
    pub fn current(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Returns true when `generation` is the most recently issued one.
    pub fn is_latest(&self, generation: u64) -> bool {
        self.current() == generation
    }
}

/// Generation-scoped cancellation token for one rebuild task.
#[derive(Debug, Clone)]
pub(crate) struct GenerationToken {
    generation: u64,
    cancel: CancellationToken,
}

impl GenerationToken {
    /// Creates a token for `generation`.
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            cancel: CancellationToken::new(),
        }
    }

    /// Returns generation ID.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true when cancellation is requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Future resolving when cancellation is requested.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await;
    }
}
