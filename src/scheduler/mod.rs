//! Cancel-and-restart rebuild scheduling.
//!
//! Every rebuild request takes a new generation from a [`GenerationClock`],
//! cancels the in-flight task and spawns a fresh one. There is no queue: a
//! burst of requests runs at most one pipeline to completion, and a task
//! only publishes when its generation is still the latest one. Publication
//! replaces the whole list and notifies every observer with the same
//! `Arc<[RenderItem]>` snapshot.

mod runtime;
mod token;

pub(crate) use runtime::RuntimeHandle;

use crate::model::RenderItem;
use crate::pipeline::{self, RebuildInput};
use crate::surface::{ItemsObserver, ObserverId, ObserverSet};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use token::{GenerationClock, GenerationToken};
use tokio::sync::watch;
use tracing::{debug, trace};

/// Latest published list and the observers that receive it.
#[derive(Debug, Default)]
struct Publication {
    generation: u64,
    items: Option<Arc<[RenderItem]>>,
    observers: ObserverSet,
}

/// State shared between the scheduler and its rebuild tasks.
#[derive(Debug)]
struct Shared {
    clock: GenerationClock,
    publication: Mutex<Publication>,
    published_tx: watch::Sender<u64>,
}

impl Shared {
    /// Generations only advance under the publication lock, so the checks
    /// below cannot race a newer request.
    fn publish(&self, generation: u64, items: Vec<RenderItem>) {
        let mut publication = self.publication.lock();
        if !self.clock.is_latest(generation) {
            debug!(generation, latest = self.clock.current(), "Discarding stale rebuild");
            return;
        }
        if generation <= publication.generation {
            debug!(generation, published = publication.generation, "Discarding stale rebuild");
            return;
        }

        let items: Arc<[RenderItem]> = items.into();
        publication.generation = generation;
        publication.items = Some(Arc::clone(&items));
        publication.observers.notify(&items);
        drop(publication);

        debug!(generation, items = items.len(), "Published rebuild");
        self.published_tx.send_replace(generation);
    }
}

/// Single-slot rebuild scheduler.
#[derive(Debug)]
pub(crate) struct RebuildScheduler {
    runtime: RuntimeHandle,
    in_flight: Option<GenerationToken>,
    shared: Arc<Shared>,
    published_rx: watch::Receiver<u64>,
}

impl RebuildScheduler {
    pub fn new(runtime: RuntimeHandle) -> Self {
        let (published_tx, published_rx) = watch::channel(0);
        Self {
            runtime,
            in_flight: None,
            shared: Arc::new(Shared {
                clock: GenerationClock::new(),
                publication: Mutex::new(Publication::default()),
                published_tx,
            }),
            published_rx,
        }
    }

    /// Cancel the in-flight rebuild and start one for `input`.
    ///
    /// Returns the new generation.
    pub fn request(&mut self, input: RebuildInput) -> u64 {
        let generation = {
            let _publication = self.shared.publication.lock();
            self.shared.clock.next()
        };
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_cancelled() {
                trace!(cancelled = previous.generation(), generation, "Cancelling in-flight rebuild");
            }
            previous.cancel();
        }

        let token = GenerationToken::new(generation);
        self.in_flight = Some(token.clone());
        let shared = Arc::clone(&self.shared);

        trace!(generation, modules = input.modules.len(), "Spawning rebuild");
        self.runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(generation, "Rebuild cancelled before completion");
                }
                items = compute(input) => shared.publish(generation, items),
            }
        });
        generation
    }

    /// Most recently requested generation.
    pub fn latest(&self) -> u64 {
        self.shared.clock.current()
    }

    /// Most recently published generation.
    pub fn published(&self) -> u64 {
        *self.published_rx.borrow()
    }

    /// Most recently published list.
    pub fn items(&self) -> Option<Arc<[RenderItem]>> {
        self.shared.publication.lock().items.clone()
    }

    /// Register an observer. It immediately receives the latest list when
    /// one was already published.
    pub fn subscribe(&self, observer: Arc<dyn ItemsObserver>) -> ObserverId {
        let mut publication = self.shared.publication.lock();
        if let Some(items) = &publication.items {
            observer.on_items_changed(items);
        }
        publication.observers.insert(observer)
    }

    /// Remove an observer. Returns false when it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.shared.publication.lock().observers.remove(id)
    }

    /// Resolves once the generation that was latest at call time, or a
    /// newer one, has been published.
    pub fn settled(&self) -> impl Future<Output = ()> + Send + 'static {
        let target = self.latest();
        let mut published = self.published_rx.clone();
        async move {
            // Only fails when the scheduler was dropped.
            let _ = published.wait_for(|generation| *generation >= target).await;
        }
    }
}

impl Drop for RebuildScheduler {
    fn drop(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
    }
}

async fn compute(input: RebuildInput) -> Vec<RenderItem> {
    // Give a cancellation issued right after the spawn a chance to win.
    tokio::task::yield_now().await;
    pipeline::build(&input)
}
