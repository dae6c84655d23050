use crate::model::EngineError;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::debug;

/// Where rebuild tasks run.
#[derive(Debug)]
pub(crate) enum RuntimeHandle {
    /// A runtime owned by the host.
    Borrowed(Handle),
    /// A runtime the engine started because none was available. Always
    /// `Some` until dropped.
    Owned(Option<Runtime>),
}

impl RuntimeHandle {
    /// Resolve the rebuild runtime: the explicit handle, then the ambient
    /// runtime, then a dedicated single-worker runtime.
    pub fn resolve(explicit: Option<Handle>) -> Result<Self, EngineError> {
        if let Some(handle) = explicit {
            return Ok(Self::Borrowed(handle));
        }

        if let Ok(handle) = Handle::try_current() {
            return Ok(Self::Borrowed(handle));
        }

        debug!("No ambient tokio runtime, starting a dedicated rebuild runtime");
        let runtime = Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .thread_name("panelkit-rebuild")
            .build()
            .map_err(EngineError::Runtime)?;
        Ok(Self::Owned(Some(runtime)))
    }

    /// Spawn a rebuild task.
    pub fn spawn<F>(&self, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        match self {
            Self::Borrowed(handle) => {
                handle.spawn(future);
            }
            Self::Owned(Some(runtime)) => {
                runtime.spawn(future);
            }
            Self::Owned(None) => {}
        }
    }
}

impl Drop for RuntimeHandle {
    fn drop(&mut self) {
        // Dropping a runtime blocks, which panics inside another runtime.
        if let Self::Owned(runtime) = self {
            if let Some(runtime) = runtime.take() {
                runtime.shutdown_background();
            }
        }
    }
}
