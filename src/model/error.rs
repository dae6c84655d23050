//! Error types for the panel engine.
//!
//! Only two situations are reported to the host as errors: a configuration
//! mistake (asking a built-in module kind for its own delegate) and the
//! failure to obtain a tokio runtime for rebuilds. Everything else the
//! engine encounters is a normal condition and degrades silently.
//!
//! # Error Hierarchy
//!
//! - [`EngineError`] - Errors returned from engine construction and delegate registration
//!   - [`ConfigurationError`] - Host programming mistakes detected at registration time
//!   - `std::io::Error` - Failure to build an owned rebuild runtime
//!
//! # Recovery Strategy
//!
//! Persistence failures ([`PersistenceError`](crate::persistence::PersistenceError))
//! are recovered inside the delegate that hit them: the module falls back to
//! its initial value and a warning is traced. Missing delegates, unknown
//! module ids and missing positioning references are no-ops, not errors.

use super::identifiers::ModuleId;
use super::module::ModuleKind;
use thiserror::Error;

/// Top-level error returned by the engine's fallible operations.
///
/// # Examples
///
/// ```
/// use panelkit::model::error::{ConfigurationError, EngineError};
/// use panelkit::model::{ModuleId, ModuleKind};
///
/// let err = EngineError::from(ConfigurationError::BuiltInDelegate {
///     module: ModuleId::from("colors"),
///     kind: ModuleKind::MultipleSelectionList,
/// });
/// assert!(err.to_string().contains("colors"));
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The host configured the engine incorrectly.
    ///
    /// **When this occurs**: When [`Engine::register_module_delegate`](crate::Engine::register_module_delegate)
    /// is called with a built-in module.
    ///
    /// **Recovery**: None. This is a programming error in the host; it
    /// should be surfaced during development.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// No tokio runtime was supplied, none was ambient, and building an
    /// engine-owned one failed.
    ///
    /// **When this occurs**: At [`EngineBuilder::build`](crate::EngineBuilder::build)
    /// outside of any runtime context, when the OS refuses to spawn the
    /// rebuild worker thread.
    #[error("Failed to start rebuild runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Host programming mistakes detected by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A built-in module kind was asked to create its own delegate.
    ///
    /// Built-in value-wrapper kinds share delegates that the engine
    /// registers itself. Only custom kinds supply a delegate through
    /// [`CustomModule::create_module_delegate`](crate::model::CustomModule::create_module_delegate).
    #[error("Module '{module}' is a built-in {kind} module and has no delegate of its own")]
    BuiltInDelegate {
        /// Id of the offending module.
        module: ModuleId,
        /// Its built-in kind.
        kind: ModuleKind,
    },
}
