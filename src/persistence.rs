//! Key-value storage for persisted module values.
//!
//! Value-wrapper modules with `is_value_persisted` set store their
//! committed value under their module id. Storage is a collaborator: the
//! engine only relies on the [`PersistenceStore`] load/save contract.

use crate::model::{ModuleId, ModuleValue};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised by persistence stores.
///
/// Delegates recover from these by falling back to the module's initial
/// value; they never reach the host.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing file failed.
    #[error("Failed to access value store at {path:?}: {source}")]
    Io {
        /// The backing file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backing file does not hold a valid value map.
    #[error("Corrupt value store at {path:?}: {source}")]
    Corrupt {
        /// The backing file.
        path: PathBuf,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The value map could not be encoded.
    #[error("Failed to encode values: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Load/save contract for persisted values.
pub trait PersistenceStore: Send + Sync + std::fmt::Debug {
    /// Load the value stored under `key`. `Ok(None)` when nothing was stored.
    fn load(&self, key: &ModuleId) -> Result<Option<ModuleValue>, PersistenceError>;

    /// Store `value` under `key`.
    fn save(&self, key: &ModuleId, value: &ModuleValue) -> Result<(), PersistenceError>;
}

/// Process-local store. Values are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<ModuleId, ModuleValue>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceStore for MemoryStore {
    fn load(&self, key: &ModuleId) -> Result<Option<ModuleValue>, PersistenceError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn save(&self, key: &ModuleId, value: &ModuleValue) -> Result<(), PersistenceError> {
        self.values.lock().insert(key.clone(), value.clone());
        Ok(())
    }
}

/// Store backed by a single JSON object file mapping module ids to values.
///
/// The file is read lazily on first access and rewritten on every save.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    cache: Mutex<Option<BTreeMap<ModuleId, ModuleValue>>>,
}

impl JsonFileStore {
    /// Create a store backed by `path`. Nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    /// Default location: `$XDG_DATA_HOME/panelkit/values.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("panelkit").join("values.json"))
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<BTreeMap<ModuleId, ModuleValue>, PersistenceError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "Value store missing, starting empty");
                return Ok(BTreeMap::new());
            }
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| PersistenceError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_file(&self, values: &BTreeMap<ModuleId, ModuleValue>) -> Result<(), PersistenceError> {
        let io_error = |source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(values).map_err(PersistenceError::Serialize)?;
        std::fs::write(&self.path, json).map_err(io_error)
    }
}

impl PersistenceStore for JsonFileStore {
    fn load(&self, key: &ModuleId) -> Result<Option<ModuleValue>, PersistenceError> {
        let mut cache = self.cache.lock();
        if cache.is_none() {
            *cache = Some(self.read_file()?);
        }
        Ok(cache.as_ref().and_then(|values| values.get(key).cloned()))
    }

    fn save(&self, key: &ModuleId, value: &ModuleValue) -> Result<(), PersistenceError> {
        let mut cache = self.cache.lock();
        let values = match cache.take() {
            Some(values) => values,
            None => self.read_file()?,
        };
        let values = cache.insert(values);
        values.insert(key.clone(), value.clone());
        self.write_file(values)
    }
}
