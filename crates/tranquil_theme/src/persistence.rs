//! Preference persistence
//!
//! The engine talks to storage through [`PreferenceStore`], a plain string
//! key-value contract. Structured values are stored as JSON; ids and modes
//! as bare strings.

use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage keys
pub mod keys {
    pub const THEME_ID: &str = "theme_id";
    pub const THEME_MODE: &str = "theme_mode";
    pub const VISUAL_MODE: &str = "visual_mode";
    pub const CUSTOM_THEMES: &str = "custom_themes";
    pub const ZEN_CONFIG: &str = "zenConfig";
    pub const PERFORMANCE_SETTINGS: &str = "performance_settings";
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid stored value: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Outcome of the persistence step of a mutation
pub type Persisted = Result<(), PersistError>;

/// Key-value storage for user preferences
pub trait PreferenceStore {
    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError>;

    /// `Ok(None)` when the key has never been saved
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;
}

/// Serialize `value` as JSON under `key`
pub fn save_json<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), PersistError>
where
    S: PreferenceStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.save(key, &json)
}

pub fn load_json<S, T>(store: &S, key: &str) -> Result<Option<T>, PersistError>
where
    S: PreferenceStore + ?Sized,
    T: DeserializeOwned,
{
    match store.load(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// In-process store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }
}

/// Store backed by a single JSON object file, written through on every save
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    cache: serde_json::Map<String, serde_json::Value>,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref().to_path_buf();
        let cache = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                serde_json::Map::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            serde_json::Map::new()
        };
        tracing::debug!(path = %path.display(), entries = cache.len(), "opened preference file");
        Ok(Self { path, cache })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.cache)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.cache
            .insert(key.to_string(), serde_json::Value::String(value.to_string()));
        self.flush()
    }

    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        match self.cache.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(PersistError::Backend(format!(
                "expected a string for '{key}', found {other}"
            ))),
        }
    }
}
