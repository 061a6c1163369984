//! Persistent client-side flags.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const IS_LOGIN: &str = "isLogin";
pub const REMEMBER_ME: &str = "rememberMe";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub trait ClientStorage: Send + Sync {
    fn set_flag(&self, key: &str, value: bool) -> Result<(), StorageError>;

    /// Missing keys read as `false`.
    fn flag(&self, key: &str) -> Result<bool, StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    flags: Mutex<BTreeMap<String, bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStorage for MemoryStorage {
    fn set_flag(&self, key: &str, value: bool) -> Result<(), StorageError> {
        let mut flags = self.flags.lock().unwrap_or_else(|e| e.into_inner());
        flags.insert(key.to_string(), value);
        Ok(())
    }

    fn flag(&self, key: &str) -> Result<bool, StorageError> {
        let flags = self.flags.lock().unwrap_or_else(|e| e.into_inner());
        Ok(flags.get(key).copied().unwrap_or(false))
    }
}

/// Flags stored as a JSON object in a single file.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, bool>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ClientStorage for JsonFileStorage {
    fn set_flag(&self, key: &str, value: bool) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut flags = self.load()?;
        flags.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(&flags)?)?;
        Ok(())
    }

    fn flag(&self, key: &str) -> Result<bool, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.load()?.get(key).copied().unwrap_or(false))
    }
}
