pub mod records;

pub use records::{
    clear_identity, clear_language, clear_progress, load_identity, load_language, load_progress,
    save_identity, save_language, save_progress, IdentityRecord, LanguageRecord, ProgressRecord,
    RECORD_VERSION,
};

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Byte-level key-value persistence, injected wherever saved state is needed
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Get the platform-appropriate data directory for archetype-quiz
pub fn get_data_path() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("archetype-quiz"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.local/share/archetype-quiz",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Disk-persistent store backed by a cacache directory
#[derive(Debug, Clone)]
pub struct CacheStore {
    cache_path: PathBuf,
}

impl CacheStore {
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: cache_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.cache_path
    }
}

impl KeyValueStore for CacheStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match cacache::read_sync(&self.cache_path, key) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(cacache::Error::EntryNotFound(..)) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read cache entry {}", key)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        cacache::write_sync(&self.cache_path, key, value)
            .with_context(|| format!("Failed to write cache entry {}", key))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        cacache::remove_sync(&self.cache_path, key)
            .with_context(|| format!("Failed to remove cache entry {}", key))
    }
}

/// In-memory store, used for `--ephemeral` runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}
