use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::KeyValueStore;
use crate::intake::Identity;
use crate::quiz::{Language, ResponseSet};

pub const RECORD_VERSION: u32 = 1;

const PROGRESS_KEY: &str = "quiz:progress";
const IDENTITY_KEY: &str = "quiz:identity";
const LANGUAGE_KEY: &str = "quiz:language";

/// Where the user stopped, so an interrupted quiz can be resumed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub version: u32,
    pub current_question: usize,
    pub responses: ResponseSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn new(current_question: usize, responses: ResponseSet, session_id: Option<String>) -> Self {
        Self {
            version: RECORD_VERSION,
            current_question,
            responses,
            session_id,
            saved_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub version: u32,
    pub identity: Identity,
    /// Id the service assigned when the identity was registered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl IdentityRecord {
    pub fn new(identity: Identity, submission_id: Option<String>) -> Self {
        Self {
            version: RECORD_VERSION,
            identity,
            submission_id,
            saved_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRecord {
    pub version: u32,
    pub language: Language,
}

/// Anything that fails to load is "no saved state"; the reason only goes to the debug log.
fn read_record<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    version_of: impl Fn(&T) -> u32,
) -> Option<T> {
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            tracing::debug!(key, error = %e, "ignoring unreadable record");
            return None;
        }
    };

    let record: T = match serde_json::from_slice(&bytes) {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(key, error = %e, "ignoring malformed record");
            return None;
        }
    };

    let version = version_of(&record);
    if version != RECORD_VERSION {
        tracing::debug!(key, version, "ignoring record with unsupported version");
        return None;
    }

    Some(record)
}

fn write_record<T: Serialize>(store: &dyn KeyValueStore, key: &str, record: &T) -> Result<()> {
    let json = serde_json::to_vec(record).with_context(|| format!("Failed to serialize {}", key))?;
    store.set(key, &json)
}

pub fn load_progress(store: &dyn KeyValueStore) -> Option<ProgressRecord> {
    read_record(store, PROGRESS_KEY, |r: &ProgressRecord| r.version)
}

pub fn save_progress(store: &dyn KeyValueStore, record: &ProgressRecord) -> Result<()> {
    write_record(store, PROGRESS_KEY, record)
}

pub fn clear_progress(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(PROGRESS_KEY)
}

pub fn load_identity(store: &dyn KeyValueStore) -> Option<IdentityRecord> {
    read_record(store, IDENTITY_KEY, |r: &IdentityRecord| r.version)
}

pub fn save_identity(store: &dyn KeyValueStore, record: &IdentityRecord) -> Result<()> {
    write_record(store, IDENTITY_KEY, record)
}

pub fn clear_identity(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(IDENTITY_KEY)
}

pub fn load_language(store: &dyn KeyValueStore) -> Option<Language> {
    read_record(store, LANGUAGE_KEY, |r: &LanguageRecord| r.version).map(|r| r.language)
}

pub fn save_language(store: &dyn KeyValueStore, language: Language) -> Result<()> {
    let record = LanguageRecord {
        version: RECORD_VERSION,
        language,
    };
    write_record(store, LANGUAGE_KEY, &record)
}

pub fn clear_language(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(LANGUAGE_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Likert;
    use crate::storage::{CacheStore, MemoryStore};

    fn identity() -> Identity {
        Identity {
            first_name: "Sara".into(),
            last_name: "Ahmadi".into(),
            mobile_number: "09121234567".into(),
            country: "Iran".into(),
            city: "Tehran".into(),
        }
    }

    fn some_responses() -> ResponseSet {
        [(1, Likert::new(5).unwrap()), (11, Likert::new(2).unwrap())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_missing_records_are_absent() {
        let store = MemoryStore::new();
        assert!(load_progress(&store).is_none());
        assert!(load_identity(&store).is_none());
        assert!(load_language(&store).is_none());
    }

    #[test]
    fn test_progress_save_load_clear() {
        let store = MemoryStore::new();
        let record = ProgressRecord::new(2, some_responses(), Some("abc".into()));
        save_progress(&store, &record).unwrap();

        let loaded = load_progress(&store).unwrap();
        assert_eq!(loaded, record);

        clear_progress(&store).unwrap();
        assert!(load_progress(&store).is_none());
    }

    #[test]
    fn test_progress_json_shape() {
        let store = MemoryStore::new();
        save_progress(&store, &ProgressRecord::new(2, some_responses(), None)).unwrap();
        let bytes = store.get("quiz:progress").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["current_question"], 2);
        assert_eq!(json["responses"]["1"], 5);
        assert!(json.get("session_id").is_none());
    }

    #[test]
    fn test_garbage_is_absent() {
        let store = MemoryStore::new();
        store.set("quiz:progress", b"not json {").unwrap();
        store.set("quiz:identity", b"[]").unwrap();
        assert!(load_progress(&store).is_none());
        assert!(load_identity(&store).is_none());
    }

    #[test]
    fn test_out_of_range_likert_is_absent() {
        let store = MemoryStore::new();
        let json = r#"{"version":1,"current_question":0,"responses":{"1":9},"saved_at":"2026-01-01T00:00:00Z"}"#;
        store.set("quiz:progress", json.as_bytes()).unwrap();
        assert!(load_progress(&store).is_none());
    }

    #[test]
    fn test_wrong_version_is_absent() {
        let store = MemoryStore::new();
        let json = r#"{"version":2,"current_question":0,"responses":{},"saved_at":"2026-01-01T00:00:00Z"}"#;
        store.set("quiz:progress", json.as_bytes()).unwrap();
        assert!(load_progress(&store).is_none());

        store.set("quiz:language", br#"{"version":0,"language":"en"}"#).unwrap();
        assert!(load_language(&store).is_none());
    }

    #[test]
    fn test_identity_and_language_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::new(dir.path());

        save_identity(&store, &IdentityRecord::new(identity(), Some("u-1".into()))).unwrap();
        save_language(&store, Language::En).unwrap();

        let loaded = load_identity(&store).unwrap();
        assert_eq!(loaded.identity, identity());
        assert_eq!(loaded.submission_id.as_deref(), Some("u-1"));
        assert_eq!(load_language(&store), Some(Language::En));

        clear_identity(&store).unwrap();
        assert!(load_identity(&store).is_none());
    }

    #[test]
    fn test_records_are_independent() {
        let store = MemoryStore::new();
        save_identity(&store, &IdentityRecord::new(identity(), None)).unwrap();
        save_progress(&store, &ProgressRecord::new(0, ResponseSet::new(), None)).unwrap();
        clear_progress(&store).unwrap();
        assert!(load_identity(&store).is_some());
    }
}
