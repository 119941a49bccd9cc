//! Key-value storage and the response slot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{DateAskError, DateAskResult};
use crate::record::ResponseRecord;

/// Name of the slot the response lives in.
pub const RESPONSE_KEY: &str = "date-ask-response";

/// String slots addressed by key, in the manner of browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> DateAskResult<Option<String>>;

    /// Replace whatever the slot held.
    fn set(&self, key: &str, value: &str) -> DateAskResult<()>;
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> DateAskResult<Option<String>> {
        let path = self.path_for(key);

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DateAskError::Storage(format!(
                "Could not read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> DateAskResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

/// In-process store, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.lock().insert(key.to_string(), value.to_string());
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DateAskResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DateAskResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> DateAskResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> DateAskResult<()> {
        (**self).set(key, value)
    }
}

/// Typed access to the single response slot.
pub struct ResponseSlot {
    store: Box<dyn KeyValueStore>,
}

impl ResponseSlot {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        ResponseSlot {
            store: Box::new(store),
        }
    }

    /// `Ok(None)` when nothing was ever written.
    pub fn read(&self) -> DateAskResult<Option<ResponseRecord>> {
        self.store
            .get(RESPONSE_KEY)?
            .map(|json| ResponseRecord::from_json(&json))
            .transpose()
    }

    pub fn write(&self, record: &ResponseRecord) -> DateAskResult<()> {
        self.store.set(RESPONSE_KEY, &record.to_json()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::Arc;

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get(RESPONSE_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        assert!(!dir.path().join("k.json.tmp").exists());
    }

    #[test]
    fn slot_reads_back_what_it_wrote() {
        let dir = tempfile::tempdir().unwrap();
        let slot = ResponseSlot::new(FileStore::new(dir.path()));

        let mut record =
            ResponseRecord::accepted_at(Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap());
        record.chosen_date = NaiveDate::from_ymd_opt(2024, 6, 15);
        slot.write(&record).unwrap();

        assert_eq!(slot.read().unwrap(), Some(record));
    }

    #[test]
    fn slot_surfaces_corrupt_content() {
        let slot = ResponseSlot::new(MemoryStore::with(RESPONSE_KEY, "}{"));
        assert!(slot.read().is_err());
    }

    #[test]
    fn shared_memory_store() {
        let store = Arc::new(MemoryStore::new());
        let slot = ResponseSlot::new(store.clone());

        slot.write(&ResponseRecord::accepted_at(Utc::now())).unwrap();

        assert!(store.get(RESPONSE_KEY).unwrap().is_some());
    }
}
