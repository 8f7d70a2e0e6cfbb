//! Flat-file memory store — one JSON array, appended and rewritten in full.
//!
//! Entries are append-only: never mutated or deleted in normal operation.
//! Lookups are a linear scan filtered by user and sorted by recency; there
//! is no index, eviction, or partial-write protection. A crash mid-write
//! can corrupt the file and a corrupt file surfaces as `AppError::Memory`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One remembered interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryEntry {
    /// ISO-8601 UTC timestamp. String ordering matches time ordering.
    pub timestamp: String,
    pub user_id: String,
    /// Opaque session payload — the store never looks inside.
    pub payload: serde_json::Value,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl MemoryEntry {
    /// New entry stamped with the current UTC time.
    pub fn new(
        user_id: impl Into<String>,
        payload: serde_json::Value,
        metadata: BTreeMap<String, String>,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            user_id: user_id.into(),
            payload,
            metadata,
        }
    }
}

pub struct MemoryStore {
    path: PathBuf,
}

impl MemoryStore {
    /// A store backed by `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<MemoryEntry>, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data)
                .map_err(|e| AppError::Memory(format!("malformed {}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AppError::Memory(format!("cannot read {}: {e}", self.path.display()))),
        }
    }

    /// Append one entry: read the whole file, push, rewrite the whole file.
    pub fn append(&self, entry: MemoryEntry) -> Result<(), AppError> {
        let mut entries = self.read_all()?;
        entries.push(entry);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Memory(format!("cannot create {}: {e}", parent.display()))
            })?;
        }

        let data = serde_json::to_string_pretty(&entries)
            .map_err(|e| AppError::Memory(format!("serialise store: {e}")))?;
        fs::write(&self.path, data)
            .map_err(|e| AppError::Memory(format!("cannot write {}: {e}", self.path.display())))
    }

    /// The `count` most recent entries for `user_id`, newest first.
    ///
    /// Stable sort on the timestamp string — entries with equal timestamps
    /// keep their relative insertion order.
    pub fn get_recent(&self, count: usize, user_id: &str) -> Result<Vec<MemoryEntry>, AppError> {
        let mut entries: Vec<MemoryEntry> = self
            .read_all()?
            .into_iter()
            .filter(|e| e.user_id == user_id)
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(count);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store() -> (TempDir, MemoryStore) {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new(dir.path().join("memory.json"));
        (dir, store)
    }

    fn entry(ts: &str, user: &str, tag: &str) -> MemoryEntry {
        MemoryEntry {
            timestamp: ts.to_string(),
            user_id: user.to_string(),
            payload: json!({ "tag": tag }),
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn missing_file_is_empty_store() {
        let (_dir, store) = store();
        assert!(store.get_recent(10, "u1").unwrap().is_empty());
    }

    #[test]
    fn append_then_read_back() {
        let (_dir, store) = store();
        store.append(entry("2026-08-01T10:00:00Z", "u1", "a")).unwrap();
        store.append(entry("2026-08-01T11:00:00Z", "u1", "b")).unwrap();

        let recent = store.get_recent(10, "u1").unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].payload["tag"], "b");
        assert_eq!(recent[1].payload["tag"], "a");
    }

    #[test]
    fn get_recent_caps_count_and_filters_user() {
        let (_dir, store) = store();
        for i in 0..5 {
            store.append(entry(&format!("2026-08-01T10:0{i}:00Z"), "u1", "mine")).unwrap();
        }
        store.append(entry("2026-08-01T12:00:00Z", "u2", "theirs")).unwrap();

        let recent = store.get_recent(3, "u1").unwrap();
        assert_eq!(recent.len(), 3);
        assert!(recent.iter().all(|e| e.user_id == "u1"));
        // Newest of u1's entries, not u2's later one.
        assert_eq!(recent[0].timestamp, "2026-08-01T10:04:00Z");
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let (_dir, store) = store();
        store.append(entry("2026-08-01T10:00:00Z", "u1", "first")).unwrap();
        store.append(entry("2026-08-01T10:00:00Z", "u1", "second")).unwrap();
        store.append(entry("2026-08-01T09:00:00Z", "u1", "older")).unwrap();

        let recent = store.get_recent(10, "u1").unwrap();
        assert_eq!(recent[0].payload["tag"], "first");
        assert_eq!(recent[1].payload["tag"], "second");
        assert_eq!(recent[2].payload["tag"], "older");
    }

    #[test]
    fn corrupt_file_is_memory_error() {
        let (_dir, store) = store();
        std::fs::write(store.path(), "{ not json").unwrap();
        let err = store.get_recent(1, "u1").unwrap_err();
        assert!(err.to_string().contains("memory error"));
    }

    #[test]
    fn file_is_one_json_array() {
        let (_dir, store) = store();
        store.append(entry("2026-08-01T10:00:00Z", "u1", "a")).unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }

    #[test]
    fn new_entry_is_rfc3339_utc() {
        let e = MemoryEntry::new("u1", json!({}), BTreeMap::new());
        assert!(e.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&e.timestamp).is_ok());
    }
}
