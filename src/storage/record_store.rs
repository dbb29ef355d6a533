use super::{KeyValueStore, Result};
use crate::core::errors::WorklogError;
use crate::domain::{DailyRecord, Identifiable};

/// Key under which the record collection is stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "daily_records";

/// The record collection persisted as one JSON array under a single key.
///
/// Every mutation reads the current collection, edits it in memory and rewrites
/// the whole array. Newest additions are kept at the front.
pub struct RecordStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// All stored records in persisted order. Missing or unreadable content yields
    /// an empty list; the failure is logged, never returned.
    pub fn list(&self) -> Vec<DailyRecord> {
        match self.backend.get(&self.key) {
            Ok(raw) => self.parse(raw),
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "could not read records; treating as empty");
                Vec::new()
            }
        }
    }

    /// Prepends `record` and persists the collection. No validation happens here.
    pub fn add(&self, record: DailyRecord) -> Result<()> {
        let mut records = self.load_for_update()?;
        tracing::info!(id = %record.id, date = %record.date, quantity = record.quantity, "adding record");
        records.insert(0, record);
        self.persist(&records)
    }

    /// Removes the record with `id`; unknown ids leave the collection untouched.
    pub fn remove(&self, id: &str) -> Result<()> {
        let records = self.load_for_update()?;
        let before = records.len();
        let remaining: Vec<DailyRecord> = records.into_iter().filter(|r| r.id() != id).collect();
        if remaining.len() == before {
            tracing::debug!(id, "remove: no matching record");
        } else {
            tracing::info!(id, "removed record");
        }
        self.persist(&remaining)
    }

    pub fn find(&self, id: &str) -> Option<DailyRecord> {
        self.list().into_iter().find(|record| record.id() == id)
    }

    /// Resolves a full identifier or a unique prefix of one.
    pub fn resolve(&self, reference: &str) -> Result<DailyRecord> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(WorklogError::InvalidInput("record id is required".into()));
        }
        let records = self.list();
        if let Some(exact) = records.iter().find(|record| record.id() == reference) {
            return Ok(exact.clone());
        }
        let mut matches = records
            .into_iter()
            .filter(|record| record.id().starts_with(reference));
        match (matches.next(), matches.next()) {
            (Some(record), None) => Ok(record),
            (Some(_), Some(_)) => Err(WorklogError::AmbiguousReference(reference.to_string())),
            (None, _) => Err(WorklogError::RecordNotFound(reference.to_string())),
        }
    }

    // Read failures abort the mutation; malformed content still counts as empty.
    fn load_for_update(&self) -> Result<Vec<DailyRecord>> {
        let raw = self.backend.get(&self.key)?;
        Ok(self.parse(raw))
    }

    fn parse(&self, raw: Option<String>) -> Vec<DailyRecord> {
        let Some(raw) = raw else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(key = %self.key, %err, "stored records are malformed; treating as empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, records: &[DailyRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.backend.set(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn record(day: u32, quantity: u32) -> DailyRecord {
        DailyRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            quantity,
            5.0,
            Vec::new(),
        )
    }

    #[test]
    fn empty_backend_lists_nothing() {
        let store = RecordStore::new(MemoryStore::new());
        assert!(store.list().is_empty());
    }

    #[test]
    fn add_prepends_newest_record() {
        let store = RecordStore::new(MemoryStore::new());
        let first = record(8, 10);
        let second = record(3, 4);
        store.add(first.clone()).unwrap();
        store.add(second.clone()).unwrap();
        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], second);
        assert_eq!(listed[1], first);
    }

    #[test]
    fn remove_deletes_only_matching_record() {
        let store = RecordStore::new(MemoryStore::new());
        let keep = record(8, 10);
        let drop = record(9, 2);
        store.add(keep.clone()).unwrap();
        store.add(drop.clone()).unwrap();
        store.remove(&drop.id).unwrap();
        assert_eq!(store.list(), vec![keep.clone()]);
        store.remove("not-a-real-id").unwrap();
        assert_eq!(store.list(), vec![keep]);
    }

    #[test]
    fn malformed_content_is_treated_as_empty() {
        let store = RecordStore::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, "not json {"));
        assert!(store.list().is_empty());
        let wrong_shape = RecordStore::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, r#"{"a":1}"#));
        assert!(wrong_shape.list().is_empty());
    }

    #[test]
    fn adding_after_malformed_content_starts_fresh() {
        let store = RecordStore::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, "garbage"));
        store.add(record(10, 1)).unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn resolve_accepts_unique_prefix() {
        let store = RecordStore::new(MemoryStore::new());
        let mut a = record(8, 1);
        a.id = "aaaa-1111".into();
        let mut b = record(9, 1);
        b.id = "aaab-2222".into();
        store.add(a.clone()).unwrap();
        store.add(b.clone()).unwrap();

        assert_eq!(store.resolve("aaaa").unwrap(), a);
        assert_eq!(store.resolve("aaab-2222").unwrap(), b);
        assert!(matches!(store.resolve("aaa"), Err(WorklogError::AmbiguousReference(_))));
        assert!(matches!(store.resolve("zzz"), Err(WorklogError::RecordNotFound(_))));
        assert!(matches!(store.resolve("  "), Err(WorklogError::InvalidInput(_))));
        assert_eq!(store.find("aaaa-1111"), Some(a));
    }

    #[test]
    fn custom_key_is_isolated() {
        let store = RecordStore::with_key(MemoryStore::new(), "other");
        store.add(record(8, 1)).unwrap();
        assert_eq!(store.key(), "other");
        assert!(store.backend().get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }
}
