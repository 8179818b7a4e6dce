//! Record storage keyed by identifier.
//!
//! The store is the only shared mutable state in the system and the sole
//! authority on identifier uniqueness: `create` must fail with
//! [`StoreError::DuplicateKey`] when the identifier is already present, even
//! when two callers race.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use crate::error::StoreError;
use crate::models::record::{PersistedRecord, RecordUpdate, ValidatedRecord};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistent record store.
pub trait RecordStore: Send + Sync {
    /// Look a record up by its identifier.
    fn find_by_key(&self, identifier: &str) -> Result<Option<PersistedRecord>>;

    /// Insert a new record. Fails with `DuplicateKey` if the identifier exists.
    fn create(&self, record: &ValidatedRecord) -> Result<PersistedRecord>;

    /// Apply the set fields of `update`. `Ok(None)` when no record matches.
    fn update_by_key(
        &self,
        identifier: &str,
        update: &RecordUpdate,
    ) -> Result<Option<PersistedRecord>>;

    /// Remove a record; returns whether one was removed.
    fn delete_by_key(&self, identifier: &str) -> Result<bool>;

    /// Records ordered newest first.
    fn list(&self, limit: usize, offset: usize) -> Result<Vec<PersistedRecord>>;
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    fn find_by_key(&self, identifier: &str) -> Result<Option<PersistedRecord>> {
        (**self).find_by_key(identifier)
    }

    fn create(&self, record: &ValidatedRecord) -> Result<PersistedRecord> {
        (**self).create(record)
    }

    fn update_by_key(
        &self,
        identifier: &str,
        update: &RecordUpdate,
    ) -> Result<Option<PersistedRecord>> {
        (**self).update_by_key(identifier, update)
    }

    fn delete_by_key(&self, identifier: &str) -> Result<bool> {
        (**self).delete_by_key(identifier)
    }

    fn list(&self, limit: usize, offset: usize) -> Result<Vec<PersistedRecord>> {
        (**self).list(limit, offset)
    }
}

/// Shared contract checks run against every backend.
#[cfg(test)]
pub(crate) mod contract {
    use super::*;
    use crate::models::record::CandidateRecord;
    use crate::validate::validate;

    pub fn record(identifier: &str, name: &str) -> ValidatedRecord {
        validate(CandidateRecord {
            identifier: identifier.to_string(),
            name: name.to_string(),
            state: Some("Tamil Nadu".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    pub fn create_then_find(store: &dyn RecordStore) {
        let created = store.create(&record("1234 5678 9012", "RAMASAMY KUMAR")).unwrap();
        assert_eq!(created.identifier(), "1234 5678 9012");
        assert!(created.updated_at.is_none());

        let found = store.find_by_key("1234 5678 9012").unwrap().unwrap();
        assert_eq!(found, created);
        assert!(store.find_by_key("0000 0000 0000").unwrap().is_none());
    }

    pub fn duplicate_create_rejected(store: &dyn RecordStore) {
        store.create(&record("1234 5678 9012", "RAMASAMY KUMAR")).unwrap();
        let err = store
            .create(&record("1234 5678 9012", "ANITHA MARY"))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(ref id) if id == "1234 5678 9012"));

        let stored = store.find_by_key("1234 5678 9012").unwrap().unwrap();
        assert_eq!(stored.record.name, "RAMASAMY KUMAR");
    }

    pub fn update_applies_set_fields(store: &dyn RecordStore) {
        store.create(&record("1234 5678 9012", "RAMASAMY KUMAR")).unwrap();

        let update = RecordUpdate {
            name: Some("RAMASAMY K".to_string()),
            pincode: Some("600001".to_string()),
            ..Default::default()
        };
        let updated = store
            .update_by_key("1234 5678 9012", &update)
            .unwrap()
            .unwrap();

        assert_eq!(updated.record.name, "RAMASAMY K");
        assert_eq!(updated.record.pincode.as_deref(), Some("600001"));
        assert_eq!(updated.record.state.as_deref(), Some("Tamil Nadu"));
        assert_eq!(updated.identifier(), "1234 5678 9012");
        assert!(updated.updated_at.is_some());

        assert!(store
            .update_by_key("0000 0000 0000", &update)
            .unwrap()
            .is_none());
    }

    pub fn delete_and_list(store: &dyn RecordStore) {
        store.create(&record("1111 1111 1111", "FIRST PERSON")).unwrap();
        store.create(&record("2222 2222 2222", "SECOND PERSON")).unwrap();
        store.create(&record("3333 3333 3333", "THIRD PERSON")).unwrap();

        let all: Vec<_> = store
            .list(10, 0)
            .unwrap()
            .into_iter()
            .map(|r| r.record.identifier)
            .collect();
        assert_eq!(all, vec!["3333 3333 3333", "2222 2222 2222", "1111 1111 1111"]);

        let page: Vec<_> = store
            .list(1, 1)
            .unwrap()
            .into_iter()
            .map(|r| r.record.identifier)
            .collect();
        assert_eq!(page, vec!["2222 2222 2222"]);

        assert!(store.delete_by_key("2222 2222 2222").unwrap());
        assert!(!store.delete_by_key("2222 2222 2222").unwrap());
        assert_eq!(store.list(10, 0).unwrap().len(), 2);
        assert!(store.list(10, 5).unwrap().is_empty());
    }
}
