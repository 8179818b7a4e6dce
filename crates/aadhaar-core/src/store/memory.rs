//! In-memory record store.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::info;

use super::{RecordStore, Result};
use crate::error::StoreError;
use crate::models::record::{PersistedRecord, RecordUpdate, ValidatedRecord};

/// Records held in a [`DashMap`] keyed by identifier.
///
/// `create` goes through the entry API, so the existence check and the insert
/// happen under one shard lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<String, PersistedRecord>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn find_by_key(&self, identifier: &str) -> Result<Option<PersistedRecord>> {
        Ok(self.records.get(identifier).map(|entry| entry.value().clone()))
    }

    fn create(&self, record: &ValidatedRecord) -> Result<PersistedRecord> {
        match self.records.entry(record.identifier().to_string()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateKey(record.identifier().to_string())),
            Entry::Vacant(slot) => {
                let persisted = PersistedRecord {
                    id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                    record: record.record().clone(),
                    created_at: Utc::now(),
                    updated_at: None,
                };
                slot.insert(persisted.clone());
                info!("Created record {} (id {})", persisted.identifier(), persisted.id);
                Ok(persisted)
            }
        }
    }

    fn update_by_key(
        &self,
        identifier: &str,
        update: &RecordUpdate,
    ) -> Result<Option<PersistedRecord>> {
        Ok(self.records.get_mut(identifier).map(|mut entry| {
            let stored = entry.value_mut();
            update.apply_to(&mut stored.record);
            stored.updated_at = Some(Utc::now());
            info!("Updated record {} (id {})", identifier, stored.id);
            stored.clone()
        }))
    }

    fn delete_by_key(&self, identifier: &str) -> Result<bool> {
        Ok(self.records.remove(identifier).is_some())
    }

    fn list(&self, limit: usize, offset: usize) -> Result<Vec<PersistedRecord>> {
        let mut records: Vec<PersistedRecord> =
            self.records.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records.into_iter().skip(offset).take(limit).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use super::*;
    use crate::store::contract;

    #[test]
    fn test_create_then_find() {
        contract::create_then_find(&MemoryStore::new());
    }

    #[test]
    fn test_duplicate_create_rejected() {
        contract::duplicate_create_rejected(&MemoryStore::new());
    }

    #[test]
    fn test_update_applies_set_fields() {
        contract::update_applies_set_fields(&MemoryStore::new());
    }

    #[test]
    fn test_delete_and_list() {
        contract::delete_and_list(&MemoryStore::new());
    }

    #[test]
    fn test_concurrent_creates_yield_one_record() {
        let store = Arc::new(MemoryStore::new());
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    store.create(&contract::record("1234 5678 9012", "RAMASAMY KUMAR"))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let created = results.iter().filter(|r| r.is_ok()).count();
        let duplicates = results
            .iter()
            .filter(|r| matches!(r, Err(StoreError::DuplicateKey(_))))
            .count();

        assert_eq!(created, 1);
        assert_eq!(duplicates, 7);
        assert_eq!(store.len(), 1);
    }
}
