//! Create-or-update reconciliation of validated records against a store.
//!
//! The lookup and the following write are two separate store calls. Between
//! them another submission may create the same identifier (our create then
//! fails with `DuplicateKey`) or delete it (our update then matches nothing).
//! Neither case is retried or papered over: the first becomes
//! [`Reconciliation::Conflict`], the second [`StoreError::NotFound`].

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::record::{PersistedRecord, RecordUpdate, ValidatedRecord};
use crate::store::RecordStore;

/// Outcome of reconciling one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Reconciliation {
    /// No record existed; a new one was stored.
    Created { record: PersistedRecord },
    /// An existing record was updated with the extracted fields.
    Updated { record: PersistedRecord },
    /// A concurrent submission created the identifier first.
    Conflict { identifier: String },
}

impl Reconciliation {
    pub fn record(&self) -> Option<&PersistedRecord> {
        match self {
            Self::Created { record } | Self::Updated { record } => Some(record),
            Self::Conflict { .. } => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Decides between create and update for validated records.
#[derive(Debug, Clone)]
pub struct Reconciler<S> {
    store: S,
}

impl<S: RecordStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create the record, or update the stored one with the same identifier.
    pub fn reconcile(&self, record: &ValidatedRecord) -> Result<Reconciliation, StoreError> {
        let identifier = record.identifier();

        match self.store.find_by_key(identifier)? {
            Some(existing) => {
                debug!("Record {} exists (id {}), updating", identifier, existing.id);
                let update = RecordUpdate::from(record);
                match self.store.update_by_key(identifier, &update)? {
                    Some(updated) => Ok(Reconciliation::Updated { record: updated }),
                    None => {
                        warn!("Record {} disappeared before it could be updated", identifier);
                        Err(StoreError::NotFound(identifier.to_string()))
                    }
                }
            }
            None => match self.store.create(record) {
                Ok(created) => {
                    info!("Record {} created (id {})", identifier, created.id);
                    Ok(Reconciliation::Created { record: created })
                }
                Err(StoreError::DuplicateKey(_)) => {
                    warn!(
                        "Record {} was created by a concurrent submission",
                        identifier
                    );
                    Ok(Reconciliation::Conflict {
                        identifier: identifier.to_string(),
                    })
                }
                Err(e) => Err(e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use super::*;
    use crate::models::record::CandidateRecord;
    use crate::store::{contract, MemoryStore};
    use crate::validate::validate;

    /// Store whose lookups return a fixed snapshot, as if another submission
    /// changed the data between our read and our write.
    struct StaleReadStore {
        inner: MemoryStore,
        snapshot: Option<PersistedRecord>,
    }

    impl RecordStore for StaleReadStore {
        fn find_by_key(&self, _identifier: &str) -> crate::store::Result<Option<PersistedRecord>> {
            Ok(self.snapshot.clone())
        }

        fn create(&self, record: &ValidatedRecord) -> crate::store::Result<PersistedRecord> {
            self.inner.create(record)
        }

        fn update_by_key(
            &self,
            identifier: &str,
            update: &RecordUpdate,
        ) -> crate::store::Result<Option<PersistedRecord>> {
            self.inner.update_by_key(identifier, update)
        }

        fn delete_by_key(&self, identifier: &str) -> crate::store::Result<bool> {
            self.inner.delete_by_key(identifier)
        }

        fn list(&self, limit: usize, offset: usize) -> crate::store::Result<Vec<PersistedRecord>> {
            self.inner.list(limit, offset)
        }
    }

    #[test]
    fn test_created_then_updated() {
        let reconciler = Reconciler::new(MemoryStore::new());
        let record = contract::record("1234 5678 9012", "RAMASAMY KUMAR");

        let first = reconciler.reconcile(&record).unwrap();
        assert!(matches!(first, Reconciliation::Created { .. }));

        let updated = match reconciler.reconcile(&record).unwrap() {
            Reconciliation::Updated { record } => record,
            other => panic!("expected update, got {other:?}"),
        };
        assert_eq!(updated.id, first.record().unwrap().id);
        assert!(updated.updated_at.is_some());
        assert_eq!(reconciler.store().len(), 1);
    }

    #[test]
    fn test_update_keeps_fields_the_new_scan_missed() {
        let reconciler = Reconciler::new(MemoryStore::new());
        reconciler
            .reconcile(&contract::record("1234 5678 9012", "RAMASAMY KUMAR"))
            .unwrap();

        let rescan = validate(CandidateRecord {
            identifier: "123456789012".to_string(),
            name: "RAMASAMY KUMAR".to_string(),
            pincode: Some("600001".to_string()),
            ..Default::default()
        })
        .unwrap();
        let outcome = reconciler.reconcile(&rescan).unwrap();

        let stored = outcome.record().unwrap();
        assert_eq!(stored.record.state.as_deref(), Some("Tamil Nadu"));
        assert_eq!(stored.record.pincode.as_deref(), Some("600001"));
    }

    #[test]
    fn test_lost_create_race_is_conflict() {
        let inner = MemoryStore::new();
        inner
            .create(&contract::record("1234 5678 9012", "RAMASAMY KUMAR"))
            .unwrap();
        let reconciler = Reconciler::new(StaleReadStore {
            inner,
            snapshot: None,
        });

        let outcome = reconciler
            .reconcile(&contract::record("1234 5678 9012", "RAMASAMY KUMAR"))
            .unwrap();

        assert_eq!(
            outcome,
            Reconciliation::Conflict {
                identifier: "1234 5678 9012".to_string()
            }
        );
        assert!(outcome.is_conflict());
        assert_eq!(reconciler.store().inner.len(), 1);
    }

    #[test]
    fn test_update_after_concurrent_delete_is_not_found() {
        let inner = MemoryStore::new();
        let snapshot = inner
            .create(&contract::record("1234 5678 9012", "RAMASAMY KUMAR"))
            .unwrap();
        inner.delete_by_key("1234 5678 9012").unwrap();
        let reconciler = Reconciler::new(StaleReadStore {
            inner,
            snapshot: Some(snapshot),
        });

        let err = reconciler
            .reconcile(&contract::record("1234 5678 9012", "RAMASAMY KUMAR"))
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(ref id) if id == "1234 5678 9012"));
        assert!(reconciler.store().inner.is_empty());
    }

    #[test]
    fn test_concurrent_submissions_create_once() {
        let reconciler = Arc::new(Reconciler::new(Arc::new(MemoryStore::new())));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reconciler = Arc::clone(&reconciler);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    reconciler.reconcile(&contract::record("1234 5678 9012", "RAMASAMY KUMAR"))
                })
            })
            .collect();

        let outcomes: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();

        let created = outcomes
            .iter()
            .filter(|o| matches!(o, Reconciliation::Created { .. }))
            .count();
        let updated_or_conflict = outcomes
            .iter()
            .filter(|o| matches!(o, Reconciliation::Updated { .. } | Reconciliation::Conflict { .. }))
            .count();
        assert_eq!(created, 1);
        assert_eq!(updated_or_conflict, 7);
        assert_eq!(reconciler.store().len(), 1);
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let json = serde_json::to_value(Reconciliation::Conflict {
            identifier: "1234 5678 9012".to_string(),
        })
        .unwrap();
        assert_eq!(json["outcome"], "conflict");
        assert_eq!(json["identifier"], "1234 5678 9012");
    }
}
