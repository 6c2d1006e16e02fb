//! In-memory implementation of `HistoryStore`.
//!
//! `InMemoryHistory` keeps records newest-first in a `Vec` behind
//! `Arc<Mutex<_>>`. Cloning the store clones the handle, not the records, so
//! a session and a gallery view can share one history.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use studio_contracts::{
    error::{StudioError, StudioResult},
    record::{RecordId, ResultRecord},
};
use studio_core::traits::HistoryStore;

use crate::export::HistoryExport;

/// Shared, append-only result history. Newest record first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    pub(crate) records: Arc<Mutex<Vec<ResultRecord>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records, given newest first.
    pub fn with_records(records: Vec<ResultRecord>) -> Self {
        debug!(count = records.len(), "history seeded");
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Copy of the current records for serialization.
    pub fn export(&self) -> HistoryExport {
        let records = self.lock().clone();
        HistoryExport {
            count: records.len(),
            records,
            exported_at: Utc::now(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ResultRecord>> {
        // Records are only ever pushed whole, so a poisoned lock still holds
        // a consistent list.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HistoryStore for InMemoryHistory {
    /// Insert `record` at the front.
    ///
    /// Returns `Err(HistoryWriteFailed)` if a record with the same id is
    /// already stored.
    fn prepend(&self, record: ResultRecord) -> StudioResult<()> {
        let mut records = self.lock();
        if records.iter().any(|r| r.id == record.id) {
            return Err(StudioError::HistoryWriteFailed {
                reason: format!("record id '{}' already exists", record.id),
            });
        }

        info!(record_id = %record.id, title = %record.title, "result added to history");
        records.insert(0, record);
        Ok(())
    }

    fn prepend_new(&self, mut record: ResultRecord, at: DateTime<Utc>) -> StudioResult<ResultRecord> {
        let mut records = self.lock();
        record.id =
            RecordId::unique_from_time(at, |candidate| records.iter().any(|r| &r.id == candidate));

        info!(record_id = %record.id, title = %record.title, "result added to history");
        records.insert(0, record.clone());
        Ok(record)
    }

    fn latest(&self) -> Option<ResultRecord> {
        self.lock().first().cloned()
    }

    fn records(&self) -> Vec<ResultRecord> {
        self.lock().clone()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn contains(&self, id: &RecordId) -> bool {
        self.lock().iter().any(|r| &r.id == id)
    }
}
