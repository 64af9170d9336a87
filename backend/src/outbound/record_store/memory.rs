//! Process-local record store.
//!
//! Used when no hosted store is configured and by tests. Enforces the same
//! unique keys as the hosted indexes. The state mutex is never held across
//! an await point.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;
use tracing::info;

use crate::domain::ports::{
    FieldFilter, ListQuery, RecordStore, RecordStoreError, SortOrder, StaffLoginService,
};
use crate::domain::{Collection, Error, LoginCredentials, RecordFields, StaffId, StoredRecord};

#[derive(Debug)]
struct MemoryRow {
    seq: u64,
    record: StoredRecord,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_seq: u64,
    rows: HashMap<Collection, Vec<MemoryRow>>,
    staff: HashMap<String, String>,
}

/// In-memory [`RecordStore`] and [`StaffLoginService`].
pub struct InMemoryRecordStore {
    state: Mutex<MemoryState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRecordStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            clock,
        }
    }

    /// Register a staff account accepted by [`StaffLoginService::authenticate`].
    #[must_use]
    pub fn with_staff_account(self, username: &str, password: &str) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.staff.insert(username.to_owned(), password.to_owned());
        }
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, RecordStoreError> {
        self.state
            .lock()
            .map_err(|_| RecordStoreError::connection("in-memory store lock poisoned"))
    }

    fn select(&self, collection: Collection, query: &ListQuery) -> Result<Vec<StoredRecord>, RecordStoreError> {
        let state = self.lock()?;
        let Some(rows) = state.rows.get(&collection) else {
            return Ok(Vec::new());
        };

        let mut matching: Vec<&MemoryRow> = rows
            .iter()
            .filter(|row| query.filter().is_none_or(|filter| matches_filter(&row.record, filter)))
            .collect();
        matching.sort_by_key(|row| (row.record.created, row.seq));
        if query.sort() == SortOrder::NewestFirst {
            matching.reverse();
        }

        let per_page = query.per_page() as usize;
        let skip = (query.page() as usize - 1).saturating_mul(per_page);
        Ok(matching
            .into_iter()
            .skip(skip)
            .take(per_page)
            .map(|row| row.record.clone())
            .collect())
    }
}

fn matches_filter(record: &StoredRecord, filter: &FieldFilter) -> bool {
    record.field_str(filter.field()) == Some(filter.value())
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create(
        &self,
        collection: Collection,
        fields: RecordFields,
    ) -> Result<StoredRecord, RecordStoreError> {
        let created = self.clock.utc();
        let mut state = self.lock()?;

        if let Some(key) = collection.unique_key() {
            let candidate = fields.get(key).and_then(Value::as_str);
            let taken = candidate.is_some()
                && state.rows.get(&collection).is_some_and(|rows| {
                    rows.iter().any(|row| row.record.field_str(key) == candidate)
                });
            if taken {
                return Err(RecordStoreError::unique_violation(collection.as_str(), key));
            }
        }

        state.next_seq += 1;
        let seq = state.next_seq;
        let record = StoredRecord {
            id: format!("mem{seq:012}"),
            created,
            fields,
        };
        state.rows.entry(collection).or_default().push(MemoryRow {
            seq,
            record: record.clone(),
        });
        Ok(record)
    }

    async fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> Result<Vec<StoredRecord>, RecordStoreError> {
        self.select(collection, query)
    }

    async fn first_matching(
        &self,
        collection: Collection,
        filter: &FieldFilter,
    ) -> Result<Option<StoredRecord>, RecordStoreError> {
        let query = ListQuery::newest(1, 1).with_filter(filter.clone());
        Ok(self.select(collection, &query)?.into_iter().next())
    }

    async fn health(&self) -> Result<(), RecordStoreError> {
        Ok(())
    }
}

#[async_trait]
impl StaffLoginService for InMemoryRecordStore {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<StaffId, Error> {
        let accepted = {
            let state = self.lock()?;
            state
                .staff
                .get(credentials.username())
                .is_some_and(|password| password == credentials.password())
        };
        if !accepted {
            info!(username = credentials.username(), "staff login rejected");
            return Err(Error::unauthorized("invalid credentials"));
        }
        StaffId::new(format!("staff:{}", credentials.username()))
            .map_err(|err| Error::internal(format!("invalid staff id: {err}")))
    }
}
