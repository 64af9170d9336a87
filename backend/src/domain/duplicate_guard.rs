//! Check-then-create guard for collections with a unique key.
//!
//! The pre-check looks for an existing record with the same key and treats
//! any lookup failure as "absent". The store's own unique index is the real
//! guarantee: a uniqueness violation on create is reported as a duplicate,
//! exactly like a pre-check hit. Against a store without that index the
//! sequence is not atomic and concurrent identical submissions can both
//! succeed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::ports::{FieldFilter, RecordStore, RecordStoreError};
use crate::domain::{Collection, Error, RecordFields, StoredRecord};

/// Result of a guarded create.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// The record was written.
    Created(StoredRecord),
    /// A record with the same key already exists; nothing was written.
    Duplicate,
}

/// Per-view-instance "already submitted" flag.
///
/// A fresh latch is issued whenever a form or agreement view is loaded. Once
/// set it stays set for that view instance, making resubmission a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionLatch {
    submitted: bool,
}

impl SubmissionLatch {
    #[must_use]
    pub fn is_set(self) -> bool {
        self.submitted
    }

    pub fn set(&mut self) {
        self.submitted = true;
    }
}

/// Guarded create over a [`RecordStore`].
#[derive(Clone)]
pub struct DuplicateGuard {
    store: Arc<dyn RecordStore>,
}

impl DuplicateGuard {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Create `fields` in `collection` unless `key_value` is already taken.
    ///
    /// # Errors
    /// Returns an internal error when `collection` has no unique key and maps
    /// create failures other than uniqueness violations via
    /// [`From<RecordStoreError>`](Error).
    pub async fn create_unique(
        &self,
        collection: Collection,
        key_value: &str,
        fields: RecordFields,
    ) -> Result<GuardOutcome, Error> {
        let Some(key) = collection.unique_key() else {
            return Err(Error::internal(format!(
                "collection {collection} has no unique key"
            )));
        };

        if self.existing(collection, key, key_value).await.is_some() {
            info!(%collection, key, "duplicate detected by pre-check");
            return Ok(GuardOutcome::Duplicate);
        }

        match self.store.create(collection, fields).await {
            Ok(record) => Ok(GuardOutcome::Created(record)),
            Err(RecordStoreError::UniqueViolation { field, .. }) => {
                info!(%collection, field = %field, "duplicate rejected by store unique index");
                Ok(GuardOutcome::Duplicate)
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn existing(
        &self,
        collection: Collection,
        key: &str,
        key_value: &str,
    ) -> Option<StoredRecord> {
        let filter = match FieldFilter::equals(key, key_value) {
            Ok(filter) => filter,
            Err(error) => {
                warn!(%collection, %error, "duplicate pre-check skipped");
                return None;
            }
        };
        match self.store.first_matching(collection, &filter).await {
            Ok(found) => found,
            Err(error) => {
                warn!(%collection, %error, "duplicate pre-check failed; treating as absent");
                None
            }
        }
    }
}
