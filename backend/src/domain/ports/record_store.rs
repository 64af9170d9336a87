//! Driven port for the hosted collection store.
//!
//! Adapters translate these calls to the store's wire protocol. Filters are
//! single-field equality predicates; values always travel as escaped
//! literals, never as raw query text.

use async_trait::async_trait;

use crate::domain::{Collection, Error, RecordFields, StoredRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// The store could not be reached or answered with a server error.
        Connection { message: String } => "record store unreachable: {message}",
        /// A unique index rejected the write.
        UniqueViolation { collection: String, field: String } =>
            "{collection}.{field} already holds this value",
        /// The store refused the request as malformed.
        Rejected { message: String } => "record store rejected the request: {message}",
        /// The store denied access.
        Unauthorized { message: String } => "record store denied access: {message}",
        /// The store answered with an unexpected payload.
        Decode { message: String } => "record store payload could not be decoded: {message}",
    }
}

impl From<RecordStoreError> for Error {
    fn from(value: RecordStoreError) -> Self {
        match value {
            RecordStoreError::Connection { .. } => {
                Error::service_unavailable("record store is unavailable")
            }
            RecordStoreError::UniqueViolation { collection, field } => {
                Error::conflict(format!("{collection}.{field} already exists"))
            }
            RecordStoreError::Rejected { message } => Error::invalid_request(message),
            RecordStoreError::Unauthorized { message } | RecordStoreError::Decode { message } => {
                Error::internal(message)
            }
        }
    }
}

/// Error returned when a filter names something other than a plain field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("filter field must be a plain identifier, got {0:?}")]
pub struct FieldFilterError(pub String);

/// Equality predicate on one field.
///
/// # Examples
/// ```
/// use intake::domain::ports::FieldFilter;
///
/// let filter = FieldFilter::equals("mainCode", "3362").expect("plain identifier");
/// assert_eq!(filter.field(), "mainCode");
/// assert!(FieldFilter::equals("mainCode || 1=1", "x").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    field: String,
    value: String,
}

impl FieldFilter {
    /// Build a `field = value` predicate after validating the field name.
    pub fn equals(field: &str, value: impl Into<String>) -> Result<Self, FieldFilterError> {
        let mut chars = field.chars();
        let valid_head = chars
            .next()
            .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_');
        if !valid_head || !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            return Err(FieldFilterError(field.to_owned()));
        }
        Ok(Self {
            field: field.to_owned(),
            value: value.into(),
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Sort direction by store-assigned creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Page request for [`RecordStore::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    per_page: u32,
    sort: SortOrder,
    filter: Option<FieldFilter>,
}

impl ListQuery {
    /// Newest-first page. Page and size are clamped to at least 1.
    #[must_use]
    pub fn newest(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
            sort: SortOrder::NewestFirst,
            filter: None,
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: FieldFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn filter(&self) -> Option<&FieldFilter> {
        self.filter.as_ref()
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record; the store assigns `id` and `created`.
    async fn create(
        &self,
        collection: Collection,
        fields: RecordFields,
    ) -> Result<StoredRecord, RecordStoreError>;

    /// Fetch one page of records.
    async fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> Result<Vec<StoredRecord>, RecordStoreError>;

    /// Fetch the newest record matching `filter`, if any.
    async fn first_matching(
        &self,
        collection: Collection,
        filter: &FieldFilter,
    ) -> Result<Option<StoredRecord>, RecordStoreError>;

    /// Confirm the store is reachable and answering.
    async fn health(&self) -> Result<(), RecordStoreError>;
}
