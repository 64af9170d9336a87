//! Staff listing view: recent company records joined to their agreements,
//! alongside the most recent reservations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::ports::{ListQuery, ListingQuery, RecordStore};
use crate::domain::{
    Agreement, Collection, CompanyRecord, Error, Record, Reservation, StoredRecord,
};

/// Newest company records shown on the listing.
pub const LISTING_COMPANY_RECORD_LIMIT: u32 = 5;
/// Newest reservations shown on the listing.
pub const LISTING_RESERVATION_LIMIT: u32 = 5;
/// Agreements read to find signing dates.
pub const LISTING_AGREEMENT_LIMIT: u32 = 100;

/// A company record with the date its agreement was signed, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub record: Record<CompanyRecord>,
    pub signed_at: Option<DateTime<Utc>>,
}

/// Everything the staff listing page shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingView {
    pub company_records: Vec<ListingRow>,
    pub reservations: Vec<Record<Reservation>>,
}

/// Left-join company records to agreements on exact `clientName`.
///
/// `agreements` must be newest first; the first match wins.
#[must_use]
pub fn join_signed_dates(
    records: Vec<Record<CompanyRecord>>,
    agreements: &[Record<Agreement>],
) -> Vec<ListingRow> {
    records
        .into_iter()
        .map(|record| {
            let signed_at = agreements
                .iter()
                .find(|agreement| agreement.fields.client_name == record.fields.client_name)
                .map(|agreement| agreement.created);
            ListingRow { record, signed_at }
        })
        .collect()
}

fn decode_rows<T: DeserializeOwned>(collection: Collection, rows: &[StoredRecord]) -> Vec<Record<T>> {
    rows.iter()
        .filter_map(|row| match row.decode::<T>() {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(%collection, record_id = %row.id, %error, "skipping unreadable row");
                None
            }
        })
        .collect()
}

/// Reads the listing collections and joins signing dates.
#[derive(Clone)]
pub struct ListingService {
    store: Arc<dyn RecordStore>,
}

impl ListingService {
    /// Create a service reading from `store`.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ListingQuery for ListingService {
    async fn listing(&self) -> Result<ListingView, Error> {
        let company_query = ListQuery::newest(1, LISTING_COMPANY_RECORD_LIMIT);
        let reservation_query = ListQuery::newest(1, LISTING_RESERVATION_LIMIT);
        let agreement_query = ListQuery::newest(1, LISTING_AGREEMENT_LIMIT);

        let (company_rows, reservation_rows, agreement_rows) = tokio::try_join!(
            self.store.list(Collection::CompanyRecords, &company_query),
            self.store.list(Collection::Reservations, &reservation_query),
            self.store.list(Collection::Agreements, &agreement_query),
        )?;

        let records = decode_rows(Collection::CompanyRecords, &company_rows);
        let agreements = decode_rows(Collection::Agreements, &agreement_rows);

        Ok(ListingView {
            company_records: join_signed_dates(records, &agreements),
            reservations: decode_rows(Collection::Reservations, &reservation_rows),
        })
    }
}
