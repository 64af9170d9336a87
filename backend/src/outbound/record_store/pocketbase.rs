//! Reqwest-backed PocketBase adapter.
//!
//! This adapter owns transport details only: URL construction, filter
//! rendering, timeout and HTTP error mapping, and JSON decoding into
//! [`StoredRecord`] rows.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use tracing::{debug, info, warn};

use super::dto::{
    ErrorResponseDto, ListResponseDto, PasswordAuthRequestDto, PasswordAuthResponseDto, RecordDto,
};
use super::filter::{render_filter, render_sort};
use crate::domain::ports::{
    FieldFilter, ListQuery, RecordStore, RecordStoreError, StaffLoginService,
};
use crate::domain::{
    Collection, Error, LoginCredentials, RecordFields, StaffId, StoredRecord,
};

/// Connection settings for a PocketBase instance.
#[derive(Debug, Clone)]
pub struct PocketBaseConfig {
    pub base_url: Url,
    /// Sent verbatim in the `Authorization` header when present.
    pub api_token: Option<String>,
    pub timeout: Duration,
    /// Auth collection used for staff logins.
    pub staff_collection: String,
}

pub struct PocketBaseRecordStore {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
    staff_collection: String,
}

impl PocketBaseRecordStore {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: PocketBaseConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
            api_token: config.api_token,
            staff_collection: config.staff_collection,
        })
    }

    fn collection_url(&self, collection: &str, action: &str) -> Result<Url, RecordStoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RecordStoreError::rejected("record store URL cannot be a base"))?
            .pop_if_empty()
            .extend(["api", "collections", collection, action]);
        Ok(url)
    }

    fn health_url(&self) -> Result<Url, RecordStoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RecordStoreError::rejected("record store URL cannot be a base"))?
            .pop_if_empty()
            .extend(["api", "health"]);
        Ok(url)
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.header(reqwest::header::AUTHORIZATION, token.as_str()),
            None => request,
        }
    }

    async fn fetch_page(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> Result<Vec<StoredRecord>, RecordStoreError> {
        let url = self.collection_url(collection.as_str(), "records")?;
        let mut params = vec![
            ("page", query.page().to_string()),
            ("perPage", query.per_page().to_string()),
            ("sort", render_sort(query.sort()).to_owned()),
            ("skipTotal", "true".to_owned()),
        ];
        if let Some(filter) = query.filter() {
            params.push(("filter", render_filter(filter)));
        }

        let response = self
            .authorised(self.client.get(url).query(&params))
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(collection, status, body.as_ref()));
        }

        let decoded: ListResponseDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            RecordStoreError::decode(format!("invalid list payload: {error}"))
        })?;
        decoded
            .items
            .into_iter()
            .map(|item| item.into_stored().map_err(RecordStoreError::decode))
            .collect()
    }
}

#[async_trait]
impl RecordStore for PocketBaseRecordStore {
    async fn create(
        &self,
        collection: Collection,
        fields: RecordFields,
    ) -> Result<StoredRecord, RecordStoreError> {
        let url = self.collection_url(collection.as_str(), "records")?;
        let response = self
            .authorised(self.client.post(url).json(&fields))
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(collection, status, body.as_ref()));
        }

        let record: RecordDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            RecordStoreError::decode(format!("invalid record payload: {error}"))
        })?;
        let stored = record.into_stored().map_err(RecordStoreError::decode)?;
        debug!(%collection, record_id = %stored.id, "record created");
        Ok(stored)
    }

    async fn list(
        &self,
        collection: Collection,
        query: &ListQuery,
    ) -> Result<Vec<StoredRecord>, RecordStoreError> {
        self.fetch_page(collection, query).await
    }

    async fn first_matching(
        &self,
        collection: Collection,
        filter: &FieldFilter,
    ) -> Result<Option<StoredRecord>, RecordStoreError> {
        let query = ListQuery::newest(1, 1).with_filter(filter.clone());
        let rows = self.fetch_page(collection, &query).await?;
        Ok(rows.into_iter().next())
    }

    async fn health(&self) -> Result<(), RecordStoreError> {
        let url = self.health_url()?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(RecordStoreError::connection(status_message(
            status,
            body.as_ref(),
        )))
    }
}

#[async_trait]
impl StaffLoginService for PocketBaseRecordStore {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<StaffId, Error> {
        let url = self
            .collection_url(&self.staff_collection, "auth-with-password")
            .map_err(|err| Error::internal(err.to_string()))?;
        let payload = PasswordAuthRequestDto {
            identity: credentials.username(),
            password: credentials.password(),
        };
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "staff authentication request failed");
                Error::service_unavailable("record store is unavailable")
            })?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            info!(username = credentials.username(), "staff login rejected");
            return Err(Error::unauthorized("invalid credentials"));
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "unexpected staff authentication status");
            return Err(if status.is_server_error() {
                Error::service_unavailable("record store is unavailable")
            } else {
                Error::internal(format!("staff authentication failed with status {status}"))
            });
        }

        let decoded: PasswordAuthResponseDto = response
            .json()
            .await
            .map_err(|err| Error::internal(format!("invalid auth payload: {err}")))?;
        StaffId::new(decoded.record.id)
            .map_err(|err| Error::internal(format!("invalid staff id: {err}")))
    }
}

fn map_transport_error(error: reqwest::Error) -> RecordStoreError {
    if error.is_timeout() {
        RecordStoreError::connection(format!("request timed out: {error}"))
    } else {
        RecordStoreError::connection(error.to_string())
    }
}

fn map_status_error(collection: Collection, status: StatusCode, body: &[u8]) -> RecordStoreError {
    let envelope: ErrorResponseDto = serde_json::from_slice(body).unwrap_or_default();
    if status == StatusCode::BAD_REQUEST {
        if let Some(field) = envelope.not_unique_field() {
            return RecordStoreError::unique_violation(collection.as_str(), field);
        }
    }

    let message = status_message(status, body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RecordStoreError::unauthorized(message),
        _ if status.is_client_error() => RecordStoreError::rejected(message),
        _ => RecordStoreError::connection(message),
    }
}

/// `status N: detail`, preferring the store's own error message over the raw body.
fn status_message(status: StatusCode, body: &[u8]) -> String {
    let envelope: ErrorResponseDto = serde_json::from_slice(body).unwrap_or_default();
    let detail = if envelope.message.is_empty() {
        body_preview(body)
    } else {
        envelope.message
    };
    if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), detail)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
