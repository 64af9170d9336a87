//! Wire DTOs for the PocketBase REST API.
//!
//! Responses decode into these first and are then mapped into
//! [`StoredRecord`] in one pass.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::StoredRecord;

/// Store-managed keys stripped from the user-defined fields.
const SYSTEM_FIELDS: [&str; 4] = ["collectionId", "collectionName", "updated", "expand"];

/// Unique-index violation code reported per field in a 400 response.
pub(super) const NOT_UNIQUE_CODE: &str = "validation_not_unique";

#[derive(Debug, Deserialize)]
pub(super) struct ListResponseDto {
    #[serde(default)]
    pub(super) items: Vec<RecordDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RecordDto {
    pub(super) id: String,
    pub(super) created: String,
    #[serde(flatten)]
    pub(super) fields: Map<String, Value>,
}

impl RecordDto {
    pub(super) fn into_stored(self) -> Result<StoredRecord, String> {
        let created = parse_created(&self.created)?;
        let mut fields = self.fields;
        for key in SYSTEM_FIELDS {
            fields.remove(key);
        }
        Ok(StoredRecord {
            id: self.id,
            created,
            fields,
        })
    }
}

/// Parse `2025-06-01 09:30:00.123Z`, falling back to RFC 3339.
pub(super) fn parse_created(raw: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.fZ")
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)))
        .map_err(|err| format!("invalid created timestamp {raw:?}: {err}"))
}

/// Error envelope returned by PocketBase for rejected requests.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorResponseDto {
    #[serde(default)]
    pub(super) message: String,
    #[serde(default)]
    pub(super) data: Map<String, Value>,
}

impl ErrorResponseDto {
    /// First field whose validation code marks a uniqueness violation.
    pub(super) fn not_unique_field(&self) -> Option<&str> {
        self.data.iter().find_map(|(field, detail)| {
            (detail.get("code").and_then(Value::as_str) == Some(NOT_UNIQUE_CODE))
                .then_some(field.as_str())
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct PasswordAuthRequestDto<'a> {
    pub(super) identity: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct PasswordAuthResponseDto {
    pub(super) record: AuthRecordDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthRecordDto {
    pub(super) id: String,
}
