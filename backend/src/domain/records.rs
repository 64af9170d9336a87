//! Record types persisted in the hosted collection store.
//!
//! The store returns loosely typed JSON rows ([`StoredRecord`]); flows decode
//! them into the typed field sets below via [`StoredRecord::decode`].

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON object holding the user-defined fields of a record.
pub type RecordFields = Map<String, Value>;

/// Collections consumed by the intake flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Reservations,
    CompanyRecords,
    Agreements,
}

impl Collection {
    /// Every collection, in a stable order.
    pub const ALL: [Collection; 3] = [
        Collection::Reservations,
        Collection::CompanyRecords,
        Collection::Agreements,
    ];

    /// Collection name in the store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reservations => "reservations",
            Self::CompanyRecords => "company_records",
            Self::Agreements => "agreements",
        }
    }

    /// Field carrying the collection's unique key, if any.
    #[must_use]
    pub const fn unique_key(self) -> Option<&'static str> {
        match self {
            Self::Reservations => None,
            Self::CompanyRecords => Some(COMPANY_MAIN_CODE_FIELD),
            Self::Agreements => Some(AGREEMENT_CLIENT_NAME_FIELD),
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const COMPANY_MAIN_CODE_FIELD: &str = "mainCode";
pub const AGREEMENT_CLIENT_NAME_FIELD: &str = "clientName";

/// A row as returned by the store: id, store-assigned timestamp, and fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: String,
    pub created: DateTime<Utc>,
    pub fields: RecordFields,
}

/// A typed record with its store metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<T> {
    pub id: String,
    pub created: DateTime<Utc>,
    pub fields: T,
}

impl StoredRecord {
    /// Read a string field.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Decode the user-defined fields into `T`.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use intake::domain::{CompanyRecord, StoredRecord};
    /// use serde_json::json;
    ///
    /// let row = StoredRecord {
    ///     id: "r1".into(),
    ///     created: Utc::now(),
    ///     fields: json!({
    ///         "mainCode": "3362",
    ///         "clientName": "Acme Corp",
    ///         "serviceProvided": "Incorporation"
    ///     })
    ///     .as_object()
    ///     .cloned()
    ///     .unwrap_or_default(),
    /// };
    /// let record = row.decode::<CompanyRecord>().expect("decodes");
    /// assert_eq!(record.fields.main_code, "3362");
    /// ```
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Record<T>, serde_json::Error> {
        let fields = T::deserialize(Value::Object(self.fields.clone()))?;
        Ok(Record {
            id: self.id.clone(),
            created: self.created,
            fields,
        })
    }
}

/// Serialise a typed field set into the store's JSON object shape.
pub fn encode_fields<T: Serialize>(value: &T) -> Result<RecordFields, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "record fields must serialise to an object, got {other}"
        ))),
    }
}

/// Intake record created by staff, keyed by `mainCode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub main_code: String,
    pub client_name: String,
    pub service_provided: String,
}

/// Signed retainer agreement, keyed by `clientName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    pub client_name: String,
    pub main_code: String,
    pub service_provided: String,
    #[serde(default)]
    pub signed: bool,
}

/// Public reservation form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub special_requests: String,
}
