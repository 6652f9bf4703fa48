//! User record types for phonedesk.
//!
//! A record is the single entity kept in the document store: a flat
//! document keyed by its phone number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::Document;

/// A user record as stored in the document store.
///
/// Timestamps use the `createdAt`/`updatedAt` field names on the wire and
/// are omitted when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Display name.
    pub name: String,

    /// Phone number; also the document key. Always kept as a string.
    pub phone: String,

    /// Age in years.
    pub age: u32,

    /// When the record was (last) inserted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the record was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Create a new record stamped with the current time as `createdAt`.
    #[must_use]
    pub fn new(name: String, phone: String, age: u32) -> Self {
        Self {
            name,
            phone,
            age,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    /// The document key for this record.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.phone
    }

    /// Convert this record into a store document.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized.
    pub fn to_document(&self) -> Result<Document> {
        into_document(self)
    }

    /// Read a record back from a store document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedDocument`] if required fields are missing or
    /// have the wrong type.
    pub fn from_document(key: &str, document: Document) -> Result<Self> {
        serde_json::from_value(serde_json::Value::Object(document))
            .map_err(|e| Error::malformed(key, e.to_string()))
    }
}

/// The partial document written when a record is updated.
///
/// Leaves `phone` and `createdAt` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New display name.
    pub name: String,
    /// New age.
    pub age: u32,
    /// Time of the update.
    pub updated_at: DateTime<Utc>,
}

impl UserPatch {
    /// Create a patch stamped with the current time.
    #[must_use]
    pub fn new(name: String, age: u32) -> Self {
        Self {
            name,
            age,
            updated_at: Utc::now(),
        }
    }

    /// Convert this patch into the fields to merge.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch cannot be serialized.
    pub fn to_document(&self) -> Result<Document> {
        into_document(self)
    }
}

fn into_document<T: Serialize>(value: &T) -> Result<Document> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(Error::internal(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}
