//! Document store abstraction for phonedesk.
//!
//! A document store holds JSON-object documents grouped into named
//! collections and addressed by a string key. Backends:
//!
//! - [`MemoryStore`]: in-process, for tests and throwaway sessions
//! - [`SqliteStore`]: a local `SQLite` file
//! - `MongoStore`: a remote `MongoDB` deployment (feature `mongodb`)

pub mod memory;
#[cfg(feature = "mongodb")]
pub mod mongo;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{Backend, Config};
use crate::error::{Error, Result};

pub use memory::MemoryStore;
#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;
pub use sqlite::SqliteStore;

/// A stored document: a flat or nested JSON object.
pub type Document = Map<String, Value>;

/// Operations every document store backend provides.
///
/// Each method is a single round trip to the backend. Implementations must
/// be safe to share between tasks.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Create the document at `key`, replacing any existing document.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    async fn set(&self, collection: &str, key: &str, document: Document) -> Result<()>;

    /// Fetch the document at `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>>;

    /// Merge `fields` into the existing document at `key`.
    ///
    /// Top-level fields in `fields` overwrite those in the stored document;
    /// all other stored fields are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentNotFound`] if there is no document at `key`,
    /// or an error if the backend write fails.
    async fn update(&self, collection: &str, key: &str, fields: Document) -> Result<()>;

    /// Remove the document at `key`.
    ///
    /// Removing a missing document is not an error. Returns whether a
    /// document was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    async fn delete(&self, collection: &str, key: &str) -> Result<bool>;

    /// Find documents whose top-level `field` equals `value`, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, Document)>>;
}

/// Merge `fields` over `document`, top-level keys only.
pub(crate) fn merge_fields(document: &mut Document, fields: Document) {
    for (name, value) in fields {
        document.insert(name, value);
    }
}

/// Open the store selected by `config`.
///
/// # Errors
///
/// Returns an error if the backend cannot be opened, or if the `mongodb`
/// backend is selected in a build without the `mongodb` feature.
pub async fn open_store(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    debug!("Opening {} document store", config.store.backend);
    match config.store.backend {
        Backend::Memory => Ok(Arc::new(MemoryStore::new())),
        Backend::Sqlite => Ok(Arc::new(SqliteStore::open(config.database_path())?)),
        Backend::Mongodb => open_mongo(config).await,
    }
}

#[cfg(feature = "mongodb")]
async fn open_mongo(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    let uri = config
        .store
        .mongodb_uri
        .as_deref()
        .ok_or_else(|| Error::ConfigValidation {
            message: "store.mongodb_uri is required for the mongodb backend".to_string(),
        })?;
    let store = MongoStore::connect(uri, &config.store.mongodb_database).await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "mongodb"))]
#[allow(clippy::unused_async)]
async fn open_mongo(_config: &Config) -> Result<Arc<dyn DocumentStore>> {
    Err(Error::ConfigValidation {
        message: "this build does not include the mongodb backend (enable the `mongodb` feature)"
            .to_string(),
    })
}
