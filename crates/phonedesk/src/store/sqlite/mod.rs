//! `SQLite`-backed document store.
//!
//! Documents are stored as JSON text. Equality lookups on a field go through
//! `json_extract`, with a Rust-side check for values `SQLite` cannot compare
//! exactly (booleans, nulls, nested values).

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, types::Value as SqlValue, Connection, OptionalExtension};
use serde_json::Value;
use tracing::{debug, info};

use super::{merge_fields, Document, DocumentStore};
use crate::error::{Error, Result};

/// Document store kept in a local `SQLite` database.
///
/// The connection is shared behind a mutex and every call runs on the
/// blocking thread pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create a store database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        migrations::initialize_schema(&conn)?;

        info!("Document store opened at {}", path.display());
        Ok(Self {
            path,
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Count the documents in a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn count(&self, collection: &str) -> Result<i64> {
        let collection = collection.to_string();
        self.with_conn(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM documents WHERE collection = ?1",
                [collection],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
    }

    /// Run `f` against the connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| Error::internal("database connection lock poisoned"))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| Error::internal(format!("database task failed: {e}")))?
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn set(&self, collection: &str, key: &str, document: Document) -> Result<()> {
        let (collection, key) = (collection.to_string(), key.to_string());
        self.with_conn(move |conn| {
            let body = serde_json::to_string(&document)?;
            conn.execute(
                r"
                INSERT INTO documents (collection, key, body) VALUES (?1, ?2, ?3)
                ON CONFLICT (collection, key)
                DO UPDATE SET body = excluded.body, written_at = datetime('now')
                ",
                params![collection, key, body],
            )?;
            debug!("Set document {}/{}", collection, key);
            Ok(())
        })
        .await
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>> {
        let (collection, key) = (collection.to_string(), key.to_string());
        self.with_conn(move |conn| read_document(conn, &collection, &key))
            .await
    }

    async fn update(&self, collection: &str, key: &str, fields: Document) -> Result<()> {
        let (collection, key) = (collection.to_string(), key.to_string());
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let mut document = read_document(&tx, &collection, &key)?
                .ok_or_else(|| Error::not_found(&collection, &key))?;
            merge_fields(&mut document, fields);
            tx.execute(
                r"
                UPDATE documents SET body = ?3, written_at = datetime('now')
                WHERE collection = ?1 AND key = ?2
                ",
                params![collection, key, serde_json::to_string(&document)?],
            )?;
            tx.commit()?;
            debug!("Updated document {}/{}", collection, key);
            Ok(())
        })
        .await
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<bool> {
        let (collection, key) = (collection.to_string(), key.to_string());
        self.with_conn(move |conn| {
            let affected = conn.execute(
                "DELETE FROM documents WHERE collection = ?1 AND key = ?2",
                params![collection, key],
            )?;
            Ok(affected > 0)
        })
        .await
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, Document)>> {
        let (collection, field, value) = (collection.to_string(), field.to_string(), value.clone());
        self.with_conn(move |conn| {
            let rows = match sql_scalar(&value) {
                Some(scalar) => {
                    // Inline the path so the expression can use the phone index
                    let sql = format!(
                        "SELECT key, body FROM documents \
                         WHERE collection = ?1 AND json_extract(body, '{}') = ?2 \
                         ORDER BY key",
                        json_path(&field).replace('\'', "''")
                    );
                    let mut stmt = conn.prepare(&sql)?;
                    let rows = stmt
                        .query_map(params![collection, scalar], |row| {
                            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                        })?
                        .collect::<std::result::Result<Vec<_>, _>>()?;
                    rows
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT key, body FROM documents WHERE collection = ?1 ORDER BY key",
                    )?;
                    let rows = stmt
                        .query_map(params![collection], |row| {
                            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                        })?
                        .collect::<std::result::Result<Vec<_>, _>>()?;
                    rows
                }
            };

            let mut found = Vec::new();
            for (key, body) in rows {
                let document = parse_body(&key, &body)?;
                if document.get(&field) == Some(&value) {
                    found.push((key, document));
                }
            }
            Ok(found)
        })
        .await
    }
}

/// Read and decode a single document.
fn read_document(conn: &Connection, collection: &str, key: &str) -> Result<Option<Document>> {
    let body: Option<String> = conn
        .query_row(
            "SELECT body FROM documents WHERE collection = ?1 AND key = ?2",
            params![collection, key],
            |row| row.get(0),
        )
        .optional()?;
    body.map(|body| parse_body(key, &body)).transpose()
}

fn parse_body(key: &str, body: &str) -> Result<Document> {
    match serde_json::from_str(body)? {
        Value::Object(document) => Ok(document),
        _ => Err(Error::malformed(key, "stored body is not a JSON object")),
    }
}

/// JSON path selecting a top-level field.
///
/// Plain identifiers stay unquoted so `$.phone` matches the indexed expression.
fn json_path(field: &str) -> String {
    if !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        format!("$.{field}")
    } else {
        format!("$.\"{}\"", field.replace('"', "\\\""))
    }
}

/// The SQL value `json_extract` yields for a JSON string or number.
fn sql_scalar(value: &Value) -> Option<SqlValue> {
    match value {
        Value::String(s) => Some(SqlValue::Text(s.clone())),
        Value::Number(n) => n
            .as_i64()
            .map(SqlValue::Integer)
            .or_else(|| n.as_f64().map(SqlValue::Real)),
        _ => None,
    }
}
