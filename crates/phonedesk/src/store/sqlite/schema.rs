//! `SQLite` schema definitions for the document store.
//!
//! Documents are kept as JSON text, one row per `(collection, key)`.

/// SQL statement to create the documents table.
pub const CREATE_DOCUMENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS documents (
    collection TEXT NOT NULL,
    key TEXT NOT NULL,
    body TEXT NOT NULL,
    written_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (collection, key)
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_DOCUMENTS_TABLE, CREATE_METADATA_TABLE];

/// Index on the stored phone field, added in schema version 2.
pub const CREATE_PHONE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_documents_phone
ON documents(collection, json_extract(body, '$.phone'))
";
