//! `MongoDB`-backed document store.
//!
//! Each collection maps to a `MongoDB` collection of the same name and the
//! document key is stored as `_id`.

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document as BsonDocument};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde_json::Value;
use tracing::{debug, info};

use super::{Document, DocumentStore};
use crate::error::{Error, Result};

/// Document store on a remote `MongoDB` deployment.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect to `uri` and select `database`.
    ///
    /// Pings the server so a bad URI fails here rather than on the first
    /// button press.
    ///
    /// # Errors
    ///
    /// Returns an error if the URI is invalid or the server is unreachable.
    pub async fn connect(uri: &str, database: &str) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some("phonedesk".to_string());
        options.connect_timeout = Some(Duration::from_secs(5));
        options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(options)?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;

        info!("Connected to MongoDB database {}", database);
        Ok(Self { db })
    }

    fn collection(&self, name: &str) -> Collection<BsonDocument> {
        self.db.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn name(&self) -> &'static str {
        "mongodb"
    }

    async fn set(&self, collection: &str, key: &str, document: Document) -> Result<()> {
        let mut body = to_bson_document(key, &document)?;
        body.insert("_id", key);
        self.collection(collection)
            .replace_one(doc! { "_id": key }, body)
            .upsert(true)
            .await?;
        debug!("Set document {}/{}", collection, key);
        Ok(())
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>> {
        self.collection(collection)
            .find_one(doc! { "_id": key })
            .await?
            .map(|found| from_bson_document(found).map(|(_, document)| document))
            .transpose()
    }

    async fn update(&self, collection: &str, key: &str, fields: Document) -> Result<()> {
        let fields = to_bson_document(key, &fields)?;
        let result = self
            .collection(collection)
            .update_one(doc! { "_id": key }, doc! { "$set": fields })
            .await?;
        if result.matched_count == 0 {
            return Err(Error::not_found(collection, key));
        }
        debug!("Updated document {}/{}", collection, key);
        Ok(())
    }

    async fn delete(&self, collection: &str, key: &str) -> Result<bool> {
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": key })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<(String, Document)>> {
        let value = bson::to_bson(value).map_err(|e| Error::internal(e.to_string()))?;
        let mut filter = BsonDocument::new();
        filter.insert(field, value);

        let found: Vec<BsonDocument> = self
            .collection(collection)
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;

        found.into_iter().map(from_bson_document).collect()
    }
}

fn to_bson_document(key: &str, document: &Document) -> Result<BsonDocument> {
    bson::to_document(document).map_err(|e| Error::malformed(key, e.to_string()))
}

/// Split a stored document into its key and its fields.
fn from_bson_document(mut found: BsonDocument) -> Result<(String, Document)> {
    let key = match found.remove("_id") {
        Some(Bson::String(key)) => key,
        other => {
            return Err(Error::malformed(
                format!("{other:?}"),
                "document _id is not a string",
            ))
        }
    };
    match Bson::Document(found).into_relaxed_extjson() {
        Value::Object(document) => Ok((key, document)),
        _ => Err(Error::malformed(key, "document is not an object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_bson_document_strips_id() {
        let stored = doc! { "_id": "42", "name": "Ada", "age": 36_i32 };
        let (key, document) = from_bson_document(stored).unwrap();

        assert_eq!(key, "42");
        assert_eq!(Value::Object(document), json!({"name": "Ada", "age": 36}));
    }

    #[test]
    fn test_from_bson_document_rejects_object_id() {
        let stored = doc! { "_id": bson::oid::ObjectId::new(), "name": "Ada" };
        let err = from_bson_document(stored).unwrap_err();
        assert!(err.to_string().contains("_id"));
    }

    #[test]
    fn test_to_bson_document() {
        let Value::Object(document) = json!({"name": "Ada", "phone": "0551234567"}) else {
            unreachable!()
        };
        let converted = to_bson_document("0551234567", &document).unwrap();
        assert_eq!(converted.get_str("phone").unwrap(), "0551234567");
    }
}
