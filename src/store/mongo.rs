//! MongoDB-backed document store.
//!
//! # Responsibilities
//! - Establish the client connection for one mount
//! - Translate trait operations to driver calls
//! - Map driver errors to StoreError
//!
//! # Design Decisions
//! - One Client per mount; the driver pools connections internally
//! - `update_one` wraps the caller's fields in `$set` (merge semantics)
//! - No session/transaction usage: single-document atomicity only

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::{options::ClientOptions, Client, Collection};

use crate::store::{DocumentStore, StoreError};

/// Document store backed by a MongoDB database.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    database: String,
}

impl MongoStore {
    /// Connect to `url` and target the named database.
    pub async fn connect(url: &str, database: &str) -> Result<Self, StoreError> {
        let options = ClientOptions::parse(url)
            .await
            .map_err(|e| StoreError::Initialization(e.to_string()))?;
        let client =
            Client::with_options(options).map_err(|e| StoreError::Initialization(e.to_string()))?;

        Ok(Self {
            client,
            database: database.to_string(),
        })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.client.database(&self.database).collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        self.collection(collection)
            .find(filter)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        self.collection(collection)
            .find_one(filter)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, StoreError> {
        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(result.inserted_id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<u64, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(result.matched_count)
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let result = self
            .collection(collection)
            .delete_one(filter)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(result.deleted_count)
    }

    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let result = self
            .collection(collection)
            .delete_many(filter)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(result.deleted_count)
    }
}
