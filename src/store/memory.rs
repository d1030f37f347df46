//! In-memory document store.
//!
//! # Responsibilities
//! - Back mounts in tests and local development without a mongod
//! - Mirror MongoDB's observable behavior for the operations we use
//!
//! # Design Decisions
//! - Plain linear scans; collections here are test-sized
//! - Filter evaluation is per-field BSON equality with AND semantics
//! - `_id` is assigned an ObjectId when absent, same as the driver

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use crate::store::{DocumentStore, StoreError};

type Collections = HashMap<String, Vec<Document>>;

/// HashMap-backed document store, shareable across tasks.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// True when every field constraint in `filter` equals the corresponding
/// document field. An empty filter matches everything.
fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| matches(d, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<Bson, StoreError> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|d| d.get("_id") == Some(&id)) {
            return Err(StoreError::Backend(format!(
                "duplicate key: _id {} already exists in {}",
                id, collection
            )));
        }
        docs.push(document);

        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let Some(target) = docs.iter_mut().find(|d| matches(d, &filter)) else {
            return Ok(0);
        };

        for (field, value) in fields {
            if field != "_id" {
                target.insert(field, value);
            }
        }

        Ok(1)
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|d| matches(d, &filter)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|d| !matches(d, &filter));

        Ok((before - docs.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[tokio::test]
    async fn insert_assigns_object_id_when_absent() {
        let store = MemoryStore::new();
        let id = store
            .insert_one("things", doc! { "name": "no id" })
            .await
            .unwrap();
        assert!(matches!(id, Bson::ObjectId(_)));

        let found = store
            .find_one("things", doc! { "_id": id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_str("name").unwrap(), "no id");
    }

    #[tokio::test]
    async fn insert_keeps_caller_assigned_id() {
        let store = MemoryStore::new();
        let id = store
            .insert_one("things", doc! { "_id": "id-1", "n": 1 })
            .await
            .unwrap();
        assert_eq!(id, Bson::String("id-1".into()));
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let store = MemoryStore::new();
        store
            .insert_one("things", doc! { "_id": "id-1" })
            .await
            .unwrap();
        let err = store.insert_one("things", doc! { "_id": "id-1" }).await;
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn filter_is_per_field_equality() {
        let store = MemoryStore::new();
        store
            .insert_one("things", doc! { "_id": "a", "kind": "x", "live": true })
            .await
            .unwrap();
        store
            .insert_one("things", doc! { "_id": "b", "kind": "x", "live": false })
            .await
            .unwrap();

        let both = store
            .find("things", doc! { "kind": "x" })
            .await
            .unwrap();
        assert_eq!(both.len(), 2);

        let one = store
            .find("things", doc! { "kind": "x", "live": true })
            .await
            .unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].get_str("_id").unwrap(), "a");

        // Strings never equal numbers; the store does not coerce.
        let none = store.find("things", doc! { "live": "true" }).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn update_merges_fields_and_preserves_id() {
        let store = MemoryStore::new();
        store
            .insert_one("things", doc! { "_id": "a", "n": 1, "keep": "yes" })
            .await
            .unwrap();

        let matched = store
            .update_one(
                "things",
                doc! { "_id": "a" },
                doc! { "n": 2, "_id": "evil" },
            )
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let updated = store
            .find_one("things", doc! { "_id": "a" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.get_i32("n").unwrap(), 2);
        assert_eq!(updated.get_str("keep").unwrap(), "yes");
    }

    #[tokio::test]
    async fn delete_one_is_idempotent_observable() {
        let store = MemoryStore::new();
        store
            .insert_one("things", doc! { "_id": "a" })
            .await
            .unwrap();

        assert_eq!(
            store.delete_one("things", doc! { "_id": "a" }).await.unwrap(),
            1
        );
        assert_eq!(
            store.delete_one("things", doc! { "_id": "a" }).await.unwrap(),
            0
        );
    }
}
