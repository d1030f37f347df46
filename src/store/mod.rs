//! Document store subsystem.
//!
//! # Data Flow
//! ```text
//! REST handler builds a filter / document
//!     → DocumentStore trait (this module)
//!     → mongo.rs (MongoDB-backed, production)
//!     → memory.rs (HashMap-backed, dev & tests)
//!     → Result<…, StoreError> back to the handler
//! ```
//!
//! # Design Decisions
//! - One trait object per mount, shared via Arc across requests
//! - Connection pooling is the MongoDB driver's job, not ours
//! - No retries: a failed store call surfaces as-is for that request
//! - Update is "merge": callers pass the fields to set, never a full
//!   replacement document

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use bson::{Bson, Document};
use thiserror::Error;

/// Errors that can occur when talking to a document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection establishment or URL parsing failed.
    #[error("store initialization error: {0}")]
    Initialization(String),

    /// The underlying backend rejected an operation.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Operations the REST layer needs from a document store.
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Return all documents in `collection` matching `filter`.
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, StoreError>;

    /// Return the first document matching `filter`, if any.
    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert one document. Returns the identifier under which it was
    /// stored (caller-supplied `_id`, or one assigned by the store).
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, StoreError>;

    /// Set the given fields on the first document matching `filter`.
    /// Returns the number of documents matched (0 or 1).
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<u64, StoreError>;

    /// Delete the first document matching `filter`. Returns the number
    /// of documents deleted (0 or 1).
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    /// Delete every document matching `filter`. Returns the delete count.
    async fn delete_many(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;
}
