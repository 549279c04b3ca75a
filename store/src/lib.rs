//! Document store client for the EdTech API.
//!
//! The store is an external schemaless database exposing per-collection CRUD
//! and simple equality/order queries. [`DocumentStore`] is the seam the HTTP
//! layer programs against; [`AppwriteStore`] talks to a real Appwrite
//! deployment over REST, and [`MemoryStore`] backs the integration test suite
//! with the same observable semantics.
//!
//! Documents are untyped JSON objects carrying the store's system attributes
//! (`$id`, `$createdAt`, `$updatedAt`) alongside user fields.

mod appwrite;
mod error;
mod memory;
mod query;

pub use appwrite::AppwriteStore;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use query::Query;

use async_trait::async_trait;
use serde_json::Value;

/// A page of documents plus the total match count.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DocumentList {
    pub documents: Vec<Value>,
    pub total: u64,
}

/// Per-collection CRUD against the document store.
///
/// `get` and `delete` fail with [`StoreError::NotFound`] when the id is
/// absent. `update` merges the provided attributes into the existing document
/// (the store performs no diffing beyond that). `create` with `id: None`
/// lets the store mint a unique identifier.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Value, StoreError>;

    async fn list(&self, collection: &str, queries: &[Query]) -> Result<DocumentList, StoreError>;

    async fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Value,
    ) -> Result<Value, StoreError>;

    async fn update(&self, collection: &str, id: &str, data: Value) -> Result<Value, StoreError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
