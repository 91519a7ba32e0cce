// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// StorageBackend works with either PostgreSQL (production) or in-memory
// (dev mode) storage.

use std::sync::Arc;

use qabas_core::document::Fields;
use qabas_core::{Document, Query, Result, WriteBatch};
use uuid::Uuid;

use super::memory::InMemoryStore;
use super::repositories::Database;

/// Time-ordered document id (uuid v7), for batches that create documents
pub fn new_document_id() -> String {
    Uuid::now_v7().to_string()
}

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory store (dev mode)
    InMemory(Arc<InMemoryStore>),
}

impl StorageBackend {
    /// Connect to PostgreSQL and apply migrations
    pub async fn postgres(database_url: &str) -> anyhow::Result<Self> {
        let db = Database::from_url(database_url).await?;
        db.migrate().await?;
        Ok(Self::Postgres(db))
    }

    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryStore::new()))
    }

    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        match self {
            Self::Postgres(db) => db.get(collection, id).await,
            Self::InMemory(db) => db.get(collection, id).await,
        }
    }

    pub async fn query(&self, collection: &str, query: &Query) -> Result<Vec<Document>> {
        match self {
            Self::Postgres(db) => db.query(collection, query).await,
            Self::InMemory(db) => db.query(collection, query).await,
        }
    }

    /// Insert under a freshly generated id
    pub async fn insert(&self, collection: &str, data: Fields) -> Result<Document> {
        match self {
            Self::Postgres(db) => db.insert(collection, data).await,
            Self::InMemory(db) => db.insert(collection, data).await,
        }
    }

    /// Create or replace under a caller-chosen id
    pub async fn set(&self, collection: &str, id: &str, data: Fields) -> Result<Document> {
        match self {
            Self::Postgres(db) => db.set(collection, id, data).await,
            Self::InMemory(db) => db.set(collection, id, data).await,
        }
    }

    /// Shallow-merge `patch` into an existing document; `None` if it does not exist
    pub async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Fields,
    ) -> Result<Option<Document>> {
        match self {
            Self::Postgres(db) => db.update(collection, id, patch).await,
            Self::InMemory(db) => db.update(collection, id, patch).await,
        }
    }

    pub async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete(collection, id).await,
            Self::InMemory(db) => db.delete(collection, id).await,
        }
    }

    /// Atomically add `delta` to an integer field, returning the new value
    pub async fn increment(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> Result<Option<i64>> {
        match self {
            Self::Postgres(db) => db.increment(collection, id, field, delta).await,
            Self::InMemory(db) => db.increment(collection, id, field, delta).await,
        }
    }

    pub async fn commit(&self, batch: WriteBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }
        match self {
            Self::Postgres(db) => db.commit(batch).await,
            Self::InMemory(db) => db.commit(batch).await,
        }
    }
}
