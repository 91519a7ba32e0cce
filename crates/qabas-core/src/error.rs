// Error types for document storage

use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by a document store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// A batched update targeted a document that does not exist
    #[error("Document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// A record did not serialize to a JSON object
    #[error("Record for collection {0} is not a JSON object")]
    NotAnObject(String),

    /// A stored document could not be converted into a typed record
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend failure (connection, query, transaction)
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}
