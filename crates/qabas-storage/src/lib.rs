// Document storage for Qabas
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - Database: PostgreSQL documents table with a JSONB body
// - InMemoryStore: parking_lot-guarded maps, lost on restart
// - StorageBackend: enum dispatch over both, plus typed record helpers

pub mod backend;
pub mod memory;
pub mod records;
pub mod repositories;

pub use backend::{new_document_id, StorageBackend};
pub use memory::InMemoryStore;
pub use repositories::Database;
