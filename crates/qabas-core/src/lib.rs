// Qabas core types
//
// Key design decisions:
// - Content records (videos, podcasts, benefits, stories, forms) are plain serde types
// - The document store is modelled as collections of flat JSON documents (Document, Query)
// - The identity provider is a trait so the API can run against any token issuer
// - Error types are per concern (StoreError, IdentityError)

pub mod collections;
pub mod document;
pub mod error;
pub mod identity;

// Domain entity types
pub mod benefit;
pub mod forms;
pub mod playlist;
pub mod podcast;
pub mod story;
pub mod video;

pub use benefit::Benefit;
pub use document::{Direction, Document, Filter, OrderBy, Query, Record, WriteBatch, WriteOp};
pub use error::{Result, StoreError};
pub use forms::{ContactForm, ContactStatus, JoinRequest, JoinStatus};
pub use identity::{IdentityClaims, IdentityError, IdentityProvider, Principal};
pub use playlist::Playlist;
pub use podcast::Podcast;
pub use story::{Chapter, CoffeeStory};
pub use video::Video;
