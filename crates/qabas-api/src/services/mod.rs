// Services layer for business logic
// Services own server-side stamping and multi-document writes, calling storage directly

pub mod admin;
pub mod benefit;
pub mod form;
pub mod playlist;
pub mod podcast;
pub mod story;
pub mod video;

pub use admin::AdminService;
pub use benefit::BenefitService;
pub use form::FormService;
pub use playlist::PlaylistService;
pub use podcast::PodcastService;
pub use story::StoryService;
pub use video::VideoService;

use chrono::Utc;
use qabas_core::document::{to_fields, Fields};
use qabas_core::{Record, Result};
use qabas_storage::StorageBackend;
use serde::Serialize;

/// Serialize partial changes and stamp `updatedAt`
pub(crate) fn stamped_patch<T: Serialize>(collection: &str, changes: &T) -> Result<Fields> {
    let mut patch = to_fields(collection, changes)?;
    patch.insert("updatedAt".to_string(), serde_json::to_value(Utc::now())?);
    Ok(patch)
}

/// Apply stamped partial changes to a record; `None` if it does not exist
pub(crate) async fn update_stamped<T: Record, C: Serialize>(
    store: &StorageBackend,
    id: &str,
    changes: &C,
) -> Result<Option<T>> {
    let patch = stamped_patch(T::COLLECTION, changes)?;
    store
        .update(T::COLLECTION, id, patch)
        .await?
        .map(|doc| doc.decode())
        .transpose()
}

/// Cap a client-requested list size
pub(crate) fn clamp_limit(limit: Option<usize>) -> usize {
    limit
        .unwrap_or(crate::api::validation::DEFAULT_LIST_LIMIT)
        .clamp(1, crate::api::validation::MAX_LIST_LIMIT)
}
