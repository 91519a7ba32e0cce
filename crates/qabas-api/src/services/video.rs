// Video catalog service

use chrono::Utc;
use qabas_core::{collections, Direction, Query, Result, Video};
use qabas_storage::StorageBackend;
use serde_json::Value;

use super::{clamp_limit, stamped_patch};
use crate::api::videos::{CreateVideoRequest, VideoChanges, VideoListQuery};

pub struct VideoService {
    store: StorageBackend,
}

impl VideoService {
    pub fn new(store: StorageBackend) -> Self {
        Self { store }
    }

    /// Newest first, optionally filtered by category, featured flag or playlist
    pub async fn list(&self, filter: &VideoListQuery) -> Result<Vec<Video>> {
        let mut query = Query::new().order_by("uploadedAt", Direction::Descending);
        if let Some(category) = &filter.category {
            query = query.where_eq("category", category.as_str());
        }
        if let Some(featured) = filter.featured {
            query = query.where_eq("featured", featured);
        }
        if let Some(playlist_id) = &filter.playlist_id {
            query = query.where_eq("playlistId", playlist_id.as_str());
        }
        query = query.limit(clamp_limit(filter.limit));

        self.store.list_records(&query).await
    }

    /// Every video, newest first
    pub async fn list_all(&self) -> Result<Vec<Video>> {
        self.store
            .list_records(&Query::new().order_by("uploadedAt", Direction::Descending))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Video>> {
        self.store.get_record(id).await
    }

    pub async fn create(&self, req: CreateVideoRequest, uploaded_by: &str) -> Result<Video> {
        let video = Video {
            id: String::new(),
            title: req.title,
            description: req.description,
            category: req.category,
            duration: req.duration,
            url: req.url,
            thumbnail_url: req.thumbnail_url,
            views: 0,
            featured: req.featured,
            playlist_id: req.playlist_id.filter(|p| !p.is_empty()),
            uploaded_at: Utc::now(),
            updated_at: None,
            uploaded_by: Some(uploaded_by.to_string()),
        };

        let video = self.store.insert_record(&video).await?;
        tracing::info!(id = %video.id, uploaded_by = %uploaded_by, "Created video");
        Ok(video)
    }

    /// Apply admin changes; an empty `playlistId` removes the video from its playlist
    pub async fn update(&self, id: &str, changes: &VideoChanges) -> Result<Option<Video>> {
        let mut patch = stamped_patch(collections::VIDEOS, changes)?;
        if matches!(patch.get("playlistId"), Some(Value::String(p)) if p.is_empty()) {
            patch.insert("playlistId".to_string(), Value::Null);
        }

        self.store
            .update(collections::VIDEOS, id, patch)
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let deleted = self.store.delete_record::<Video>(id).await?;
        if deleted {
            tracing::info!(id = %id, "Deleted video");
        }
        Ok(deleted)
    }

    /// Count one view; returns the new total, `None` if the video does not exist
    pub async fn record_view(&self, id: &str) -> Result<Option<u64>> {
        let views = self
            .store
            .increment(collections::VIDEOS, id, "views", 1)
            .await?;
        Ok(views.map(|v| v.max(0) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(title: &str, category: &str) -> CreateVideoRequest {
        CreateVideoRequest {
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            duration: "12:30".to_string(),
            url: "https://cdn.example/video.mp4".to_string(),
            thumbnail_url: String::new(),
            featured: false,
            playlist_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_stamps_server_fields() {
        let service = VideoService::new(StorageBackend::in_memory());
        let video = service
            .create(create_request("Tafsir", "quran"), "admin@example.com")
            .await
            .unwrap();

        assert_eq!(video.views, 0);
        assert_eq!(video.uploaded_by.as_deref(), Some("admin@example.com"));
        assert!(video.updated_at.is_none());
    }

    #[tokio::test]
    async fn test_record_view_only_increases() {
        let service = VideoService::new(StorageBackend::in_memory());
        let video = service
            .create(create_request("Seerah", "seerah"), "admin@example.com")
            .await
            .unwrap();

        assert_eq!(service.record_view(&video.id).await.unwrap(), Some(1));
        assert_eq!(service.record_view(&video.id).await.unwrap(), Some(2));
        assert_eq!(service.record_view("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_cannot_touch_views_and_clears_playlist() {
        let service = VideoService::new(StorageBackend::in_memory());
        let mut req = create_request("Fiqh", "fiqh");
        req.playlist_id = Some("p1".to_string());
        let video = service.create(req, "admin@example.com").await.unwrap();
        service.record_view(&video.id).await.unwrap();

        let changes = VideoChanges {
            title: Some("Fiqh 101".to_string()),
            playlist_id: Some(String::new()),
            ..Default::default()
        };
        let updated = service.update(&video.id, &changes).await.unwrap().unwrap();

        assert_eq!(updated.title, "Fiqh 101");
        assert_eq!(updated.views, 1);
        assert!(updated.playlist_id.is_none());
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let service = VideoService::new(StorageBackend::in_memory());
        service
            .create(create_request("A", "fiqh"), "a@example.com")
            .await
            .unwrap();
        service
            .create(create_request("B", "seerah"), "a@example.com")
            .await
            .unwrap();

        let filter = VideoListQuery {
            category: Some("fiqh".to_string()),
            ..Default::default()
        };
        let videos = service.list(&filter).await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title, "A");
    }
}
