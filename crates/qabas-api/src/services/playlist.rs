// Video playlists
// Decision: Membership lives on the video (`playlistId`); deleting a playlist detaches its videos in one batch

use chrono::Utc;
use qabas_core::document::Fields;
use qabas_core::{collections, Direction, Filter, Playlist, Query, Result, Video, WriteBatch};
use qabas_storage::StorageBackend;
use serde_json::Value;

use super::update_stamped;
use crate::api::playlists::{CreatePlaylistRequest, PlaylistChanges};

pub struct PlaylistService {
    store: StorageBackend,
}

impl PlaylistService {
    pub fn new(store: StorageBackend) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Playlist>> {
        self.store
            .list_records(&Query::new().order_by("createdAt", Direction::Descending))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Playlist>> {
        self.store.get_record(id).await
    }

    /// Member videos, oldest upload first
    pub async fn videos(&self, playlist_id: &str) -> Result<Vec<Video>> {
        self.store
            .list_records(
                &Query::new()
                    .where_eq("playlistId", playlist_id)
                    .order_by("uploadedAt", Direction::Ascending),
            )
            .await
    }

    pub async fn create(&self, req: CreatePlaylistRequest, uploaded_by: &str) -> Result<Playlist> {
        let playlist = Playlist {
            id: String::new(),
            title: req.title,
            description: req.description,
            thumbnail_url: req.thumbnail_url,
            created_at: Utc::now(),
            updated_at: None,
            uploaded_by: Some(uploaded_by.to_string()),
        };

        let playlist = self.store.insert_record(&playlist).await?;
        tracing::info!(id = %playlist.id, uploaded_by = %uploaded_by, "Created playlist");
        Ok(playlist)
    }

    pub async fn update(&self, id: &str, changes: &PlaylistChanges) -> Result<Option<Playlist>> {
        update_stamped(&self.store, id, changes).await
    }

    /// Detach member videos and delete the playlist atomically
    pub async fn delete(&self, id: &str) -> Result<bool> {
        if self.get(id).await?.is_none() {
            return Ok(false);
        }

        let mut detach = Fields::new();
        detach.insert("playlistId".to_string(), Value::Null);

        let mut batch = WriteBatch::new();
        batch
            .update_where(collections::VIDEOS, vec![Filter::eq("playlistId", id)], detach)
            .delete(collections::PLAYLISTS, id);
        self.store.commit(batch).await?;

        tracing::info!(id = %id, "Deleted playlist");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::videos::CreateVideoRequest;
    use crate::services::VideoService;

    #[tokio::test]
    async fn test_delete_detaches_member_videos() {
        let store = StorageBackend::in_memory();
        let playlists = PlaylistService::new(store.clone());
        let videos = VideoService::new(store);

        let playlist = playlists
            .create(
                CreatePlaylistRequest {
                    title: "سلسلة الفقه".to_string(),
                    description: String::new(),
                    thumbnail_url: String::new(),
                },
                "a@x.io",
            )
            .await
            .unwrap();

        let video = videos
            .create(
                CreateVideoRequest {
                    title: "1".to_string(),
                    description: String::new(),
                    category: "fiqh".to_string(),
                    duration: String::new(),
                    url: "https://cdn.example/1.mp4".to_string(),
                    thumbnail_url: String::new(),
                    featured: false,
                    playlist_id: Some(playlist.id.clone()),
                },
                "a@x.io",
            )
            .await
            .unwrap();

        assert_eq!(playlists.videos(&playlist.id).await.unwrap().len(), 1);

        assert!(playlists.delete(&playlist.id).await.unwrap());
        assert!(playlists.get(&playlist.id).await.unwrap().is_none());

        let detached = videos.get(&video.id).await.unwrap().unwrap();
        assert!(detached.playlist_id.is_none());
    }
}
