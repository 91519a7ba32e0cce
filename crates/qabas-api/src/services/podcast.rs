// Podcast catalog service

use chrono::Utc;
use qabas_core::{collections, Direction, Podcast, Query, Result};
use qabas_storage::StorageBackend;

use super::{clamp_limit, update_stamped};
use crate::api::podcasts::{CreatePodcastRequest, PodcastChanges, PodcastListQuery};

pub struct PodcastService {
    store: StorageBackend,
}

impl PodcastService {
    pub fn new(store: StorageBackend) -> Self {
        Self { store }
    }

    /// Newest first, optionally filtered by category, season or featured flag
    pub async fn list(&self, filter: &PodcastListQuery) -> Result<Vec<Podcast>> {
        let mut query = Query::new().order_by("uploadedAt", Direction::Descending);
        if let Some(category) = &filter.category {
            query = query.where_eq("category", category.as_str());
        }
        if let Some(season) = filter.season {
            query = query.where_eq("seasonNumber", season);
        }
        if let Some(featured) = filter.featured {
            query = query.where_eq("featured", featured);
        }
        query = query.limit(clamp_limit(filter.limit));

        self.store.list_records(&query).await
    }

    pub async fn list_all(&self) -> Result<Vec<Podcast>> {
        self.store
            .list_records(&Query::new().order_by("uploadedAt", Direction::Descending))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Podcast>> {
        self.store.get_record(id).await
    }

    pub async fn create(&self, req: CreatePodcastRequest, uploaded_by: &str) -> Result<Podcast> {
        let podcast = Podcast {
            id: String::new(),
            title: req.title,
            description: req.description,
            category: req.category,
            duration: req.duration,
            episode_number: req.episode_number,
            season_number: req.season_number,
            audio_url: req.audio_url,
            cover_url: req.cover_url,
            listens: 0,
            featured: req.featured,
            uploaded_at: Utc::now(),
            updated_at: None,
            uploaded_by: Some(uploaded_by.to_string()),
        };

        let podcast = self.store.insert_record(&podcast).await?;
        tracing::info!(id = %podcast.id, uploaded_by = %uploaded_by, "Created podcast episode");
        Ok(podcast)
    }

    pub async fn update(&self, id: &str, changes: &PodcastChanges) -> Result<Option<Podcast>> {
        update_stamped(&self.store, id, changes).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let deleted = self.store.delete_record::<Podcast>(id).await?;
        if deleted {
            tracing::info!(id = %id, "Deleted podcast episode");
        }
        Ok(deleted)
    }

    /// Count one listen; returns the new total, `None` if the episode does not exist
    pub async fn record_listen(&self, id: &str) -> Result<Option<u64>> {
        let listens = self
            .store
            .increment(collections::PODCASTS, id, "listens", 1)
            .await?;
        Ok(listens.map(|v| v.max(0) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(title: &str, season: u32, episode: u32) -> CreatePodcastRequest {
        CreatePodcastRequest {
            title: title.to_string(),
            description: String::new(),
            category: "tazkiyah".to_string(),
            duration: "32:00".to_string(),
            episode_number: episode,
            season_number: season,
            audio_url: "https://cdn.example/ep.mp3".to_string(),
            cover_url: String::new(),
            featured: false,
        }
    }

    #[tokio::test]
    async fn test_list_by_season() {
        let service = PodcastService::new(StorageBackend::in_memory());
        service.create(episode("S1E1", 1, 1), "a@x.io").await.unwrap();
        service.create(episode("S2E1", 2, 1), "a@x.io").await.unwrap();

        let filter = PodcastListQuery {
            season: Some(2),
            ..Default::default()
        };
        let episodes = service.list(&filter).await.unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].title, "S2E1");
    }

    #[tokio::test]
    async fn test_record_listen() {
        let service = PodcastService::new(StorageBackend::in_memory());
        let podcast = service.create(episode("E", 1, 1), "a@x.io").await.unwrap();

        assert_eq!(service.record_listen(&podcast.id).await.unwrap(), Some(1));
        let fetched = service.get(&podcast.id).await.unwrap().unwrap();
        assert_eq!(fetched.listens, 1);
    }
}
