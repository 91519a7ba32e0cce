// Typed record helpers over the document backend

use qabas_core::document::to_fields;
use qabas_core::{Document, Query, Record, Result};
use serde::Serialize;

use super::backend::StorageBackend;

impl StorageBackend {
    pub async fn get_record<T: Record>(&self, id: &str) -> Result<Option<T>> {
        self.get(T::COLLECTION, id)
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    pub async fn list_records<T: Record>(&self, query: &Query) -> Result<Vec<T>> {
        self.query(T::COLLECTION, query)
            .await?
            .iter()
            .map(Document::decode)
            .collect()
    }

    /// Store a new record; the record's own `id` is replaced by the generated one
    pub async fn insert_record<T: Record>(&self, record: &T) -> Result<T> {
        let fields = to_fields(T::COLLECTION, record)?;
        self.insert(T::COLLECTION, fields).await?.decode()
    }

    /// Merge a serializable patch into a record; `None` if the record does not exist
    pub async fn update_record<T: Record, P: Serialize>(
        &self,
        id: &str,
        patch: &P,
    ) -> Result<Option<T>> {
        let fields = to_fields(T::COLLECTION, patch)?;
        self.update(T::COLLECTION, id, fields)
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    pub async fn delete_record<T: Record>(&self, id: &str) -> Result<bool> {
        self.delete(T::COLLECTION, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use qabas_core::{Direction, Video};
    use serde_json::json;

    fn video(title: &str, category: &str, minutes_ago: i64) -> Video {
        Video {
            id: String::new(),
            title: title.to_string(),
            description: String::new(),
            category: category.to_string(),
            duration: "10:00".to_string(),
            url: "https://videos.example/v.mp4".to_string(),
            thumbnail_url: String::new(),
            views: 0,
            featured: false,
            playlist_id: None,
            uploaded_at: Utc::now() - Duration::minutes(minutes_ago),
            updated_at: None,
            uploaded_by: None,
        }
    }

    #[tokio::test]
    async fn test_insert_record_assigns_id() {
        let store = StorageBackend::in_memory();
        let stored = store.insert_record(&video("Fiqh 1", "fiqh", 0)).await.unwrap();
        assert!(!stored.id.is_empty());

        let fetched: Video = store.get_record(&stored.id).await.unwrap().unwrap();
        assert_eq!(fetched, stored);
    }

    #[tokio::test]
    async fn test_update_record_applies_partial_patch() {
        let store = StorageBackend::in_memory();
        let stored = store.insert_record(&video("Old", "fiqh", 0)).await.unwrap();

        let updated: Video = store
            .update_record(&stored.id, &json!({"title": "New"}))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "New");
        assert_eq!(updated.category, "fiqh");

        let missing: Option<Video> = store
            .update_record("missing", &json!({"title": "x"}))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_records_by_category() {
        let store = StorageBackend::in_memory();
        store.insert_record(&video("A", "fiqh", 30)).await.unwrap();
        store.insert_record(&video("B", "seerah", 20)).await.unwrap();
        store.insert_record(&video("C", "fiqh", 10)).await.unwrap();

        let videos: Vec<Video> = store
            .list_records(
                &Query::new()
                    .where_eq("category", "fiqh")
                    .order_by("uploadedAt", Direction::Ascending),
            )
            .await
            .unwrap();
        let titles: Vec<_> = videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }
}
