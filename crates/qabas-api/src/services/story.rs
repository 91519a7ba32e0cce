// Coffee stories and their chapters
// Decision: chapterCount moves in the same batch as the chapter write, never by read-then-write
// Decision: Deleting a story removes its chapters in the same batch, matched at commit time

use chrono::Utc;
use qabas_core::document::{to_fields, Fields};
use qabas_core::{
    collections, Chapter, CoffeeStory, Direction, Filter, Query, Result, StoreError, WriteBatch,
};
use qabas_storage::{new_document_id, StorageBackend};

use super::update_stamped;
use crate::api::stories::{
    ChapterChanges, CreateChapterRequest, CreateStoryRequest, StoryChanges,
};

pub struct StoryService {
    store: StorageBackend,
}

impl StoryService {
    pub fn new(store: StorageBackend) -> Self {
        Self { store }
    }

    /// Every story, newest first
    pub async fn list(&self) -> Result<Vec<CoffeeStory>> {
        self.store
            .list_records(&Query::new().order_by("createdAt", Direction::Descending))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Option<CoffeeStory>> {
        self.store.get_record(id).await
    }

    /// Chapters of a story in reading order
    pub async fn list_chapters(&self, story_id: &str) -> Result<Vec<Chapter>> {
        self.store
            .list_records(
                &Query::new()
                    .where_eq("storyId", story_id)
                    .order_by("order", Direction::Ascending),
            )
            .await
    }

    pub async fn create(&self, req: CreateStoryRequest, uploaded_by: &str) -> Result<CoffeeStory> {
        let story = CoffeeStory {
            id: String::new(),
            title: req.title,
            author: req.author,
            summary: req.summary,
            cover_url: req.cover_url,
            chapter_count: 0,
            created_at: Utc::now(),
            updated_at: None,
            uploaded_by: Some(uploaded_by.to_string()),
        };

        let story = self.store.insert_record(&story).await?;
        tracing::info!(id = %story.id, uploaded_by = %uploaded_by, "Created story");
        Ok(story)
    }

    pub async fn update(&self, id: &str, changes: &StoryChanges) -> Result<Option<CoffeeStory>> {
        update_stamped(&self.store, id, changes).await
    }

    /// Delete a story together with every chapter pointing at it
    pub async fn delete(&self, id: &str) -> Result<bool> {
        if self.get(id).await?.is_none() {
            return Ok(false);
        }

        // Story first: its row lock orders this against a concurrent chapter create
        let mut batch = WriteBatch::new();
        batch
            .delete(collections::COFFEE_STORIES, id)
            .delete_where(collections::CHAPTERS, vec![Filter::eq("storyId", id)]);
        self.store.commit(batch).await?;

        tracing::info!(id = %id, "Deleted story");
        Ok(true)
    }

    /// Add a chapter; `None` if the story does not exist.
    /// Without an explicit order the chapter goes after the current last one.
    pub async fn create_chapter(&self, req: CreateChapterRequest) -> Result<Option<Chapter>> {
        let Some(story) = self.get(&req.story_id).await? else {
            return Ok(None);
        };

        let order = match req.order {
            Some(order) => order,
            None => self
                .list_chapters(&story.id)
                .await?
                .iter()
                .map(|c| c.order)
                .max()
                .map_or(1, |last| last + 1),
        };

        let chapter = Chapter {
            id: new_document_id(),
            story_id: story.id.clone(),
            title: req.title,
            content: req.content,
            order,
            created_at: Utc::now(),
            updated_at: None,
        };

        // The increment fails the batch if the story was deleted after the read above
        let mut batch = WriteBatch::new();
        batch
            .set(
                collections::CHAPTERS,
                &chapter.id,
                to_fields(collections::CHAPTERS, &chapter)?,
            )
            .increment(collections::COFFEE_STORIES, &story.id, "chapterCount", 1);
        match self.store.commit(batch).await {
            Ok(()) => {}
            Err(StoreError::NotFound { .. }) => {
                tracing::debug!(story_id = %story.id, "Story deleted before its chapter was added");
                return Ok(None);
            }
            Err(e) => return Err(e),
        }

        tracing::info!(id = %chapter.id, story_id = %story.id, order, "Created chapter");
        Ok(Some(chapter))
    }

    pub async fn update_chapter(
        &self,
        id: &str,
        changes: &ChapterChanges,
    ) -> Result<Option<Chapter>> {
        update_stamped(&self.store, id, changes).await
    }

    /// Delete a chapter and decrement its story's chapter count
    pub async fn delete_chapter(&self, id: &str) -> Result<bool> {
        let Some(chapter) = self.store.get_record::<Chapter>(id).await? else {
            return Ok(false);
        };

        // The empty update fails the batch if a concurrent delete removed the chapter first
        let mut batch = WriteBatch::new();
        batch
            .update(collections::CHAPTERS, id, Fields::new())
            .delete(collections::CHAPTERS, id)
            .increment(
                collections::COFFEE_STORIES,
                &chapter.story_id,
                "chapterCount",
                -1,
            );
        match self.store.commit(batch).await {
            Ok(()) => {}
            Err(StoreError::NotFound { collection, .. }) if collection == collections::CHAPTERS => {
                return Ok(false);
            }
            Err(StoreError::NotFound { .. }) => {
                tracing::warn!(id = %id, story_id = %chapter.story_id, "Deleted chapter of a missing story");
                return self.store.delete_record::<Chapter>(id).await;
            }
            Err(e) => return Err(e),
        }

        tracing::info!(id = %id, story_id = %chapter.story_id, "Deleted chapter");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story_request(title: &str) -> CreateStoryRequest {
        CreateStoryRequest {
            title: title.to_string(),
            author: "أحمد".to_string(),
            summary: String::new(),
            cover_url: String::new(),
        }
    }

    fn chapter_request(story_id: &str, title: &str, order: Option<u32>) -> CreateChapterRequest {
        CreateChapterRequest {
            story_id: story_id.to_string(),
            title: title.to_string(),
            content: "...".to_string(),
            order,
        }
    }

    #[tokio::test]
    async fn test_chapter_count_tracks_creates_and_deletes() {
        let service = StoryService::new(StorageBackend::in_memory());
        let story = service.create(story_request("قهوة"), "a@x.io").await.unwrap();

        let first = service
            .create_chapter(chapter_request(&story.id, "1", None))
            .await
            .unwrap()
            .unwrap();
        let second = service
            .create_chapter(chapter_request(&story.id, "2", None))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.order, 1);
        assert_eq!(second.order, 2);
        assert_eq!(service.get(&story.id).await.unwrap().unwrap().chapter_count, 2);

        assert!(service.delete_chapter(&first.id).await.unwrap());
        assert_eq!(service.get(&story.id).await.unwrap().unwrap().chapter_count, 1);
        assert!(!service.delete_chapter(&first.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_chapter_for_missing_story() {
        let service = StoryService::new(StorageBackend::in_memory());
        let created = service
            .create_chapter(chapter_request("missing", "1", None))
            .await
            .unwrap();
        assert!(created.is_none());
    }

    #[tokio::test]
    async fn test_chapters_listed_in_order() {
        let service = StoryService::new(StorageBackend::in_memory());
        let story = service.create(story_request("s"), "a@x.io").await.unwrap();
        for (title, order) in [("c", 3), ("a", 1), ("b", 2)] {
            service
                .create_chapter(chapter_request(&story.id, title, Some(order)))
                .await
                .unwrap();
        }

        let titles: Vec<_> = service
            .list_chapters(&story.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_delete_story_cascades_to_its_chapters_only() {
        let service = StoryService::new(StorageBackend::in_memory());
        let doomed = service.create(story_request("doomed"), "a@x.io").await.unwrap();
        let kept = service.create(story_request("kept"), "a@x.io").await.unwrap();

        for n in 0..3 {
            service
                .create_chapter(chapter_request(&doomed.id, &format!("d{n}"), None))
                .await
                .unwrap();
        }
        service
            .create_chapter(chapter_request(&kept.id, "k", None))
            .await
            .unwrap();

        assert!(service.delete(&doomed.id).await.unwrap());
        assert!(service.get(&doomed.id).await.unwrap().is_none());
        assert!(service.list_chapters(&doomed.id).await.unwrap().is_empty());
        assert_eq!(service.list_chapters(&kept.id).await.unwrap().len(), 1);

        assert!(!service.delete(&doomed.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_chapter_of_missing_story() {
        let store = StorageBackend::in_memory();
        let service = StoryService::new(store.clone());
        store
            .set(
                collections::CHAPTERS,
                "orphan",
                to_fields(
                    collections::CHAPTERS,
                    &Chapter {
                        id: "orphan".to_string(),
                        story_id: "gone".to_string(),
                        title: "t".to_string(),
                        content: String::new(),
                        order: 1,
                        created_at: Utc::now(),
                        updated_at: None,
                    },
                )
                .unwrap(),
            )
            .await
            .unwrap();

        assert!(service.delete_chapter("orphan").await.unwrap());
        assert!(store.get(collections::CHAPTERS, "orphan").await.unwrap().is_none());
        assert!(!service.delete_chapter("orphan").await.unwrap());
    }

    #[tokio::test]
    async fn test_chapter_added_after_story_delete_is_not_kept() {
        let store = StorageBackend::in_memory();
        let service = StoryService::new(store.clone());
        let story = service.create(story_request("s"), "a@x.io").await.unwrap();
        service
            .create_chapter(chapter_request(&story.id, "1", None))
            .await
            .unwrap();

        assert!(service.delete(&story.id).await.unwrap());
        let created = service
            .create_chapter(chapter_request(&story.id, "late", None))
            .await
            .unwrap();
        assert!(created.is_none());
        assert!(store
            .query(collections::CHAPTERS, &Query::new().where_eq("storyId", story.id.as_str()))
            .await
            .unwrap()
            .is_empty());
    }
}
