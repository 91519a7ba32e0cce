// PostgreSQL document store tests
// Run with: DATABASE_URL=postgres://... cargo test -p qabas-storage --test postgres_test -- --ignored

use qabas_core::document::Fields;
use qabas_core::{Direction, Filter, Query, StoreError, WriteBatch};
use qabas_storage::StorageBackend;
use serde_json::{json, Value};
use uuid::Uuid;

async fn backend() -> StorageBackend {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    StorageBackend::postgres(&url)
        .await
        .expect("Failed to connect to database")
}

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

/// Unique collection per test run so tests don't see each other's rows
fn collection(name: &str) -> String {
    format!("{}_{}", name, Uuid::now_v7().simple())
}

#[tokio::test]
#[ignore]
async fn test_query_filters_orders_and_limits() {
    let store = backend().await;
    let chapters = collection("chapters");

    for (order, story) in [(3, "s1"), (1, "s1"), (2, "s1"), (1, "s2")] {
        store
            .insert(&chapters, fields(json!({"storyId": story, "order": order})))
            .await
            .unwrap();
    }

    let docs = store
        .query(
            &chapters,
            &Query::new()
                .where_eq("storyId", "s1")
                .order_by("order", Direction::Ascending)
                .limit(2),
        )
        .await
        .unwrap();

    let orders: Vec<_> = docs.iter().map(|d| d.data["order"].clone()).collect();
    assert_eq!(orders, vec![json!(1), json!(2)]);
}

#[tokio::test]
#[ignore]
async fn test_increment_is_applied_in_place() {
    let store = backend().await;
    let videos = collection("videos");

    let doc = store
        .insert(&videos, fields(json!({"title": "t"})))
        .await
        .unwrap();

    assert_eq!(
        store.increment(&videos, &doc.id, "views", 1).await.unwrap(),
        Some(1)
    );
    assert_eq!(
        store.increment(&videos, &doc.id, "views", 1).await.unwrap(),
        Some(2)
    );
    assert_eq!(
        store.increment(&videos, "missing", "views", 1).await.unwrap(),
        None
    );
}

#[tokio::test]
#[ignore]
async fn test_failed_batch_rolls_back() {
    let store = backend().await;
    let stories = collection("coffeeStories");

    let story = store
        .insert(&stories, fields(json!({"title": "s"})))
        .await
        .unwrap();

    let mut batch = WriteBatch::new();
    batch
        .delete(&stories, &story.id)
        .update(&stories, "missing", fields(json!({"title": "x"})));

    let err = store.commit(batch).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert!(store.get(&stories, &story.id).await.unwrap().is_some());
}

#[tokio::test]
#[ignore]
async fn test_batch_cascade_and_counter() {
    let store = backend().await;
    let stories = collection("coffeeStories");
    let chapters = collection("chapters");

    store
        .set(&stories, "s1", fields(json!({"chapterCount": 0})))
        .await
        .unwrap();

    let mut batch = WriteBatch::new();
    batch
        .set(&chapters, "c1", fields(json!({"storyId": "s1"})))
        .increment(&stories, "s1", "chapterCount", 1);
    store.commit(batch).await.unwrap();
    let story = store.get(&stories, "s1").await.unwrap().unwrap();
    assert_eq!(story.data["chapterCount"], json!(1));

    let mut batch = WriteBatch::new();
    batch
        .delete(&stories, "s1")
        .delete_where(&chapters, vec![Filter::eq("storyId", "s1")]);
    store.commit(batch).await.unwrap();
    assert!(store.get(&chapters, "c1").await.unwrap().is_none());

    // Counting against the deleted story fails and takes the chapter write with it
    let mut batch = WriteBatch::new();
    batch
        .set(&chapters, "c2", fields(json!({"storyId": "s1"})))
        .increment(&stories, "s1", "chapterCount", 1);
    let err = store.commit(batch).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert!(store.get(&chapters, "c2").await.unwrap().is_none());
}
