// Coffee story domain types
//
// Chapters reference their story through `story_id`. The story keeps a derived
// `chapter_count` that is adjusted whenever chapters are added or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::collections;
use crate::document::Record;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CoffeeStory {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub cover_url: String,
    #[serde(default)]
    pub chapter_count: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
}

impl Record for CoffeeStory {
    const COLLECTION: &'static str = collections::COFFEE_STORIES;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub story_id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Position within the story, ascending
    #[serde(default)]
    pub order: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record for Chapter {
    const COLLECTION: &'static str = collections::CHAPTERS;
}
