// Podcast domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::collections;
use crate::document::Record;

/// A podcast episode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub episode_number: u32,
    #[serde(default)]
    pub season_number: u32,
    pub audio_url: String,
    #[serde(default)]
    pub cover_url: String,
    /// Listen counter, only ever incremented
    #[serde(default)]
    pub listens: u64,
    #[serde(default)]
    pub featured: bool,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
}

impl Record for Podcast {
    const COLLECTION: &'static str = collections::PODCASTS;
}
