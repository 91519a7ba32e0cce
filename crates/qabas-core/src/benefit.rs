// Benefit domain types
//
// A benefit is a short excerpt from a scholarly book, cited by volume and page,
// optionally followed by a scholar's comment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::collections;
use crate::document::Record;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Benefit {
    pub id: String,
    pub book_name: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub page: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub category: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
}

impl Record for Benefit {
    const COLLECTION: &'static str = collections::BENEFITS;
}
