// Video catalog HTTP routes
// Decision: A PUT carrying only `id` and `views` is a public view count, not an admin edit

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use qabas_core::Video;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common::{
    ApiError, ApiJson, ApiQuery, ErrorResponse, IdQuery, ListResponse, SuccessResponse,
};
use super::validation::{
    validate_max, validate_required, validate_url, ValidationError, MAX_DESCRIPTION_BYTES,
    MAX_TITLE_BYTES,
};
use crate::app::AppState;
use crate::auth::{AdminUser, AuthError, SessionOutcome};

/// Request to create a video
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    #[schema(example = "شرح الأربعين النووية - الدرس الأول")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[schema(example = "hadith")]
    pub category: String,
    /// Display duration, e.g. `45:10`
    #[serde(default)]
    pub duration: String,
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub playlist_id: Option<String>,
}

impl CreateVideoRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_required("title", &self.title, MAX_TITLE_BYTES)?;
        validate_max("description", &self.description, MAX_DESCRIPTION_BYTES)?;
        validate_max("category", &self.category, MAX_TITLE_BYTES)?;
        validate_required("url", &self.url, MAX_TITLE_BYTES * 2)?;
        validate_url("url", &self.url)?;
        validate_url("thumbnailUrl", &self.thumbnail_url)
    }
}

/// Editable video fields. Only provided fields are updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    /// Empty string removes the video from its playlist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
}

impl VideoChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.duration.is_none()
            && self.url.is_none()
            && self.thumbnail_url.is_none()
            && self.featured.is_none()
            && self.playlist_id.is_none()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_required("title", title, MAX_TITLE_BYTES)?;
        }
        if let Some(description) = &self.description {
            validate_max("description", description, MAX_DESCRIPTION_BYTES)?;
        }
        if let Some(category) = &self.category {
            validate_max("category", category, MAX_TITLE_BYTES)?;
        }
        if let Some(url) = &self.url {
            validate_required("url", url, MAX_TITLE_BYTES * 2)?;
            validate_url("url", url)?;
        }
        if let Some(thumbnail_url) = &self.thumbnail_url {
            validate_url("thumbnailUrl", thumbnail_url)?;
        }
        Ok(())
    }
}

/// Request to update a video
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    pub id: String,
    #[serde(flatten)]
    pub changes: VideoChanges,
    /// Present with no other changes to count one view anonymously.
    /// The value itself is ignored; counters only grow by one.
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub views: Option<serde_json::Value>,
}

impl UpdateVideoRequest {
    pub fn is_view_only(&self) -> bool {
        self.views.is_some() && self.changes.is_empty()
    }
}

/// Query parameters for listing videos
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VideoListQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub playlist_id: Option<String>,
    /// Maximum number of videos (default 50, max 200)
    pub limit: Option<usize>,
}

/// Current view count of a video
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ViewCountResponse {
    pub id: String,
    pub views: u64,
}

/// Result of a video PUT: the updated record, or the new view count
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum UpdateVideoResponse {
    Updated(Video),
    ViewCounted(ViewCountResponse),
}

/// Public video routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/videos", get(list_videos))
        .route("/api/videos/:video_id", get(get_video))
        .route("/api/videos/:video_id/view", post(record_view))
}

/// Admin video routes (behind the session middleware)
pub fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/api/admin/videos",
        get(admin_list_videos)
            .post(create_video)
            .put(update_video)
            .delete(delete_video),
    )
}

/// GET /api/videos - List videos, newest first
#[utoipa::path(
    get,
    path = "/api/videos",
    params(VideoListQuery),
    responses(
        (status = 200, description = "List of videos", body = ListResponse<Video>),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "videos"
)]
pub async fn list_videos(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<VideoListQuery>,
) -> Result<Json<ListResponse<Video>>, ApiError> {
    let videos = state.videos.list(&filter).await?;
    Ok(Json(videos.into()))
}

/// GET /api/videos/{video_id} - Get a video
#[utoipa::path(
    get,
    path = "/api/videos/{video_id}",
    params(("video_id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video found", body = Video),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    tag = "videos"
)]
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<Video>, ApiError> {
    let video = state.videos.get(&video_id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(video))
}

/// POST /api/videos/{video_id}/view - Count one view
#[utoipa::path(
    post,
    path = "/api/videos/{video_id}/view",
    params(("video_id" = String, Path, description = "Video ID")),
    responses(
        (status = 200, description = "View counted", body = ViewCountResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    tag = "videos"
)]
pub async fn record_view(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<ViewCountResponse>, ApiError> {
    let views = state
        .videos
        .record_view(&video_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(ViewCountResponse { id: video_id, views }))
}

/// GET /api/admin/videos - List every video
#[utoipa::path(
    get,
    path = "/api/admin/videos",
    responses(
        (status = 200, description = "List of videos", body = ListResponse<Video>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn admin_list_videos(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<ListResponse<Video>>, ApiError> {
    let videos = state.videos.list_all().await?;
    Ok(Json(videos.into()))
}

/// POST /api/admin/videos - Create a video
#[utoipa::path(
    post,
    path = "/api/admin/videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video created", body = Video),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_video(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(req): ApiJson<CreateVideoRequest>,
) -> Result<(StatusCode, Json<Video>), ApiError> {
    req.validate()?;
    let video = state.videos.create(req, &admin.email).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

/// PUT /api/admin/videos - Update a video, or count a view when only `views` is sent
#[utoipa::path(
    put,
    path = "/api/admin/videos",
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Video updated, or view counted for a view-only body", body = UpdateVideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_video(
    State(state): State<AppState>,
    SessionOutcome(session): SessionOutcome,
    ApiJson(req): ApiJson<UpdateVideoRequest>,
) -> Result<Json<UpdateVideoResponse>, ApiError> {
    if req.is_view_only() {
        let views = state
            .videos
            .record_view(&req.id)
            .await?
            .ok_or(ApiError::NotFound)?;
        return Ok(Json(UpdateVideoResponse::ViewCounted(ViewCountResponse {
            id: req.id,
            views,
        })));
    }

    let admin = session?;
    if !state.admins.is_admin(&admin).await? {
        return Err(AuthError::NotAdmin.into());
    }

    req.changes.validate()?;
    let video = state
        .videos
        .update(&req.id, &req.changes)
        .await?
        .ok_or(ApiError::NotFound)?;

    tracing::info!(id = %video.id, updated_by = %admin.email, "Updated video");
    Ok(Json(UpdateVideoResponse::Updated(video)))
}

/// DELETE /api/admin/videos?id= - Delete a video
#[utoipa::path(
    delete,
    path = "/api/admin/videos",
    params(IdQuery),
    responses(
        (status = 200, description = "Video deleted", body = SuccessResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_video(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(IdQuery { id }): ApiQuery<IdQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !state.videos.delete(&id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SuccessResponse::new(id)))
}
