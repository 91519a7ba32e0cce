// Podcast catalog HTTP routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use qabas_core::Podcast;
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
use crate::auth::AdminUser;

/// Request to create a podcast episode
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePodcastRequest {
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
    #[serde(default)]
    pub featured: bool,
}

impl CreatePodcastRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_required("title", &self.title, MAX_TITLE_BYTES)?;
        validate_max("description", &self.description, MAX_DESCRIPTION_BYTES)?;
        validate_required("audioUrl", &self.audio_url, MAX_TITLE_BYTES * 2)?;
        validate_url("audioUrl", &self.audio_url)?;
        validate_url("coverUrl", &self.cover_url)
    }
}

/// Editable podcast fields. Listen counts are not editable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PodcastChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl PodcastChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_required("title", title, MAX_TITLE_BYTES)?;
        }
        if let Some(description) = &self.description {
            validate_max("description", description, MAX_DESCRIPTION_BYTES)?;
        }
        if let Some(audio_url) = &self.audio_url {
            validate_required("audioUrl", audio_url, MAX_TITLE_BYTES * 2)?;
            validate_url("audioUrl", audio_url)?;
        }
        if let Some(cover_url) = &self.cover_url {
            validate_url("coverUrl", cover_url)?;
        }
        Ok(())
    }
}

/// Request to update a podcast episode
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePodcastRequest {
    pub id: String,
    #[serde(flatten)]
    pub changes: PodcastChanges,
}

/// Query parameters for listing podcast episodes
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PodcastListQuery {
    pub category: Option<String>,
    /// Season number
    pub season: Option<u32>,
    pub featured: Option<bool>,
    pub limit: Option<usize>,
}

/// Current listen count of an episode
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListenCountResponse {
    pub id: String,
    pub listens: u64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/podcasts", get(list_podcasts))
        .route("/api/podcasts/:podcast_id", get(get_podcast))
        .route("/api/podcasts/:podcast_id/listen", post(record_listen))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/api/admin/podcasts",
        get(admin_list_podcasts)
            .post(create_podcast)
            .put(update_podcast)
            .delete(delete_podcast),
    )
}

/// GET /api/podcasts - List podcast episodes, newest first
#[utoipa::path(
    get,
    path = "/api/podcasts",
    params(PodcastListQuery),
    responses(
        (status = 200, description = "List of episodes", body = ListResponse<Podcast>),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "podcasts"
)]
pub async fn list_podcasts(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<PodcastListQuery>,
) -> Result<Json<ListResponse<Podcast>>, ApiError> {
    Ok(Json(state.podcasts.list(&filter).await?.into()))
}

/// GET /api/podcasts/{podcast_id} - Get a podcast episode
#[utoipa::path(
    get,
    path = "/api/podcasts/{podcast_id}",
    params(("podcast_id" = String, Path, description = "Podcast ID")),
    responses(
        (status = 200, description = "Episode found", body = Podcast),
        (status = 404, description = "Episode not found", body = ErrorResponse)
    ),
    tag = "podcasts"
)]
pub async fn get_podcast(
    State(state): State<AppState>,
    Path(podcast_id): Path<String>,
) -> Result<Json<Podcast>, ApiError> {
    let podcast = state
        .podcasts
        .get(&podcast_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(podcast))
}

/// POST /api/podcasts/{podcast_id}/listen - Count one listen
#[utoipa::path(
    post,
    path = "/api/podcasts/{podcast_id}/listen",
    params(("podcast_id" = String, Path, description = "Podcast ID")),
    responses(
        (status = 200, description = "Listen counted", body = ListenCountResponse),
        (status = 404, description = "Episode not found", body = ErrorResponse)
    ),
    tag = "podcasts"
)]
pub async fn record_listen(
    State(state): State<AppState>,
    Path(podcast_id): Path<String>,
) -> Result<Json<ListenCountResponse>, ApiError> {
    let listens = state
        .podcasts
        .record_listen(&podcast_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(ListenCountResponse {
        id: podcast_id,
        listens,
    }))
}

/// GET /api/admin/podcasts - List every episode
#[utoipa::path(
    get,
    path = "/api/admin/podcasts",
    responses(
        (status = 200, description = "List of episodes", body = ListResponse<Podcast>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn admin_list_podcasts(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<ListResponse<Podcast>>, ApiError> {
    Ok(Json(state.podcasts.list_all().await?.into()))
}

/// POST /api/admin/podcasts - Create a podcast episode
#[utoipa::path(
    post,
    path = "/api/admin/podcasts",
    request_body = CreatePodcastRequest,
    responses(
        (status = 201, description = "Episode created", body = Podcast),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_podcast(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(req): ApiJson<CreatePodcastRequest>,
) -> Result<(StatusCode, Json<Podcast>), ApiError> {
    req.validate()?;
    let podcast = state.podcasts.create(req, &admin.email).await?;
    Ok((StatusCode::CREATED, Json(podcast)))
}

/// PUT /api/admin/podcasts - Update a podcast episode
#[utoipa::path(
    put,
    path = "/api/admin/podcasts",
    request_body = UpdatePodcastRequest,
    responses(
        (status = 200, description = "Episode updated", body = Podcast),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Episode not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_podcast(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(req): ApiJson<UpdatePodcastRequest>,
) -> Result<Json<Podcast>, ApiError> {
    req.changes.validate()?;
    let podcast = state
        .podcasts
        .update(&req.id, &req.changes)
        .await?
        .ok_or(ApiError::NotFound)?;

    tracing::info!(id = %podcast.id, updated_by = %admin.email, "Updated podcast episode");
    Ok(Json(podcast))
}

/// DELETE /api/admin/podcasts?id= - Delete a podcast episode
#[utoipa::path(
    delete,
    path = "/api/admin/podcasts",
    params(IdQuery),
    responses(
        (status = 200, description = "Episode deleted", body = SuccessResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Episode not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_podcast(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(IdQuery { id }): ApiQuery<IdQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !state.podcasts.delete(&id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SuccessResponse::new(id)))
}
