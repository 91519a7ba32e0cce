// Playlist HTTP routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use qabas_core::{Playlist, Video};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::{
    ApiError, ApiJson, ApiQuery, ErrorResponse, IdQuery, ListResponse, SuccessResponse,
};
use super::validation::{
    validate_max, validate_required, validate_url, ValidationError, MAX_DESCRIPTION_BYTES,
    MAX_TITLE_BYTES,
};
use crate::app::AppState;
use crate::auth::AdminUser;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: String,
}

impl CreatePlaylistRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_required("title", &self.title, MAX_TITLE_BYTES)?;
        validate_max("description", &self.description, MAX_DESCRIPTION_BYTES)?;
        validate_url("thumbnailUrl", &self.thumbnail_url)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl PlaylistChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_required("title", title, MAX_TITLE_BYTES)?;
        }
        if let Some(description) = &self.description {
            validate_max("description", description, MAX_DESCRIPTION_BYTES)?;
        }
        if let Some(thumbnail_url) = &self.thumbnail_url {
            validate_url("thumbnailUrl", thumbnail_url)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdatePlaylistRequest {
    pub id: String,
    #[serde(flatten)]
    pub changes: PlaylistChanges,
}

/// A playlist with its videos
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlaylistWithVideos {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub videos: Vec<Video>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/playlists", get(list_playlists))
        .route("/api/playlists/:playlist_id", get(get_playlist))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/api/admin/playlists",
        get(admin_list_playlists)
            .post(create_playlist)
            .put(update_playlist)
            .delete(delete_playlist),
    )
}

/// GET /api/playlists - List playlists, newest first
#[utoipa::path(
    get,
    path = "/api/playlists",
    responses(
        (status = 200, description = "List of playlists", body = ListResponse<Playlist>)
    ),
    tag = "playlists"
)]
pub async fn list_playlists(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Playlist>>, ApiError> {
    Ok(Json(state.playlists.list().await?.into()))
}

/// GET /api/playlists/{playlist_id} - Get a playlist with its videos
#[utoipa::path(
    get,
    path = "/api/playlists/{playlist_id}",
    params(("playlist_id" = String, Path, description = "Playlist ID")),
    responses(
        (status = 200, description = "Playlist found", body = PlaylistWithVideos),
        (status = 404, description = "Playlist not found", body = ErrorResponse)
    ),
    tag = "playlists"
)]
pub async fn get_playlist(
    State(state): State<AppState>,
    Path(playlist_id): Path<String>,
) -> Result<Json<PlaylistWithVideos>, ApiError> {
    let playlist = state
        .playlists
        .get(&playlist_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    let videos = state.playlists.videos(&playlist_id).await?;
    Ok(Json(PlaylistWithVideos { playlist, videos }))
}

/// GET /api/admin/playlists - List every playlist
#[utoipa::path(
    get,
    path = "/api/admin/playlists",
    responses(
        (status = 200, description = "List of playlists", body = ListResponse<Playlist>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn admin_list_playlists(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<ListResponse<Playlist>>, ApiError> {
    Ok(Json(state.playlists.list().await?.into()))
}

/// POST /api/admin/playlists - Create a playlist
#[utoipa::path(
    post,
    path = "/api/admin/playlists",
    request_body = CreatePlaylistRequest,
    responses(
        (status = 201, description = "Playlist created", body = Playlist),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_playlist(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(req): ApiJson<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<Playlist>), ApiError> {
    req.validate()?;
    let playlist = state.playlists.create(req, &admin.email).await?;
    Ok((StatusCode::CREATED, Json(playlist)))
}

/// PUT /api/admin/playlists - Update a playlist
#[utoipa::path(
    put,
    path = "/api/admin/playlists",
    request_body = UpdatePlaylistRequest,
    responses(
        (status = 200, description = "Playlist updated", body = Playlist),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Playlist not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_playlist(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiJson(req): ApiJson<UpdatePlaylistRequest>,
) -> Result<Json<Playlist>, ApiError> {
    req.changes.validate()?;
    let playlist = state
        .playlists
        .update(&req.id, &req.changes)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(playlist))
}

/// DELETE /api/admin/playlists?id= - Delete a playlist, detaching its videos
#[utoipa::path(
    delete,
    path = "/api/admin/playlists",
    params(IdQuery),
    responses(
        (status = 200, description = "Playlist deleted", body = SuccessResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Playlist not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_playlist(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(IdQuery { id }): ApiQuery<IdQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !state.playlists.delete(&id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SuccessResponse::new(id)))
}
