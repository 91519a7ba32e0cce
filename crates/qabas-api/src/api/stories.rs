// Coffee stories and chapters HTTP routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use qabas_core::{Chapter, CoffeeStory};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common::{
    ApiError, ApiJson, ApiQuery, ErrorResponse, IdQuery, ListResponse, SuccessResponse,
};
use super::validation::{
    validate_max, validate_required, validate_url, ValidationError, MAX_CONTENT_BYTES,
    MAX_DESCRIPTION_BYTES, MAX_TITLE_BYTES,
};
use crate::app::AppState;
use crate::auth::AdminUser;

/// Request to create a story
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoryRequest {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub cover_url: String,
}

impl CreateStoryRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_required("title", &self.title, MAX_TITLE_BYTES)?;
        validate_max("author", &self.author, MAX_TITLE_BYTES)?;
        validate_max("summary", &self.summary, MAX_DESCRIPTION_BYTES)?;
        validate_url("coverUrl", &self.cover_url)
    }
}

/// Editable story fields. The chapter count is derived and not editable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoryChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl StoryChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_required("title", title, MAX_TITLE_BYTES)?;
        }
        if let Some(summary) = &self.summary {
            validate_max("summary", summary, MAX_DESCRIPTION_BYTES)?;
        }
        if let Some(cover_url) = &self.cover_url {
            validate_url("coverUrl", cover_url)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStoryRequest {
    pub id: String,
    #[serde(flatten)]
    pub changes: StoryChanges,
}

/// Request to add a chapter to a story
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChapterRequest {
    pub story_id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Position in the story; appended after the last chapter when omitted
    #[serde(default)]
    pub order: Option<u32>,
}

impl CreateChapterRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_required("storyId", &self.story_id, MAX_TITLE_BYTES)?;
        validate_required("title", &self.title, MAX_TITLE_BYTES)?;
        validate_max("content", &self.content, MAX_CONTENT_BYTES)
    }
}

/// Editable chapter fields. A chapter cannot move to another story.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ChapterChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl ChapterChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_required("title", title, MAX_TITLE_BYTES)?;
        }
        if let Some(content) = &self.content {
            validate_max("content", content, MAX_CONTENT_BYTES)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateChapterRequest {
    pub id: String,
    #[serde(flatten)]
    pub changes: ChapterChanges,
}

/// `?storyId=` selector for the admin chapter list
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ChapterListQuery {
    pub story_id: String,
}

/// A story with its chapters in reading order
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoryWithChapters {
    #[serde(flatten)]
    pub story: CoffeeStory,
    pub chapters: Vec<Chapter>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/stories", get(list_stories))
        .route("/api/stories/:story_id", get(get_story))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/stories",
            get(admin_list_stories)
                .post(create_story)
                .put(update_story)
                .delete(delete_story),
        )
        .route(
            "/api/admin/chapters",
            get(admin_list_chapters)
                .post(create_chapter)
                .put(update_chapter)
                .delete(delete_chapter),
        )
}

/// GET /api/stories - List stories, newest first
#[utoipa::path(
    get,
    path = "/api/stories",
    responses(
        (status = 200, description = "List of stories", body = ListResponse<CoffeeStory>)
    ),
    tag = "stories"
)]
pub async fn list_stories(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<CoffeeStory>>, ApiError> {
    Ok(Json(state.stories.list().await?.into()))
}

/// GET /api/stories/{story_id} - Get a story with its chapters
#[utoipa::path(
    get,
    path = "/api/stories/{story_id}",
    params(("story_id" = String, Path, description = "Story ID")),
    responses(
        (status = 200, description = "Story found", body = StoryWithChapters),
        (status = 404, description = "Story not found", body = ErrorResponse)
    ),
    tag = "stories"
)]
pub async fn get_story(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
) -> Result<Json<StoryWithChapters>, ApiError> {
    let story = state
        .stories
        .get(&story_id)
        .await?
        .ok_or(ApiError::NotFound)?;
    let chapters = state.stories.list_chapters(&story_id).await?;
    Ok(Json(StoryWithChapters { story, chapters }))
}

/// GET /api/admin/stories - List every story
#[utoipa::path(
    get,
    path = "/api/admin/stories",
    responses(
        (status = 200, description = "List of stories", body = ListResponse<CoffeeStory>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn admin_list_stories(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<ListResponse<CoffeeStory>>, ApiError> {
    Ok(Json(state.stories.list().await?.into()))
}

/// POST /api/admin/stories - Create a story
#[utoipa::path(
    post,
    path = "/api/admin/stories",
    request_body = CreateStoryRequest,
    responses(
        (status = 201, description = "Story created", body = CoffeeStory),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_story(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(req): ApiJson<CreateStoryRequest>,
) -> Result<(StatusCode, Json<CoffeeStory>), ApiError> {
    req.validate()?;
    let story = state.stories.create(req, &admin.email).await?;
    Ok((StatusCode::CREATED, Json(story)))
}

/// PUT /api/admin/stories - Update a story
#[utoipa::path(
    put,
    path = "/api/admin/stories",
    request_body = UpdateStoryRequest,
    responses(
        (status = 200, description = "Story updated", body = CoffeeStory),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Story not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_story(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiJson(req): ApiJson<UpdateStoryRequest>,
) -> Result<Json<CoffeeStory>, ApiError> {
    req.changes.validate()?;
    let story = state
        .stories
        .update(&req.id, &req.changes)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(story))
}

/// DELETE /api/admin/stories?id= - Delete a story and all of its chapters
#[utoipa::path(
    delete,
    path = "/api/admin/stories",
    params(IdQuery),
    responses(
        (status = 200, description = "Story and chapters deleted", body = SuccessResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Story not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_story(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(IdQuery { id }): ApiQuery<IdQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !state.stories.delete(&id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SuccessResponse::new(id)))
}

/// GET /api/admin/chapters?storyId= - List a story's chapters
#[utoipa::path(
    get,
    path = "/api/admin/chapters",
    params(ChapterListQuery),
    responses(
        (status = 200, description = "List of chapters", body = ListResponse<Chapter>),
        (status = 400, description = "Missing storyId", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn admin_list_chapters(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(query): ApiQuery<ChapterListQuery>,
) -> Result<Json<ListResponse<Chapter>>, ApiError> {
    Ok(Json(state.stories.list_chapters(&query.story_id).await?.into()))
}

/// POST /api/admin/chapters - Add a chapter to a story
#[utoipa::path(
    post,
    path = "/api/admin/chapters",
    request_body = CreateChapterRequest,
    responses(
        (status = 201, description = "Chapter created", body = Chapter),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Story not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_chapter(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiJson(req): ApiJson<CreateChapterRequest>,
) -> Result<(StatusCode, Json<Chapter>), ApiError> {
    req.validate()?;
    let chapter = state
        .stories
        .create_chapter(req)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok((StatusCode::CREATED, Json(chapter)))
}

/// PUT /api/admin/chapters - Update a chapter
#[utoipa::path(
    put,
    path = "/api/admin/chapters",
    request_body = UpdateChapterRequest,
    responses(
        (status = 200, description = "Chapter updated", body = Chapter),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Chapter not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_chapter(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiJson(req): ApiJson<UpdateChapterRequest>,
) -> Result<Json<Chapter>, ApiError> {
    req.changes.validate()?;
    let chapter = state
        .stories
        .update_chapter(&req.id, &req.changes)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(chapter))
}

/// DELETE /api/admin/chapters?id= - Delete a chapter
#[utoipa::path(
    delete,
    path = "/api/admin/chapters",
    params(IdQuery),
    responses(
        (status = 200, description = "Chapter deleted", body = SuccessResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Chapter not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_chapter(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(IdQuery { id }): ApiQuery<IdQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !state.stories.delete_chapter(&id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SuccessResponse::new(id)))
}
