// Benefits HTTP routes

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use qabas_core::Benefit;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common::{
    ApiError, ApiJson, ApiQuery, ErrorResponse, IdQuery, ListResponse, SuccessResponse,
};
use super::validation::{
    validate_max, validate_required, ValidationError, MAX_CONTENT_BYTES, MAX_DESCRIPTION_BYTES,
    MAX_TITLE_BYTES,
};
use crate::app::AppState;
use crate::auth::AdminUser;

/// Request to create a benefit
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBenefitRequest {
    /// Source book
    pub book_name: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub page: String,
    /// Quoted excerpt
    pub text: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub category: String,
}

impl CreateBenefitRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_required("bookName", &self.book_name, MAX_TITLE_BYTES)?;
        validate_max("volume", &self.volume, MAX_TITLE_BYTES)?;
        validate_max("page", &self.page, MAX_TITLE_BYTES)?;
        validate_required("text", &self.text, MAX_CONTENT_BYTES)?;
        if let Some(comment) = &self.comment {
            validate_max("comment", comment, MAX_DESCRIPTION_BYTES)?;
        }
        Ok(())
    }
}

/// Editable benefit fields
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BenefitChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl BenefitChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(book_name) = &self.book_name {
            validate_required("bookName", book_name, MAX_TITLE_BYTES)?;
        }
        if let Some(text) = &self.text {
            validate_required("text", text, MAX_CONTENT_BYTES)?;
        }
        if let Some(comment) = &self.comment {
            validate_max("comment", comment, MAX_DESCRIPTION_BYTES)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateBenefitRequest {
    pub id: String,
    #[serde(flatten)]
    pub changes: BenefitChanges,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct BenefitListQuery {
    pub category: Option<String>,
    pub book_name: Option<String>,
    pub limit: Option<usize>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/benefits", get(list_benefits))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/api/admin/benefits",
        get(admin_list_benefits)
            .post(create_benefit)
            .put(update_benefit)
            .delete(delete_benefit),
    )
}

/// GET /api/benefits - List benefits, newest first
#[utoipa::path(
    get,
    path = "/api/benefits",
    params(BenefitListQuery),
    responses(
        (status = 200, description = "List of benefits", body = ListResponse<Benefit>),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "benefits"
)]
pub async fn list_benefits(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<BenefitListQuery>,
) -> Result<Json<ListResponse<Benefit>>, ApiError> {
    Ok(Json(state.benefits.list(&filter).await?.into()))
}

/// GET /api/admin/benefits - List every benefit
#[utoipa::path(
    get,
    path = "/api/admin/benefits",
    responses(
        (status = 200, description = "List of benefits", body = ListResponse<Benefit>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn admin_list_benefits(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<ListResponse<Benefit>>, ApiError> {
    Ok(Json(state.benefits.list_all().await?.into()))
}

/// POST /api/admin/benefits - Create a benefit
#[utoipa::path(
    post,
    path = "/api/admin/benefits",
    request_body = CreateBenefitRequest,
    responses(
        (status = 201, description = "Benefit created", body = Benefit),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn create_benefit(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(req): ApiJson<CreateBenefitRequest>,
) -> Result<(StatusCode, Json<Benefit>), ApiError> {
    req.validate()?;
    let benefit = state.benefits.create(req, &admin.email).await?;
    Ok((StatusCode::CREATED, Json(benefit)))
}

/// PUT /api/admin/benefits - Update a benefit
#[utoipa::path(
    put,
    path = "/api/admin/benefits",
    request_body = UpdateBenefitRequest,
    responses(
        (status = 200, description = "Benefit updated", body = Benefit),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Benefit not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_benefit(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiJson(req): ApiJson<UpdateBenefitRequest>,
) -> Result<Json<Benefit>, ApiError> {
    req.changes.validate()?;
    let benefit = state
        .benefits
        .update(&req.id, &req.changes)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(benefit))
}

/// DELETE /api/admin/benefits?id= - Delete a benefit
#[utoipa::path(
    delete,
    path = "/api/admin/benefits",
    params(IdQuery),
    responses(
        (status = 200, description = "Benefit deleted", body = SuccessResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Benefit not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_benefit(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(IdQuery { id }): ApiQuery<IdQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !state.benefits.delete(&id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SuccessResponse::new(id)))
}
