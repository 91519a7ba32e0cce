// Common DTOs and error handling for the public API
//
// These types are shared across every resource module.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use qabas_core::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

use super::validation::ValidationError;
use crate::auth::AuthError;

/// Standard error response for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable reason code (e.g. `INVALID_ID_TOKEN`).
    pub reason: String,
    /// English error description.
    pub error: String,
    /// Arabic message suitable for display.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(
        reason: impl Into<String>,
        error: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            reason: reason.into(),
            error: error.into(),
            message: message.into(),
        }
    }

    /// Convert to axum response tuple
    pub fn into_response(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

/// Response wrapper for list endpoints.
/// All list endpoints return responses wrapped in a `data` field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListResponse<T> {
    /// Array of items returned by the list operation.
    pub data: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Acknowledgement returned by deletes and status-only operations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
    pub id: String,
}

impl SuccessResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            success: true,
            id: id.into(),
        }
    }
}

/// `?id=` selector used by admin delete endpoints
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Record id
    pub id: String,
}

/// Errors returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resource not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn invalid(detail: impl Into<String>) -> Self {
        ApiError::InvalidInput(detail.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(e) => e.into_response(),
            ApiError::InvalidInput(detail) => ErrorResponse::new(
                "INVALID_INPUT",
                format!("Invalid input: {detail}"),
                "البيانات المدخلة غير صالحة",
            )
            .into_response(StatusCode::BAD_REQUEST)
            .into_response(),
            ApiError::NotFound => ErrorResponse::new(
                "NOT_FOUND",
                "Resource not found",
                "العنصر المطلوب غير موجود",
            )
            .into_response(StatusCode::NOT_FOUND)
            .into_response(),
            ApiError::Store(StoreError::NotFound { collection, id }) => {
                tracing::debug!(collection = %collection, id = %id, "Referenced document missing");
                ApiError::NotFound.into_response()
            }
            ApiError::Store(e) => {
                tracing::error!(error = %e, "Store operation failed");
                ErrorResponse::new("SERVER_ERROR", "Internal server error", "حدث خطأ في الخادم")
                    .into_response(StatusCode::INTERNAL_SERVER_ERROR)
                    .into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::InvalidInput(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

/// JSON body extractor that rejects with the API error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor that rejects with the API error shape
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
