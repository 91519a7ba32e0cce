// Authentication failures and their wire representation
// Decision: Every failure carries a reason code, an English error and an Arabic message

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::common::ErrorResponse;

/// Authentication error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingAuthHeader,

    #[error("Authorization header is not a bearer token")]
    MissingBearerToken,

    #[error("Invalid or expired ID token")]
    InvalidIdToken,

    #[error("Token does not carry an email address")]
    NoEmailInToken,

    #[error("UID does not match the authenticated user")]
    UidMismatch,

    #[error("Admin access required")]
    NotAdmin,

    #[error("Internal server error")]
    Server,
}

impl AuthError {
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "MISSING_AUTH_HEADER",
            AuthError::MissingBearerToken => "MISSING_BEARER_TOKEN",
            AuthError::InvalidIdToken => "INVALID_ID_TOKEN",
            AuthError::NoEmailInToken => "NO_EMAIL_IN_TOKEN",
            AuthError::UidMismatch => "UID_MISMATCH",
            AuthError::NotAdmin => "NOT_ADMIN",
            AuthError::Server => "SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::NotAdmin => StatusCode::FORBIDDEN,
            AuthError::Server => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// User-facing Arabic message
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "يجب تسجيل الدخول للمتابعة",
            AuthError::MissingBearerToken => "صيغة رمز المصادقة غير صحيحة",
            AuthError::InvalidIdToken => "رمز المصادقة غير صالح أو منتهي الصلاحية",
            AuthError::NoEmailInToken => "لا يوجد بريد إلكتروني مرتبط بهذا الحساب",
            AuthError::UidMismatch => "معرف المستخدم غير مطابق",
            AuthError::NotAdmin => "ليس لديك صلاحية الوصول إلى لوحة التحكم",
            AuthError::Server => "حدث خطأ في الخادم",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ErrorResponse::new(self.reason(), self.to_string(), self.message())
            .into_response(self.status())
            .into_response()
    }
}
