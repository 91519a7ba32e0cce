// Authentication HTTP routes
// Decision: Login and logout resolve the caller themselves; session and admin checks run behind the middleware
// Decision: A body `idToken` on login takes precedence over any cookie or Authorization header

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use qabas_core::Principal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{error::AuthError, middleware::Authenticated};
use crate::api::common::ApiError;
use crate::app::AppState;

/// Login request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// ID token to exchange for a session cookie
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Login response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub status: String,
    pub user: Principal,
}

/// Session check response
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Principal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub status: String,
}

/// Admin status for a user
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatusResponse {
    pub uid: String,
    pub is_admin: bool,
}

/// Routes that resolve the caller in the handler
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// Routes that require the session middleware
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/session", get(get_session))
        .route("/api/admin/:uid", get(get_admin_status))
}

/// POST /api/auth/login - Exchange an ID token (body or bearer) for a session cookie
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let req: LoginRequest = if body.iter().all(u8::is_ascii_whitespace) {
        LoginRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::invalid(e.to_string()))?
    };

    let resolution = match req.id_token.filter(|token| !token.trim().is_empty()) {
        Some(token) => state.resolver.establish(&token).await?,
        None => state.resolver.resolve(&headers).await?,
    };

    tracing::info!(uid = %resolution.principal.uid, "User signed in");

    let jar = match resolution.issued_cookie {
        Some(cookie) => jar.add(cookie),
        None => jar,
    };

    Ok((
        jar,
        Json(LoginResponse {
            status: "success".to_string(),
            user: resolution.principal,
        }),
    ))
}

/// POST /api/auth/logout - Clear the session cookie and revoke the caller's sessions
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    match state.resolver.resolve(&headers).await {
        Ok(resolution) => {
            let uid = resolution.principal.uid;
            match state.resolver.provider().revoke_sessions(&uid).await {
                Ok(()) => tracing::info!(uid = %uid, "User signed out"),
                Err(e) => tracing::error!(uid = %uid, error = %e, "Failed to revoke sessions"),
            }
        }
        Err(e) => tracing::debug!(reason = e.reason(), "Logout without a resolvable session"),
    }

    (
        jar.remove(state.resolver.removal_cookie()),
        Json(LogoutResponse {
            status: "success".to_string(),
        }),
    )
}

/// GET /api/auth/session - Report the current session
pub async fn get_session(Authenticated(principal): Authenticated) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: true,
        user: principal,
    })
}

/// GET /api/admin/:uid - Whether the caller, identified by uid, is an admin
pub async fn get_admin_status(
    State(state): State<AppState>,
    Authenticated(principal): Authenticated,
    Path(uid): Path<String>,
) -> Result<Json<AdminStatusResponse>, ApiError> {
    if principal.uid != uid {
        tracing::debug!(uid = %principal.uid, requested = %uid, "Admin status uid mismatch");
        return Err(AuthError::UidMismatch.into());
    }

    let is_admin = state.admins.is_admin(&principal).await?;

    Ok(Json(AdminStatusResponse { uid, is_admin }))
}
