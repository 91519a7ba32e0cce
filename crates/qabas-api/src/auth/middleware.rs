// Authentication middleware and extractors
// Decision: Session resolution runs once per request in a middleware; handlers read the outcome
// Decision: Resolution failures are stored, not returned, so anonymous-capable handlers still run

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};
use qabas_core::Principal;

use super::error::AuthError;
use crate::app::AppState;

/// Result of resolving the caller, stored in request extensions
#[derive(Debug, Clone)]
pub struct SessionOutcome(pub Result<Principal, AuthError>);

/// Resolve the caller and append any freshly minted session cookie to the response
pub async fn resolve_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let (outcome, issued_cookie) = match state.resolver.resolve(request.headers()).await {
        Ok(resolution) => (Ok(resolution.principal), resolution.issued_cookie),
        Err(e) => (Err(e), None),
    };

    request.extensions_mut().insert(SessionOutcome(outcome));
    let mut response = next.run(request).await;

    if let Some(cookie) = issued_cookie {
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "Session cookie is not a valid header value"),
        }
    }

    response
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for SessionOutcome
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionOutcome>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("Session middleware is not installed on this route");
                AuthError::Server
            })
    }
}

/// Extractor for an authenticated caller.
/// This is required - rejects with the resolution failure if not authenticated
#[derive(Debug, Clone)]
pub struct Authenticated(pub Principal);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let SessionOutcome(outcome) = SessionOutcome::from_request_parts(parts, state).await?;
        outcome.map(Authenticated)
    }
}

/// Extractor for an authenticated caller with admin access
#[derive(Debug, Clone)]
pub struct AdminUser(pub Principal);

#[axum::async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Authenticated(principal) = Authenticated::from_request_parts(parts, state).await?;

        match state.admins.is_admin(&principal).await {
            Ok(true) => Ok(AdminUser(principal)),
            Ok(false) => {
                tracing::debug!(uid = %principal.uid, "Admin access denied");
                Err(AuthError::NotAdmin)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to check admin access");
                Err(AuthError::Server)
            }
        }
    }
}
