// Session resolution: session cookie first, bearer ID token as fallback
// Decision: A failed cookie verification never fails the request on its own; the bearer token decides
// Decision: Email presence is checked before a cookie is minted, so tokens without email never produce a session
// Decision: Minting is idempotent; every bearer resolution issues a fresh cookie

use std::sync::Arc;

use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use qabas_core::{IdentityError, IdentityProvider, Principal};

use super::config::CookieConfig;
use super::error::AuthError;

/// Outcome of a successful resolution
#[derive(Debug, Clone)]
pub struct Resolution {
    pub principal: Principal,
    /// Session cookie minted from a bearer token, to be set on the response
    pub issued_cookie: Option<Cookie<'static>>,
}

/// Resolves the caller of a request against the identity provider
#[derive(Clone)]
pub struct SessionResolver {
    provider: Arc<dyn IdentityProvider>,
    cookie: CookieConfig,
}

impl SessionResolver {
    pub fn new(provider: Arc<dyn IdentityProvider>, cookie: CookieConfig) -> Self {
        Self { provider, cookie }
    }

    pub fn provider(&self) -> &Arc<dyn IdentityProvider> {
        &self.provider
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie.name
    }

    /// Resolve the caller from the session cookie, falling back to the bearer token
    pub async fn resolve(&self, headers: &HeaderMap) -> Result<Resolution, AuthError> {
        if let Some(principal) = self.principal_from_cookie(headers).await? {
            return Ok(Resolution {
                principal,
                issued_cookie: None,
            });
        }

        let token = bearer_token(headers)?;
        self.establish(token).await
    }

    /// Verify an ID token and mint a session cookie for it
    pub async fn establish(&self, id_token: &str) -> Result<Resolution, AuthError> {
        let claims = self
            .provider
            .verify_id_token(id_token)
            .await
            .map_err(|e| provider_failure(e, "ID token verification failed"))?;

        let principal = Principal::from_claims(claims).ok_or(AuthError::NoEmailInToken)?;

        let value = self
            .provider
            .create_session_cookie(id_token, self.cookie.lifetime)
            .await
            .map_err(|e| provider_failure(e, "Session cookie creation failed"))?;

        tracing::debug!(uid = %principal.uid, "Issued session cookie");

        Ok(Resolution {
            principal,
            issued_cookie: Some(self.session_cookie(value)),
        })
    }

    /// Principal carried by a valid session cookie, if any
    async fn principal_from_cookie(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<Principal>, AuthError> {
        let jar = CookieJar::from_headers(headers);
        let Some(cookie) = jar.get(&self.cookie.name) else {
            return Ok(None);
        };
        if cookie.value().is_empty() {
            return Ok(None);
        }

        match self
            .provider
            .verify_session_cookie(cookie.value(), true)
            .await
        {
            Ok(claims) => Principal::from_claims(claims)
                .map(Some)
                .ok_or(AuthError::NoEmailInToken),
            Err(e) => {
                tracing::debug!(error = %e, "Session cookie rejected, falling back to bearer token");
                Ok(None)
            }
        }
    }

    /// Build the session cookie with the configured attributes
    pub fn session_cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.cookie.name.clone(), value))
            .path("/")
            .http_only(true)
            .secure(self.cookie.secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(self.cookie.lifetime.as_secs() as i64))
            .build()
    }

    /// Cookie that clears the session on the client
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.cookie.name.clone(), ""))
            .path("/")
            .http_only(true)
            .secure(self.cookie.secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::ZERO)
            .build()
    }
}

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?;

    let value = value.to_str().map_err(|_| AuthError::MissingBearerToken)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingBearerToken)
}

fn provider_failure(e: IdentityError, context: &str) -> AuthError {
    if e.is_credential_error() {
        tracing::debug!(error = %e, "{}", context);
        AuthError::InvalidIdToken
    } else {
        tracing::error!(error = %e, "{}", context);
        AuthError::Server
    }
}
