// Identity provider contract
//
// The identity provider is the source of truth for authentication. It verifies
// short-lived ID tokens, mints long-lived session cookies from them, and
// verifies those cookies (optionally checking revocation). The application keeps
// no session table of its own.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Decoded identity from a verified ID token or session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Errors reported by an identity provider
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Malformed token, bad signature, wrong issuer or audience
    #[error("Invalid credential: {0}")]
    Invalid(String),

    #[error("Credential expired")]
    Expired,

    /// Sessions for the user were revoked after this credential was issued
    #[error("Credential revoked")]
    Revoked,

    /// The provider could not be reached or failed internally
    #[error(transparent)]
    Unavailable(#[from] anyhow::Error),
}

impl IdentityError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        IdentityError::Invalid(msg.into())
    }

    /// True when the failure is the caller's credential rather than the provider
    pub fn is_credential_error(&self) -> bool {
        !matches!(self, IdentityError::Unavailable(_))
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify a bearer ID token, rejecting sign-ins revoked since it was issued
    async fn verify_id_token(&self, id_token: &str) -> Result<IdentityClaims, IdentityError>;

    /// Mint a session cookie value from a verified ID token
    async fn create_session_cookie(
        &self,
        id_token: &str,
        lifetime: Duration,
    ) -> Result<String, IdentityError>;

    /// Verify a session cookie value
    async fn verify_session_cookie(
        &self,
        session_cookie: &str,
        check_revoked: bool,
    ) -> Result<IdentityClaims, IdentityError>;

    /// Invalidate every session previously issued to the user
    async fn revoke_sessions(&self, uid: &str) -> Result<(), IdentityError>;
}

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Principal {
    pub uid: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl Principal {
    /// Build a principal from claims; `None` when the claims carry no email
    pub fn from_claims(claims: IdentityClaims) -> Option<Self> {
        let email = claims.email.filter(|e| !e.trim().is_empty())?;
        Some(Self {
            uid: claims.uid,
            email,
            name: claims.name,
            picture: claims.picture,
        })
    }
}
