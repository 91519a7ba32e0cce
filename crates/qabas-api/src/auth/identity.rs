// Local identity provider backed by signed JWTs
// Decision: Use HS256 algorithm for simplicity (symmetric key from QABAS_PRIVATE_KEY)
// Decision: ID tokens and session cookies use distinct issuers so neither is accepted as the other
// Decision: Revocation is a per-user "valid after" instant compared against auth_time
// Decision: A revoked sign-in cannot mint new sessions; the user must sign in again

use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use parking_lot::RwLock;
use qabas_core::{IdentityClaims, IdentityError, IdentityProvider};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::IdentityConfig;

/// Generate a random token identifier (32 hex characters)
fn generate_token_id() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 16] = rng.gen();
    hex::encode(bytes)
}

/// Claims shared by ID tokens and session cookies
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    pub iss: String,
    /// Audience (project id)
    pub aud: String,
    /// Subject (user id)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Sign-in instant (Unix milliseconds), carried from ID token to session cookie
    pub auth_time: i64,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl From<TokenClaims> for IdentityClaims {
    fn from(claims: TokenClaims) -> Self {
        IdentityClaims {
            uid: claims.sub,
            email: claims.email,
            name: claims.name,
            picture: claims.picture,
        }
    }
}

/// Identity provider that issues and verifies its own tokens
pub struct LocalIdentityProvider {
    config: IdentityConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// uid -> sessions signed in at or before this instant (ms) are revoked
    revocations: RwLock<HashMap<String, i64>>,
}

impl LocalIdentityProvider {
    pub fn new(config: IdentityConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.private_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.private_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
            revocations: RwLock::new(HashMap::new()),
        }
    }

    fn id_token_issuer(&self) -> String {
        format!("qabas-identity/{}", self.config.project_id)
    }

    fn session_issuer(&self) -> String {
        format!("qabas-session/{}", self.config.project_id)
    }

    /// Issue an ID token for a user, as a sign-in flow would
    pub fn issue_id_token(&self, identity: &IdentityClaims) -> anyhow::Result<String> {
        let claims = self.claims_for(
            identity.clone(),
            self.id_token_issuer(),
            self.config.id_token_lifetime,
            Utc::now().timestamp_millis(),
        )?;
        self.sign(&claims)
    }

    fn claims_for(
        &self,
        identity: IdentityClaims,
        issuer: String,
        lifetime: Duration,
        auth_time: i64,
    ) -> anyhow::Result<TokenClaims> {
        let now = Utc::now();
        let exp = now + chrono::Duration::from_std(lifetime)?;

        Ok(TokenClaims {
            iss: issuer,
            aud: self.config.project_id.clone(),
            sub: identity.uid,
            email: identity.email,
            name: identity.name,
            picture: identity.picture,
            auth_time,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: generate_token_id(),
        })
    }

    fn sign(&self, claims: &TokenClaims) -> anyhow::Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .context("Failed to encode token")
    }

    fn verify(&self, token: &str, issuer: &str) -> Result<TokenClaims, IdentityError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[&self.config.project_id]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => IdentityError::Expired,
                _ => IdentityError::invalid(e.to_string()),
            })
    }

    fn is_revoked(&self, claims: &TokenClaims) -> bool {
        self.revocations
            .read()
            .get(&claims.sub)
            .is_some_and(|valid_after| claims.auth_time <= *valid_after)
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn verify_id_token(&self, id_token: &str) -> Result<IdentityClaims, IdentityError> {
        let claims = self.verify(id_token, &self.id_token_issuer())?;
        if self.is_revoked(&claims) {
            return Err(IdentityError::Revoked);
        }
        Ok(claims.into())
    }

    async fn create_session_cookie(
        &self,
        id_token: &str,
        lifetime: Duration,
    ) -> Result<String, IdentityError> {
        let id_claims = self.verify(id_token, &self.id_token_issuer())?;
        // Sessions inherit auth_time; a revoked sign-in yields no new session
        if self.is_revoked(&id_claims) {
            return Err(IdentityError::Revoked);
        }
        let auth_time = id_claims.auth_time;

        let claims = self.claims_for(id_claims.into(), self.session_issuer(), lifetime, auth_time)?;
        Ok(self.sign(&claims)?)
    }

    async fn verify_session_cookie(
        &self,
        session_cookie: &str,
        check_revoked: bool,
    ) -> Result<IdentityClaims, IdentityError> {
        let claims = self.verify(session_cookie, &self.session_issuer())?;
        if check_revoked && self.is_revoked(&claims) {
            return Err(IdentityError::Revoked);
        }
        Ok(claims.into())
    }

    async fn revoke_sessions(&self, uid: &str) -> Result<(), IdentityError> {
        self.revocations
            .write()
            .insert(uid.to_string(), Utc::now().timestamp_millis());
        tracing::info!(uid = %uid, "Revoked sessions");
        Ok(())
    }
}
