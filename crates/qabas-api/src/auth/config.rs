// Authentication configuration loaded from environment variables.
// Decision: A missing private key is fatal; there is no unauthenticated mode
// Decision: Session lifetime is expressed in seconds everywhere (cookie Max-Age and provider expiry)

use anyhow::{Context, Result};
use std::time::Duration;

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "session";

/// Session cookie lifetime: 5 days
pub const SESSION_LIFETIME: Duration = Duration::from_secs(5 * 24 * 60 * 60);

/// ID token lifetime for locally issued tokens: 1 hour
pub const ID_TOKEN_LIFETIME: Duration = Duration::from_secs(60 * 60);

/// Session cookie attributes
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    /// Set the `Secure` attribute (production only)
    pub secure: bool,
    pub lifetime: Duration,
}

impl CookieConfig {
    pub fn new(secure: bool) -> Self {
        Self {
            name: SESSION_COOKIE_NAME.to_string(),
            secure,
            lifetime: SESSION_LIFETIME,
        }
    }
}

/// Identity provider configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Project the tokens are scoped to (issuer suffix and audience)
    pub project_id: String,
    /// Signing key for ID tokens and session cookies
    pub private_key: String,
    pub id_token_lifetime: Duration,
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub identity: IdentityConfig,
    pub cookie: CookieConfig,
    /// Emails granted admin access regardless of the `admins` collection
    pub admin_emails: Vec<String>,
    pub production: bool,
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let private_key = lookup("QABAS_PRIVATE_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("QABAS_PRIVATE_KEY environment variable required")?;

        let project_id = lookup("QABAS_PROJECT_ID")
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| "qabas".to_string());

        let production = lookup("APP_ENV")
            .map(|env| env.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let admin_emails = lookup("ADMIN_EMAILS")
            .map(|list| parse_list(&list))
            .unwrap_or_default();

        Ok(Self {
            identity: IdentityConfig {
                project_id,
                private_key,
                id_token_lifetime: ID_TOKEN_LIFETIME,
            },
            cookie: CookieConfig::new(production),
            admin_emails,
            production,
        })
    }
}

/// Split a comma-separated list, trimming and lowercasing entries
pub fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
