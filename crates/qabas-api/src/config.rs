// Application configuration loaded from environment variables
// Decision: DATABASE_URL selects PostgreSQL; without it the in-memory store is used

use anyhow::Result;
use axum::http::HeaderValue;

use crate::auth::AuthConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address
    pub http_addr: String,
    /// PostgreSQL URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// Origins allowed to call the API cross-origin with credentials
    pub cors_origins: Vec<HeaderValue>,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let auth = AuthConfig::from_lookup(&lookup)?;

        let http_addr = lookup("HTTP_ADDR")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "0.0.0.0:9000".to_string());

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());

        // Example: CORS_ALLOWED_ORIGINS="https://qabas.example,https://admin.qabas.example"
        let cors_origins = lookup("CORS_ALLOWED_ORIGINS")
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
            .unwrap_or_default();

        Ok(Self {
            http_addr,
            database_url,
            cors_origins,
            auth,
        })
    }
}
