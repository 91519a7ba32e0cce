// Authentication module
// Decision: The identity provider is the source of truth; the application keeps no session table
// Decision: Cookie-then-bearer resolution lives in one resolver applied by middleware

pub mod config;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod resolver;
pub mod routes;

pub use config::{AuthConfig, CookieConfig, IdentityConfig, SESSION_LIFETIME};
pub use error::AuthError;
pub use identity::LocalIdentityProvider;
pub use middleware::{resolve_session, AdminUser, Authenticated, SessionOutcome};
pub use resolver::{Resolution, SessionResolver};
