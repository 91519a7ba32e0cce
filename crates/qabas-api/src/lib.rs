// Qabas API library
//
// Exposes the router and its building blocks so binaries and integration
// tests assemble the same application.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod openapi;
pub mod services;

pub use app::{build_router, AppState};
pub use config::AppConfig;
