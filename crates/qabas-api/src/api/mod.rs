// HTTP API routes
//
// Each submodule handles one resource: public read routes via `routes()` and
// admin CRUD routes via `admin_routes()`, all sharing the application state.

pub mod benefits;
pub mod common;
pub mod forms;
pub mod playlists;
pub mod podcasts;
pub mod stories;
pub mod validation;
pub mod videos;

// Re-export common types
pub use common::{ApiError, ErrorResponse, ListResponse};
