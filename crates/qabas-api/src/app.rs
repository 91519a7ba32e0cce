// Application state and router assembly
// Decision: Only admin and session routes sit behind the session middleware; public reads stay anonymous

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use qabas_storage::StorageBackend;
use serde::Serialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::auth::{self, resolve_session, SessionResolver};
use crate::openapi::ApiDoc;
use crate::services::{
    AdminService, BenefitService, FormService, PlaylistService, PodcastService, StoryService,
    VideoService,
};

/// Shared state for every route
#[derive(Clone)]
pub struct AppState {
    pub resolver: SessionResolver,
    pub admins: Arc<AdminService>,
    pub videos: Arc<VideoService>,
    pub podcasts: Arc<PodcastService>,
    pub benefits: Arc<BenefitService>,
    pub stories: Arc<StoryService>,
    pub playlists: Arc<PlaylistService>,
    pub forms: Arc<FormService>,
}

impl AppState {
    pub fn new(store: StorageBackend, resolver: SessionResolver, admin_emails: Vec<String>) -> Self {
        Self {
            resolver,
            admins: Arc::new(AdminService::new(store.clone(), admin_emails)),
            videos: Arc::new(VideoService::new(store.clone())),
            podcasts: Arc::new(PodcastService::new(store.clone())),
            benefits: Arc::new(BenefitService::new(store.clone())),
            stories: Arc::new(StoryService::new(store.clone())),
            playlists: Arc::new(PlaylistService::new(store.clone())),
            forms: Arc::new(FormService::new(store)),
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the full application router
pub fn build_router(state: AppState, cors_origins: Vec<HeaderValue>) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .merge(auth::routes::routes())
        .merge(api::videos::routes())
        .merge(api::podcasts::routes())
        .merge(api::benefits::routes())
        .merge(api::stories::routes())
        .merge(api::playlists::routes())
        .merge(api::forms::routes());

    let protected = Router::new()
        .merge(auth::routes::session_routes())
        .merge(api::videos::admin_routes())
        .merge(api::podcasts::admin_routes())
        .merge(api::benefits::admin_routes())
        .merge(api::stories::admin_routes())
        .merge(api::playlists::admin_routes())
        .merge(api::forms::admin_routes())
        .layer(middleware::from_fn_with_state(state.clone(), resolve_session));

    let mut app = Router::new()
        .merge(public)
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Credentialed CORS needs explicit origins; skip the layer when none are configured
    if !cors_origins.is_empty() {
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::list(cors_origins))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
                header::ORIGIN,
            ])
            .allow_credentials(true);
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
