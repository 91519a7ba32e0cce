// Integration tests for the Qabas API
// Run with: cargo test -p qabas-api --test api_test
//
// The router is driven in-process against the in-memory store, with ID tokens
// issued by the local identity provider.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use qabas_api::auth::{AuthConfig, LocalIdentityProvider, SessionResolver};
use qabas_api::{build_router, AppState};
use qabas_core::IdentityClaims;
use qabas_storage::StorageBackend;
use serde_json::{json, Value};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@qabas.example";

struct TestApp {
    router: Router,
    state: AppState,
    provider: Arc<LocalIdentityProvider>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_env(None)
    }

    fn with_env(app_env: Option<&str>) -> Self {
        let config = AuthConfig::from_lookup(|key| match key {
            "QABAS_PRIVATE_KEY" => Some("integration-test-key".to_string()),
            "ADMIN_EMAILS" => Some(ADMIN_EMAIL.to_string()),
            "APP_ENV" => app_env.map(str::to_string),
            _ => None,
        })
        .expect("test config");

        let provider = Arc::new(LocalIdentityProvider::new(config.identity.clone()));
        let resolver = SessionResolver::new(provider.clone(), config.cookie.clone());
        let state = AppState::new(StorageBackend::in_memory(), resolver, config.admin_emails);
        let router = build_router(state.clone(), Vec::new());

        Self {
            router,
            state,
            provider,
        }
    }

    fn id_token(&self, uid: &str, email: Option<&str>) -> String {
        self.provider
            .issue_id_token(&IdentityClaims {
                uid: uid.to_string(),
                email: email.map(str::to_string),
                name: Some("مستخدم".to_string()),
                picture: None,
            })
            .expect("issue id token")
    }

    fn admin_token(&self) -> String {
        self.id_token("admin-uid", Some(ADMIN_EMAIL))
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

fn request(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri)
}

fn json_request(method: &str, uri: &str, bearer: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = request(method, uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    request(method, uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn cookie_request(method: &str, uri: &str, cookie: &str) -> Request<Body> {
    request(method, uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// `name=value` pair of the first Set-Cookie header
fn session_cookie_pair(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

fn set_cookie_header(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_video(app: &TestApp, token: &str, title: &str) -> Value {
    let response = app
        .send(json_request(
            "POST",
            "/api/admin/videos",
            Some(token),
            json!({
                "title": title,
                "category": "aqeedah",
                "url": "https://cdn.qabas.example/v.mp4"
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn test_missing_credentials_are_rejected() {
    let app = TestApp::new();

    let response = app
        .send(request("GET", "/api/auth/session").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["reason"], "MISSING_AUTH_HEADER");
    assert!(body["message"].as_str().is_some());

    let response = app
        .send(
            request("GET", "/api/auth/session")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["reason"], "MISSING_BEARER_TOKEN");
}

#[tokio::test]
async fn test_invalid_token_and_missing_email() {
    let app = TestApp::new();

    let response = app
        .send(bearer_request("GET", "/api/auth/session", "not-a-token"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["reason"], "INVALID_ID_TOKEN");

    let token = app.id_token("anon-uid", None);
    let response = app
        .send(bearer_request("GET", "/api/auth/session", &token))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(body_json(response).await["reason"], "NO_EMAIL_IN_TOKEN");
}

#[tokio::test]
async fn test_bearer_request_establishes_cookie_session() {
    let app = TestApp::new();
    let token = app.id_token("reader-uid", Some("reader@example.com"));

    println!("Step 1: Authenticating with a bearer token...");
    let response = app
        .send(bearer_request("GET", "/api/auth/session", &token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie_pair(&response).expect("session cookie issued");
    assert!(cookie.starts_with("session="));

    let body = body_json(response).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["uid"], "reader-uid");
    assert_eq!(body["user"]["email"], "reader@example.com");

    println!("Step 2: Reusing the cookie without a bearer token...");
    let response = app
        .send(cookie_request("GET", "/api/auth/session", &cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().get(header::SET_COOKIE).is_none(),
        "a valid cookie is not re-issued"
    );
    assert_eq!(body_json(response).await["user"]["uid"], "reader-uid");
}

#[tokio::test]
async fn test_invalid_cookie_falls_back_to_bearer() {
    let app = TestApp::new();
    let token = app.id_token("reader-uid", Some("reader@example.com"));

    let response = app
        .send(
            request("GET", "/api/auth/session")
                .header(header::COOKIE, "session=garbage")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie_pair(&response).is_some());
}

#[tokio::test]
async fn test_login_cookie_attributes() {
    let app = TestApp::with_env(Some("production"));
    let token = app.id_token("reader-uid", Some("reader@example.com"));

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "idToken": token }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = set_cookie_header(&response);
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Secure"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=432000"));

    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["user"]["uid"], "reader-uid");
}

#[tokio::test]
async fn test_development_cookie_is_not_secure() {
    let app = TestApp::new();
    let token = app.id_token("reader-uid", Some("reader@example.com"));

    let response = app
        .send(bearer_request("POST", "/api/auth/login", &token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = set_cookie_header(&response);
    assert!(set_cookie.contains("HttpOnly"));
    assert!(!set_cookie.contains("Secure"));
}

#[tokio::test]
async fn test_login_rejects_malformed_body() {
    let app = TestApp::new();

    let response = app
        .send(
            request("POST", "/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["reason"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_logout_revokes_session_cookie() {
    let app = TestApp::new();
    let token = app.id_token("reader-uid", Some("reader@example.com"));

    let response = app
        .send(bearer_request("POST", "/api/auth/login", &token))
        .await;
    let cookie = session_cookie_pair(&response).expect("session cookie issued");

    let response = app
        .send(cookie_request("POST", "/api/auth/logout", &cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = set_cookie_header(&response);
    assert!(cleared.starts_with("session="));
    assert!(cleared.contains("Max-Age=0"));
    assert_eq!(body_json(response).await["status"], "success");

    let response = app
        .send(cookie_request("GET", "/api/auth/session", &cookie))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["reason"], "MISSING_AUTH_HEADER");
}

#[tokio::test]
async fn test_relogin_after_logout() {
    let app = TestApp::new();
    let token = app.id_token("reader-uid", Some("reader@example.com"));

    println!("Step 1: Signing in and out...");
    let response = app
        .send(bearer_request("POST", "/api/auth/login", &token))
        .await;
    let cookie = session_cookie_pair(&response).expect("session cookie issued");
    let response = app
        .send(cookie_request("POST", "/api/auth/logout", &cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    println!("Step 2: Reusing the signed-out ID token...");
    let response = app
        .send(bearer_request("POST", "/api/auth/login", &token))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(
        response.headers().get(header::SET_COOKIE).is_none(),
        "no cookie is minted from a revoked sign-in"
    );
    assert_eq!(body_json(response).await["reason"], "INVALID_ID_TOKEN");

    println!("Step 3: Signing in again with a fresh ID token...");
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let fresh = app.id_token("reader-uid", Some("reader@example.com"));
    let response = app
        .send(bearer_request("POST", "/api/auth/login", &fresh))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie_pair(&response).expect("session cookie issued");

    let response = app
        .send(cookie_request("GET", "/api/auth/session", &cookie))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["uid"], "reader-uid");
}

#[tokio::test]
async fn test_admin_status_checks() {
    let app = TestApp::new();
    let reader = app.id_token("reader-uid", Some("reader@example.com"));

    let response = app
        .send(bearer_request("GET", "/api/admin/someone-else", &reader))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["reason"], "UID_MISMATCH");

    let response = app
        .send(bearer_request("GET", "/api/admin/reader-uid", &reader))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["uid"], "reader-uid");
    assert_eq!(body["isAdmin"], false);

    app.state
        .admins
        .grant("reader-uid", "reader@example.com")
        .await
        .unwrap();

    let response = app
        .send(bearer_request("GET", "/api/admin/reader-uid", &reader))
        .await;
    assert_eq!(body_json(response).await["isAdmin"], true);
}

#[tokio::test]
async fn test_non_admin_cannot_manage_content() {
    let app = TestApp::new();
    let reader = app.id_token("reader-uid", Some("reader@example.com"));

    let response = app
        .send(json_request(
            "POST",
            "/api/admin/videos",
            Some(&reader),
            json!({ "title": "x", "url": "https://cdn.qabas.example/x.mp4" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["reason"], "NOT_ADMIN");

    let response = app
        .send(request("GET", "/api/admin/videos").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_video_admin_crud_and_public_reads() {
    let app = TestApp::new();
    let admin = app.admin_token();

    println!("Step 1: Creating videos...");
    let video = create_video(&app, &admin, "شرح العقيدة الواسطية").await;
    let id = video["id"].as_str().unwrap().to_string();
    assert_eq!(video["views"], 0);
    assert_eq!(video["uploadedBy"], ADMIN_EMAIL);
    create_video(&app, &admin, "الدرس الثاني").await;

    println!("Step 2: Listing publicly...");
    let response = app
        .send(request("GET", "/api/videos?limit=1").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);

    println!("Step 3: Updating as admin...");
    let response = app
        .send(json_request(
            "PUT",
            "/api/admin/videos",
            Some(&admin),
            json!({ "id": id, "featured": true }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["featured"], true);
    assert!(updated["updatedAt"].is_string());

    let response = app
        .send(
            request("GET", "/api/videos?featured=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    let featured = body_json(response).await;
    assert_eq!(featured["data"].as_array().unwrap().len(), 1);
    assert_eq!(featured["data"][0]["id"], id.as_str());

    println!("Step 4: Deleting...");
    let response = app
        .send(bearer_request(
            "DELETE",
            &format!("/api/admin/videos?id={id}"),
            &admin,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["success"], true);

    let response = app
        .send(
            request("GET", &format!("/api/videos/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .send(bearer_request(
            "DELETE",
            &format!("/api/admin/videos?id={id}"),
            &admin,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_video_input() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let response = app
        .send(json_request(
            "POST",
            "/api/admin/videos",
            Some(&admin),
            json!({ "title": "", "url": "https://cdn.qabas.example/v.mp4" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["reason"], "INVALID_INPUT");

    let response = app
        .send(json_request(
            "POST",
            "/api/admin/videos",
            Some(&admin),
            json!({ "title": "x", "url": "ftp://cdn.qabas.example/v.mp4" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_anonymous_view_counting() {
    let app = TestApp::new();
    let admin = app.admin_token();
    let video = create_video(&app, &admin, "درس").await;
    let id = video["id"].as_str().unwrap();

    let response = app
        .send(json_request(
            "PUT",
            "/api/admin/videos",
            None,
            json!({ "id": id, "views": 9999 }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["views"], 1);

    let response = app
        .send(
            request("POST", &format!("/api/videos/{id}/view"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["views"], 2);

    // Anything beyond the view counter still needs an admin
    let response = app
        .send(json_request(
            "PUT",
            "/api/admin/videos",
            None,
            json!({ "id": id, "views": 1, "title": "hijacked" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .send(json_request(
            "PUT",
            "/api/admin/videos",
            None,
            json!({ "id": "missing", "views": 1 }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_podcast_listen_counting() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let response = app
        .send(json_request(
            "POST",
            "/api/admin/podcasts",
            Some(&admin),
            json!({
                "title": "الحلقة الأولى",
                "audioUrl": "https://cdn.qabas.example/e1.mp3",
                "episodeNumber": 1,
                "seasonNumber": 2
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let podcast = body_json(response).await;
    let id = podcast["id"].as_str().unwrap();

    for expected in 1..=2 {
        let response = app
            .send(
                request("POST", &format!("/api/podcasts/{id}/listen"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["listens"], expected);
    }

    let response = app
        .send(request("GET", "/api/podcasts?season=2").body(Body::empty()).unwrap())
        .await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_story_delete_cascades_to_chapters() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let response = app
        .send(json_request(
            "POST",
            "/api/admin/stories",
            Some(&admin),
            json!({ "title": "قصة مع فنجان قهوة", "author": "Maryam" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let story_id = body_json(response).await["id"].as_str().unwrap().to_string();

    for title in ["البداية", "النهاية"] {
        let response = app
            .send(json_request(
                "POST",
                "/api/admin/chapters",
                Some(&admin),
                json!({ "storyId": story_id, "title": title, "content": "..." }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .send(
            request("GET", &format!("/api/stories/{story_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    let story = body_json(response).await;
    assert_eq!(story["chapterCount"], 2);
    assert_eq!(story["chapters"][0]["title"], "البداية");
    assert_eq!(story["chapters"][1]["order"], 2);

    let response = app
        .send(bearer_request(
            "DELETE",
            &format!("/api/admin/stories?id={story_id}"),
            &admin,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send(bearer_request(
            "GET",
            &format!("/api/admin/chapters?storyId={story_id}"),
            &admin,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_chapter_for_missing_story() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let response = app
        .send(json_request(
            "POST",
            "/api/admin/chapters",
            Some(&admin),
            json!({ "storyId": "missing", "title": "x" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_playlist_delete_detaches_videos() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let response = app
        .send(json_request(
            "POST",
            "/api/admin/playlists",
            Some(&admin),
            json!({ "title": "سلسلة السيرة" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let playlist_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .send(json_request(
            "POST",
            "/api/admin/videos",
            Some(&admin),
            json!({
                "title": "الحلقة 1",
                "url": "https://cdn.qabas.example/s1.mp4",
                "playlistId": playlist_id
            }),
        ))
        .await;
    let video_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .send(
            request("GET", &format!("/api/playlists/{playlist_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(body_json(response).await["videos"][0]["id"], video_id.as_str());

    let response = app
        .send(bearer_request(
            "DELETE",
            &format!("/api/admin/playlists?id={playlist_id}"),
            &admin,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send(
            request("GET", &format!("/api/videos/{video_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await.get("playlistId").is_none());
}

#[tokio::test]
async fn test_contact_form_records_client_ip() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let response = app
        .send(
            request("POST", "/api/contact")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
                .body(Body::from(
                    json!({
                        "name": "Omar",
                        "email": "omar@example.com",
                        "subject": "اقتراح",
                        "message": "بارك الله فيكم"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .send(bearer_request("GET", "/api/admin/contact?status=new", &admin))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let forms = body_json(response).await;
    assert_eq!(forms["data"][0]["id"], id.as_str());
    assert_eq!(forms["data"][0]["ip"], "203.0.113.9");

    let response = app
        .send(json_request(
            "PUT",
            "/api/admin/contact",
            Some(&admin),
            json!({ "id": id, "status": "read" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "read");
}

#[tokio::test]
async fn test_join_request_validation() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            "POST",
            "/api/join",
            None,
            json!({ "name": "Fatima", "email": "not-an-email" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["reason"], "INVALID_INPUT");

    let response = app
        .send(json_request(
            "POST",
            "/api/join",
            None,
            json!({ "name": "Fatima", "email": "fatima@example.com", "specialty": "تصميم" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["success"], true);
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = TestApp::new();

    let response = app
        .send(request("GET", "/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");

    let response = app
        .send(request("GET", "/api-doc/openapi.json").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}
