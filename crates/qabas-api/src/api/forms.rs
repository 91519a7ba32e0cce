// Contact form and join request HTTP routes
// Decision: Forms are submitted anonymously; the client IP is recorded on the stored record

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use qabas_core::{ContactForm, ContactStatus, JoinRequest, JoinStatus};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::common::{
    ApiError, ApiJson, ApiQuery, ErrorResponse, IdQuery, ListResponse, SuccessResponse,
};
use super::validation::{
    validate_email, validate_max, validate_required, ValidationError, MAX_FORM_MESSAGE_BYTES,
    MAX_TITLE_BYTES,
};
use crate::app::AppState;
use crate::auth::AdminUser;

/// Contact form submission
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_required("name", &self.name, MAX_TITLE_BYTES)?;
        validate_email("email", &self.email)?;
        validate_max("subject", &self.subject, MAX_TITLE_BYTES)?;
        validate_required("message", &self.message, MAX_FORM_MESSAGE_BYTES)
    }
}

/// Join ("volunteer with us") request submission
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct JoinRequestBody {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub message: String,
}

impl JoinRequestBody {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_required("name", &self.name, MAX_TITLE_BYTES)?;
        validate_email("email", &self.email)?;
        validate_max("phone", &self.phone, 64)?;
        validate_max("specialty", &self.specialty, MAX_TITLE_BYTES)?;
        validate_max("message", &self.message, MAX_FORM_MESSAGE_BYTES)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ContactListQuery {
    pub status: Option<ContactStatus>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JoinListQuery {
    pub status: Option<JoinStatus>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateContactStatusRequest {
    pub id: String,
    pub status: ContactStatus,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateJoinStatusRequest {
    pub id: String,
    pub status: JoinStatus,
}

/// First `X-Forwarded-For` entry, else `X-Real-IP`, else the socket address
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    let real_ip = || {
        headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/api/join", post(submit_join))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/contact",
            get(list_contact_forms)
                .put(update_contact_status)
                .delete(delete_contact_form),
        )
        .route(
            "/api/admin/join-requests",
            get(list_join_requests)
                .put(update_join_status)
                .delete(delete_join_request),
        )
}

/// POST /api/contact - Submit the contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message received", body = SuccessResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    ),
    tag = "forms"
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    ApiJson(req): ApiJson<ContactRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    req.validate()?;
    let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    let form = state.forms.submit_contact(req, ip).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(form.id))))
}

/// POST /api/join - Submit a join request
#[utoipa::path(
    post,
    path = "/api/join",
    request_body = JoinRequestBody,
    responses(
        (status = 201, description = "Request received", body = SuccessResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    ),
    tag = "forms"
)]
pub async fn submit_join(
    State(state): State<AppState>,
    headers: HeaderMap,
    peer: Option<ConnectInfo<SocketAddr>>,
    ApiJson(req): ApiJson<JoinRequestBody>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    req.validate()?;
    let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    let request = state.forms.submit_join(req, ip).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(request.id))))
}

/// GET /api/admin/contact - List contact forms
#[utoipa::path(
    get,
    path = "/api/admin/contact",
    params(ContactListQuery),
    responses(
        (status = 200, description = "Contact forms", body = ListResponse<ContactForm>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn list_contact_forms(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(query): ApiQuery<ContactListQuery>,
) -> Result<Json<ListResponse<ContactForm>>, ApiError> {
    Ok(Json(state.forms.list_contact(query.status).await?.into()))
}

/// PUT /api/admin/contact - Change a contact form's status
#[utoipa::path(
    put,
    path = "/api/admin/contact",
    request_body = UpdateContactStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ContactForm),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Form not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_contact_status(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiJson(req): ApiJson<UpdateContactStatusRequest>,
) -> Result<Json<ContactForm>, ApiError> {
    let form = state
        .forms
        .set_contact_status(&req.id, req.status)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(form))
}

/// DELETE /api/admin/contact?id= - Delete a contact form
#[utoipa::path(
    delete,
    path = "/api/admin/contact",
    params(IdQuery),
    responses(
        (status = 200, description = "Form deleted", body = SuccessResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Form not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_contact_form(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(IdQuery { id }): ApiQuery<IdQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !state.forms.delete_contact(&id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SuccessResponse::new(id)))
}

/// GET /api/admin/join-requests - List join requests
#[utoipa::path(
    get,
    path = "/api/admin/join-requests",
    params(JoinListQuery),
    responses(
        (status = 200, description = "Join requests", body = ListResponse<JoinRequest>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn list_join_requests(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(query): ApiQuery<JoinListQuery>,
) -> Result<Json<ListResponse<JoinRequest>>, ApiError> {
    Ok(Json(state.forms.list_join(query.status).await?.into()))
}

/// PUT /api/admin/join-requests - Accept or reject a join request
#[utoipa::path(
    put,
    path = "/api/admin/join-requests",
    request_body = UpdateJoinStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = JoinRequest),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Request not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn update_join_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    ApiJson(req): ApiJson<UpdateJoinStatusRequest>,
) -> Result<Json<JoinRequest>, ApiError> {
    let request = state
        .forms
        .set_join_status(&req.id, req.status)
        .await?
        .ok_or(ApiError::NotFound)?;

    tracing::info!(id = %request.id, status = %request.status, by = %admin.email, "Join request reviewed");
    Ok(Json(request))
}

/// DELETE /api/admin/join-requests?id= - Delete a join request
#[utoipa::path(
    delete,
    path = "/api/admin/join-requests",
    params(IdQuery),
    responses(
        (status = 200, description = "Request deleted", body = SuccessResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an admin", body = ErrorResponse),
        (status = 404, description = "Request not found", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn delete_join_request(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ApiQuery(IdQuery { id }): ApiQuery<IdQuery>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !state.forms.delete_join(&id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(SuccessResponse::new(id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_precedence() {
        let peer: SocketAddr = "10.0.0.7:51234".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, Some(peer)).as_deref(), Some("10.0.0.7"));
        assert_eq!(client_ip(&headers, None), None);

        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.4"));
        assert_eq!(
            client_ip(&headers, Some(peer)).as_deref(),
            Some("198.51.100.4")
        );

        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        assert_eq!(
            client_ip(&headers, Some(peer)).as_deref(),
            Some("203.0.113.9")
        );
    }
}
