mod cart;
mod location;
mod search;
mod stores;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use mealo_client::{PlatformClient, PlatformError, StepResponse};
use mealo_core::{rewrite_domain, CookieJar};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<PlatformClient>,
    /// Source side of the `Set-Cookie` domain rewrite (the platform's domain).
    pub platform_domain: String,
    /// Target side: the domain this service's callers see.
    pub cookie_domain: String,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Step payload handed back to callers: the platform's body verbatim plus the
/// jar the caller must merge into its running jar before the next step.
#[derive(Debug, Serialize)]
pub(super) struct StepData {
    data: serde_json::Value,
    cookies: CookieJar,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_status" | "upstream_unreachable" | "upstream_cookie" | "upstream_body" => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a platform client failure to a coded API error, logging at the
/// boundary. The remote status and body ride in the message verbatim; no
/// local recovery, no retry.
pub(super) fn map_platform_error(request_id: String, error: &PlatformError) -> ApiError {
    tracing::warn!(error = %error, "platform call failed");
    let code = match error {
        PlatformError::Status { .. } => "upstream_status",
        PlatformError::Http(_) => "upstream_unreachable",
        PlatformError::Cookie(_) => "upstream_cookie",
        PlatformError::Deserialize { .. } => "upstream_body",
        PlatformError::NoCandidates { .. } => "not_found",
        PlatformError::InvalidBaseUrl { .. } => "internal_error",
    };
    ApiError::new(request_id, code, error.to_string())
}

/// Domain-rewrites the platform's `Set-Cookie` lines so they are valid for
/// this service's own host, ready to append to an outgoing response.
pub(super) fn forwarded_set_cookies(
    state: &AppState,
    lines: &[String],
) -> Vec<(HeaderName, HeaderValue)> {
    rewrite_domain(lines, &state.platform_domain, &state.cookie_domain)
        .iter()
        .filter_map(|line| HeaderValue::from_str(line).ok())
        .map(|value| (header::SET_COOKIE, value))
        .collect()
}

/// Replies with `{data, cookies}` and re-emits the platform's `Set-Cookie`
/// lines on this response, domain-rewritten so they are valid for this
/// service's own host.
pub(super) fn step_reply(state: &AppState, request_id: String, response: StepResponse) -> Response {
    let set_cookies = forwarded_set_cookies(state, &response.set_cookie_lines);

    let body = ApiResponse {
        data: StepData {
            data: response.data,
            cookies: response.cookies,
        },
        meta: ResponseMeta::new(request_id),
    };
    (AppendHeaders(set_cookies), Json(body)).into_response()
}

/// Replies with the platform payload alone — for the read-only, cookie-free
/// steps.
pub(super) fn bare_reply(request_id: String, response: StepResponse) -> Response {
    Json(ApiResponse {
        data: response.data,
        meta: ResponseMeta::new(request_id),
    })
    .into_response()
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route(
            "/api/v1/location/autocomplete",
            post(location::autocomplete),
        )
        .route("/api/v1/location/details", post(location::details))
        .route(
            "/api/v1/location/delivery-detail",
            post(location::delivery_detail),
        )
        .route("/api/v1/location/set", post(location::set))
        .route("/api/v1/search", post(search::search))
        .route("/api/v1/search/autocomplete", post(search::autocomplete))
        .route("/api/v1/stores/{store_id}/menu", get(stores::menu))
        .route(
            "/api/v1/stores/{store_id}/sections/{section_id}/subsections/{subsection_id}/items/{item_id}",
            get(stores::item_detail),
        )
        .route("/api/v1/cart", post(cart::create))
        .route("/api/v1/cart/items", post(cart::add_item))
        .route("/api/v1/cart/fee", post(cart::fee))
        .route("/api/v1/cart/items/remove", post(cart::remove_item))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    // No local state to probe: the service is healthy if it can answer.
    // Remote reachability is the workflow's concern, surfaced per call.
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData { status: "ok" },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}
