use axum::{extract::State, response::Response, Extension, Json};
use serde::Deserialize;

use mealo_core::CookieJar;

use crate::middleware::RequestId;

use super::{map_platform_error, step_reply, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchBody {
    query: String,
    /// The caller's running jar; required from set-location onward, but not
    /// validated locally — a missing location context surfaces as the
    /// platform's own rejection.
    #[serde(default)]
    cookies: CookieJar,
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchBody>,
) -> Result<Response, ApiError> {
    let response = state
        .client
        .search(&body.query, &body.cookies)
        .await
        .map_err(|e| map_platform_error(req_id.0.clone(), &e))?;
    Ok(step_reply(&state, req_id.0, response))
}

pub(super) async fn autocomplete(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchBody>,
) -> Result<Response, ApiError> {
    let response = state
        .client
        .autocomplete_search(&body.query, &body.cookies)
        .await
        .map_err(|e| map_platform_error(req_id.0.clone(), &e))?;
    Ok(step_reply(&state, req_id.0, response))
}
