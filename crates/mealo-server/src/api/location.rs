use axum::{extract::State, response::Response, Extension, Json};
use serde::Deserialize;

use mealo_core::LocationSelection;

use crate::middleware::RequestId;

use super::{bare_reply, map_platform_error, step_reply, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AutocompleteBody {
    query: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct PlaceBody {
    place_id: String,
    provider: String,
}

pub(super) async fn autocomplete(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AutocompleteBody>,
) -> Result<Response, ApiError> {
    let response = state
        .client
        .autocomplete_location(&body.query)
        .await
        .map_err(|e| map_platform_error(req_id.0.clone(), &e))?;
    Ok(bare_reply(req_id.0, response))
}

pub(super) async fn details(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<PlaceBody>,
) -> Result<Response, ApiError> {
    let response = state
        .client
        .location_details(&body.place_id, &body.provider)
        .await
        .map_err(|e| map_platform_error(req_id.0.clone(), &e))?;
    Ok(bare_reply(req_id.0, response))
}

pub(super) async fn delivery_detail(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<PlaceBody>,
) -> Result<Response, ApiError> {
    let response = state
        .client
        .delivery_location_detail(&body.place_id, &body.provider)
        .await
        .map_err(|e| map_platform_error(req_id.0.clone(), &e))?;
    Ok(bare_reply(req_id.0, response))
}

/// Pins the session to a resolved location. The returned jar is the session
/// baseline callers must thread through every following step.
pub(super) async fn set(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(selection): Json<LocationSelection>,
) -> Result<Response, ApiError> {
    let response = state
        .client
        .set_location(&selection)
        .await
        .map_err(|e| map_platform_error(req_id.0.clone(), &e))?;
    Ok(step_reply(&state, req_id.0, response))
}
