use axum::{
    extract::{Path, State},
    response::Response,
    Extension,
};

use crate::middleware::RequestId;

use super::{bare_reply, map_platform_error, ApiError, AppState};

pub(super) async fn menu(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(store_id): Path<String>,
) -> Result<Response, ApiError> {
    let response = state
        .client
        .store_menu(&store_id)
        .await
        .map_err(|e| map_platform_error(req_id.0.clone(), &e))?;
    Ok(bare_reply(req_id.0, response))
}

pub(super) async fn item_detail(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((store_id, section_id, subsection_id, item_id)): Path<(String, String, String, String)>,
) -> Result<Response, ApiError> {
    let response = state
        .client
        .item_detail(&store_id, &section_id, &subsection_id, &item_id)
        .await
        .map_err(|e| map_platform_error(req_id.0.clone(), &e))?;
    Ok(bare_reply(req_id.0, response))
}
