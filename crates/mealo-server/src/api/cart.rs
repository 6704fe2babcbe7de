use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use mealo_client::types::{DraftOrder, NewCartItem};
use mealo_client::workflow::Step;
use mealo_core::CookieJar;

use crate::middleware::RequestId;

use super::{
    bare_reply, forwarded_set_cookies, map_platform_error, step_reply, ApiError, ApiResponse,
    AppState, ResponseMeta,
};

#[derive(Debug, Deserialize)]
pub(super) struct CreateCartBody {
    item: NewCartItem,
    #[serde(default)]
    cookies: CookieJar,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddItemBody {
    draft_order_uuid: String,
    cart_uuid: String,
    item: NewCartItem,
    #[serde(default)]
    cookies: CookieJar,
}

#[derive(Debug, Deserialize)]
pub(super) struct FeeBody {
    draft_order_uuid: String,
    #[serde(default)]
    cookies: CookieJar,
}

#[derive(Debug, Deserialize)]
pub(super) struct RemoveItemBody {
    cart_uuid: String,
    draft_order_uuid: String,
    item_instance_id: String,
    store_uuid: String,
    #[serde(default)]
    cookies: CookieJar,
}

#[derive(Debug, Serialize)]
struct CreateCartData {
    order: DraftOrder,
    first_item_instance_id: String,
    data: serde_json::Value,
    cookies: CookieJar,
}

#[derive(Debug, Serialize)]
struct AddItemData {
    item_instance_id: String,
    data: serde_json::Value,
    cookies: CookieJar,
}

pub(super) async fn create(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CreateCartBody>,
) -> Result<Response, ApiError> {
    let created = state
        .client
        .create_cart(&body.item, &body.cookies)
        .await
        .map_err(|e| map_platform_error(req_id.0.clone(), &e))?;

    let set_cookies = forwarded_set_cookies(&state, &created.response.set_cookie_lines);
    let payload = ApiResponse {
        data: CreateCartData {
            order: created.order,
            first_item_instance_id: created.first_item_instance_id,
            data: created.response.data,
            cookies: created.response.cookies,
        },
        meta: ResponseMeta::new(req_id.0),
    };
    Ok((AppendHeaders(set_cookies), Json(payload)).into_response())
}

pub(super) async fn add_item(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AddItemBody>,
) -> Result<Response, ApiError> {
    let mutation = state
        .client
        .add_item(
            &body.draft_order_uuid,
            &body.cart_uuid,
            &body.item,
            &body.cookies,
        )
        .await
        .map_err(|e| map_platform_error(req_id.0.clone(), &e))?;

    let set_cookies = forwarded_set_cookies(&state, &mutation.response.set_cookie_lines);
    let payload = ApiResponse {
        data: AddItemData {
            item_instance_id: mutation.item_instance_id,
            data: mutation.response.data,
            cookies: mutation.response.cookies,
        },
        meta: ResponseMeta::new(req_id.0),
    };
    Ok((AppendHeaders(set_cookies), Json(payload)).into_response())
}

pub(super) async fn fee(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<FeeBody>,
) -> Result<Response, ApiError> {
    let response = state
        .client
        .compute_fee(&body.draft_order_uuid, &body.cookies)
        .await
        .map_err(|e| map_platform_error(req_id.0.clone(), &e))?;
    Ok(step_reply(&state, req_id.0, response))
}

/// Removal is the one mutating step whose response cookies are not handed
/// back — per the observed platform behavior encoded in the step table.
pub(super) async fn remove_item(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<RemoveItemBody>,
) -> Result<Response, ApiError> {
    let response = state
        .client
        .remove_item(
            &body.cart_uuid,
            &body.draft_order_uuid,
            &body.item_instance_id,
            &body.store_uuid,
            &body.cookies,
        )
        .await
        .map_err(|e| map_platform_error(req_id.0.clone(), &e))?;

    if Step::RemoveItem.forwards_response_cookies() {
        Ok(step_reply(&state, req_id.0, response))
    } else {
        Ok(bare_reply(req_id.0, response))
    }
}
