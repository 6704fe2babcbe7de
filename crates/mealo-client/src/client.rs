//! HTTP client for the Mealo web API.
//!
//! One method per workflow step. Every call attaches the browser header
//! table, renders the caller's [`CookieJar`] (when the step takes one) into a
//! `Cookie` header, and normalizes the response into a [`StepResponse`]:
//! parsed JSON body plus the jar parsed from the response's `Set-Cookie`
//! headers. Non-2xx statuses become [`PlatformError::Status`]; there are no
//! retries and no caching.

use std::time::Duration;

use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::{json, Value};
use uuid::Uuid;

use mealo_core::{encode_location_value, CookieJar, LocationSelection};

use crate::error::PlatformError;
use crate::headers::browser_headers;
use crate::types::{DraftOrder, NewCartItem};

pub const DEFAULT_BASE_URL: &str = "https://www.mealo.app";

/// Cookie name the platform reads the encoded location selection from.
pub const LOCATION_COOKIE: &str = "mealo_location";

/// Normalized result of one workflow step.
#[derive(Debug, Clone)]
pub struct StepResponse {
    /// Parsed JSON body, forwarded to the caller as-is.
    pub data: Value,
    /// Jar parsed from the response's `Set-Cookie` headers. Empty when the
    /// response carried none — that is not an error.
    pub cookies: CookieJar,
    /// The raw `Set-Cookie` lines as received, kept so a fronting service can
    /// domain-rewrite and re-emit them verbatim.
    pub set_cookie_lines: Vec<String>,
}

/// Result of creating a cart: the platform-minted identifiers plus the
/// locally generated instance id of the first line item.
#[derive(Debug, Clone)]
pub struct CreatedCart {
    pub order: DraftOrder,
    pub first_item_instance_id: String,
    pub response: StepResponse,
}

/// Result of a cart line-item mutation.
#[derive(Debug, Clone)]
pub struct CartMutation {
    /// Instance id generated for this addition; needed later to remove
    /// exactly this line.
    pub item_instance_id: String,
    pub response: StepResponse,
}

/// Client for the Mealo web API.
///
/// Holds the HTTP client, the normalized platform origin, and the
/// precomputed browser header table. Use [`PlatformClient::from_config`] for
/// production or [`PlatformClient::with_base_url`] to point at a mock server
/// in tests. The client is stateless: all session state lives in the jars the
/// caller threads through it.
pub struct PlatformClient {
    client: Client,
    base_url: Url,
    headers: HeaderMap,
}

impl PlatformClient {
    /// Creates a client pointed at the production platform.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, PlatformError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`PlatformClient::with_base_url`].
    pub fn from_config(config: &mealo_core::AppConfig) -> Result<Self, PlatformError> {
        Self::with_base_url(
            &config.platform_base_url,
            config.platform_timeout_secs,
            &config.platform_user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlatformError::InvalidBaseUrl`] if
    /// `base_url` does not parse as an origin.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let origin = base_url.trim_end_matches('/').to_owned();
        let base_url = Url::parse(&origin).map_err(|e| PlatformError::InvalidBaseUrl {
            base_url: origin.clone(),
            reason: e.to_string(),
        })?;

        let headers = browser_headers(&origin);
        Ok(Self {
            client,
            base_url,
            headers,
        })
    }

    /// Resolves a free-text address query to candidate locations. Never
    /// consumes a jar: location resolution is always the chain's start.
    ///
    /// # Errors
    ///
    /// [`PlatformError::Status`] on non-2xx, [`PlatformError::Http`] on
    /// network failure, [`PlatformError::Deserialize`] on a non-JSON body.
    pub async fn autocomplete_location(&self, query: &str) -> Result<StepResponse, PlatformError> {
        let payload = json!({ "query": query });
        self.execute(
            self.post("/api/location/autocomplete", &payload, None),
            "autocomplete-location",
        )
        .await
    }

    /// Fetches full details for one autocomplete candidate.
    ///
    /// # Errors
    ///
    /// See [`PlatformClient::autocomplete_location`].
    pub async fn location_details(
        &self,
        place_id: &str,
        provider: &str,
    ) -> Result<StepResponse, PlatformError> {
        let payload = json!({ "placeId": place_id, "provider": provider });
        self.execute(
            self.post("/api/location/details", &payload, None),
            "location-details",
        )
        .await
    }

    /// Fetches the deliverable form of a place id + provider pair.
    ///
    /// # Errors
    ///
    /// See [`PlatformClient::autocomplete_location`].
    pub async fn delivery_location_detail(
        &self,
        place_id: &str,
        provider: &str,
    ) -> Result<StepResponse, PlatformError> {
        let payload = json!({ "placeId": place_id, "provider": provider });
        self.execute(
            self.post("/api/location/delivery", &payload, None),
            "delivery-location-detail",
        )
        .await
    }

    /// Pins the session to a resolved location.
    ///
    /// The location detail travels as a single encoded cookie — the
    /// platform's bespoke format, see
    /// [`mealo_core::encode_location_value`] — and the response's fresh jar
    /// becomes the session's location context.
    ///
    /// # Errors
    ///
    /// See [`PlatformClient::autocomplete_location`];
    /// [`PlatformError::Cookie`] if a response `Set-Cookie` line is
    /// malformed.
    pub async fn set_location(
        &self,
        selection: &LocationSelection,
    ) -> Result<StepResponse, PlatformError> {
        let mut location_jar = CookieJar::new();
        location_jar.insert(LOCATION_COOKIE, encode_location_value(&selection.detail));

        let payload = json!({
            "placeId": selection.place_id,
            "provider": selection.provider,
        });
        self.execute(
            self.post("/api/location/set", &payload, Some(&location_jar)),
            "set-location",
        )
        .await
    }

    /// Free-text search for restaurants and dishes. Requires the jar produced
    /// by set-location; the step itself may rotate session cookies, so the
    /// caller must merge the response jar.
    ///
    /// # Errors
    ///
    /// See [`PlatformClient::autocomplete_location`].
    pub async fn search(&self, query: &str, jar: &CookieJar) -> Result<StepResponse, PlatformError> {
        let payload = json!({ "query": query });
        self.execute(self.post("/api/search", &payload, Some(jar)), "search")
            .await
    }

    /// Search-box suggestions. Same jar contract as [`PlatformClient::search`],
    /// independent of it.
    ///
    /// # Errors
    ///
    /// See [`PlatformClient::autocomplete_location`].
    pub async fn autocomplete_search(
        &self,
        query: &str,
        jar: &CookieJar,
    ) -> Result<StepResponse, PlatformError> {
        let payload = json!({ "query": query });
        self.execute(
            self.post("/api/search/autocomplete", &payload, Some(jar)),
            "autocomplete-search",
        )
        .await
    }

    /// Fetches a store's full menu. Store catalogs are store-scoped, not
    /// session-scoped: no jar is sent and none comes back.
    ///
    /// # Errors
    ///
    /// See [`PlatformClient::autocomplete_location`].
    pub async fn store_menu(&self, store_id: &str) -> Result<StepResponse, PlatformError> {
        let url = self.endpoint(&format!("/api/stores/{store_id}/menu"));
        let request = self.client.get(url).headers(self.headers.clone());
        self.execute(request, "store-menu").await
    }

    /// Fetches one menu item's detail payload.
    ///
    /// # Errors
    ///
    /// See [`PlatformClient::autocomplete_location`].
    pub async fn item_detail(
        &self,
        store_id: &str,
        section_id: &str,
        subsection_id: &str,
        item_id: &str,
    ) -> Result<StepResponse, PlatformError> {
        let mut url = self.endpoint(&format!("/api/stores/{store_id}/items/{item_id}"));
        url.query_pairs_mut()
            .append_pair("sectionId", section_id)
            .append_pair("subsectionId", subsection_id);
        let request = self.client.get(url).headers(self.headers.clone());
        self.execute(request, "item-detail").await
    }

    /// Opens a draft order with its first line item.
    ///
    /// A fresh item-instance id is generated for the line so repeated
    /// additions of the same catalog item stay distinguishable.
    ///
    /// # Errors
    ///
    /// See [`PlatformClient::autocomplete_location`];
    /// [`PlatformError::Deserialize`] if the response lacks the draft-order
    /// identifiers.
    pub async fn create_cart(
        &self,
        item: &NewCartItem,
        jar: &CookieJar,
    ) -> Result<CreatedCart, PlatformError> {
        let instance_id = Uuid::new_v4().to_string();
        let payload = json!({
            "storeUUID": item.store_id,
            "item": Self::item_payload(item, &instance_id),
        });
        let response = self
            .execute(self.post("/api/cart", &payload, Some(jar)), "create-cart")
            .await?;

        let order: DraftOrder = serde_json::from_value(response.data.clone()).map_err(|e| {
            PlatformError::Deserialize {
                context: "create-cart response".to_owned(),
                source: e,
            }
        })?;

        Ok(CreatedCart {
            order,
            first_item_instance_id: instance_id,
            response,
        })
    }

    /// Adds a line item to an existing draft order.
    ///
    /// # Errors
    ///
    /// See [`PlatformClient::autocomplete_location`]. Invoking this before
    /// create-cart is rejected by the platform, surfacing as
    /// [`PlatformError::Status`] — there is no local validation.
    pub async fn add_item(
        &self,
        draft_order_uuid: &str,
        cart_uuid: &str,
        item: &NewCartItem,
        jar: &CookieJar,
    ) -> Result<CartMutation, PlatformError> {
        let instance_id = Uuid::new_v4().to_string();
        let payload = json!({
            "draftOrderUUID": draft_order_uuid,
            "cartUUID": cart_uuid,
            "item": Self::item_payload(item, &instance_id),
        });
        let response = self
            .execute(self.post("/api/cart/items", &payload, Some(jar)), "add-item")
            .await?;

        Ok(CartMutation {
            item_instance_id: instance_id,
            response,
        })
    }

    /// Computes the fee/pricing breakdown for the draft order's current
    /// contents. Derived fresh every call; never cached.
    ///
    /// # Errors
    ///
    /// See [`PlatformClient::autocomplete_location`].
    pub async fn compute_fee(
        &self,
        draft_order_uuid: &str,
        jar: &CookieJar,
    ) -> Result<StepResponse, PlatformError> {
        let payload = json!({ "draftOrderUUID": draft_order_uuid });
        self.execute(self.post("/api/cart/fee", &payload, Some(jar)), "compute-fee")
            .await
    }

    /// Removes one line item by its instance id.
    ///
    /// The response's cookies are returned like every other step's, but the
    /// platform has not been observed to rotate anything here — see
    /// [`crate::workflow::Step::forwards_response_cookies`].
    ///
    /// # Errors
    ///
    /// See [`PlatformClient::autocomplete_location`].
    pub async fn remove_item(
        &self,
        cart_uuid: &str,
        draft_order_uuid: &str,
        item_instance_id: &str,
        store_uuid: &str,
        jar: &CookieJar,
    ) -> Result<StepResponse, PlatformError> {
        let payload = json!({
            "cartUUID": cart_uuid,
            "draftOrderUUID": draft_order_uuid,
            "itemInstanceId": item_instance_id,
            "storeUUID": store_uuid,
        });
        self.execute(
            self.post("/api/cart/items/remove", &payload, Some(jar)),
            "remove-item",
        )
        .await
    }

    fn item_payload(item: &NewCartItem, instance_id: &str) -> Value {
        json!({
            "itemId": item.catalog_item_id,
            "storeId": item.store_id,
            "sectionId": item.section_id,
            "subsectionId": item.subsection_id,
            "price": item.unit_price_cents,
            "title": item.title,
            "quantity": item.quantity,
            "customizationList": item.customizations,
            "imageUrl": item.image,
            "itemInstanceId": instance_id,
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(path);
        url
    }

    fn post(&self, path: &str, payload: &Value, jar: Option<&CookieJar>) -> RequestBuilder {
        let mut request = self
            .client
            .post(self.endpoint(path))
            .headers(self.headers.clone())
            .json(payload);
        if let Some(jar) = jar.filter(|jar| !jar.is_empty()) {
            request = request.header(COOKIE, jar.header_string());
        }
        request
    }

    /// Sends the request, classifies non-2xx statuses into
    /// [`PlatformError::Status`], and parses body + `Set-Cookie` headers.
    async fn execute(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<StepResponse, PlatformError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), context, "platform call failed");
            return Err(PlatformError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_owned(),
                body,
            });
        }

        let set_cookie_lines: Vec<String> = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_owned)
            .collect();
        let cookies = CookieJar::from_set_cookie_lines(&set_cookie_lines)?;

        let body = response.text().await?;
        let data = serde_json::from_str(&body).map_err(|e| PlatformError::Deserialize {
            context: context.to_owned(),
            source: e,
        })?;

        Ok(StepResponse {
            data,
            cookies,
            set_cookie_lines,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
