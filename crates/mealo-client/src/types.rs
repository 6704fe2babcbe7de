//! Request/response shapes threaded through the workflow steps.
//!
//! Serde renames map to the platform's camelCase wire names; everything the
//! platform returns beyond these identifiers is treated as opaque
//! `serde_json::Value` and forwarded untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One autocomplete candidate, as far as this client needs to understand it.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationCandidate {
    #[serde(rename = "placeId")]
    pub place_id: String,
    pub provider: String,
}

/// Identifiers minted by the platform when a cart is created. The draft order
/// UUID is the cart's identity for every subsequent cart operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftOrder {
    #[serde(rename = "draftOrderUUID")]
    pub draft_order_uuid: String,
    #[serde(rename = "cartUUID")]
    pub cart_uuid: String,
    #[serde(rename = "storeUUID")]
    pub store_uuid: String,
}

/// A line item to add to a cart.
///
/// The item-instance id distinguishing this addition from other additions of
/// the same catalog item is NOT carried here — it is generated fresh inside
/// the client on every add.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCartItem {
    pub catalog_item_id: String,
    pub store_id: String,
    pub section_id: String,
    pub subsection_id: String,
    /// Unit price in integer cents.
    pub unit_price_cents: i64,
    pub title: String,
    pub quantity: u32,
    /// Opaque customization structure forwarded to the platform as-is.
    #[serde(default)]
    pub customizations: Value,
    #[serde(default)]
    pub image: Option<String>,
}
