//! The cookie-carried state machine a caller walks across workflow steps.
//!
//! The platform treats cookies as hidden session state. Rather than a mutable
//! jar field updated by convention, each state here is a distinct type that
//! owns the running [`CookieJar`]; transitions consume the state, perform the
//! step, fold the response jar back in (last-write-wins) when the step
//! forwards cookies, and hand the next state back. A cart operation cannot be
//! expressed before create-cart has produced a draft order — the platform
//! still enforces it remotely, but here it is also unrepresentable.
//!
//! `Unlocated → Located → Searched → CartOpen → CartPriced`; terminal states
//! (checkout, abandonment) are the caller's business.

use serde_json::Value;

use mealo_core::{CookieJar, LocationSelection};

use crate::client::PlatformClient;
use crate::error::PlatformError;
use crate::types::{DraftOrder, LocationCandidate, NewCartItem};

/// One remote call in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AutocompleteLocation,
    LocationDetails,
    DeliveryLocationDetail,
    SetLocation,
    Search,
    AutocompleteSearch,
    StoreMenu,
    ItemDetail,
    CreateCart,
    AddItem,
    ComputeFee,
    RemoveItem,
}

impl Step {
    /// Whether this step's response cookies are folded back into the running
    /// jar.
    ///
    /// Every session-scoped step forwards except remove-item: the platform
    /// has not been observed to rotate cookies on removal, and this table
    /// keeps that divergence explicit instead of papering over it.
    #[must_use]
    pub const fn forwards_response_cookies(self) -> bool {
        matches!(
            self,
            Step::SetLocation
                | Step::Search
                | Step::AutocompleteSearch
                | Step::CreateCart
                | Step::AddItem
                | Step::ComputeFee
        )
    }
}

/// Workflow start: no location pinned, no jar held.
#[derive(Debug, Default)]
pub struct Unlocated;

impl Unlocated {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Resolves a free-text address and pins the session to it:
    /// autocomplete → details → set-location. The first candidate wins;
    /// callers needing to choose interactively drive [`PlatformClient`]
    /// directly. Location steps never consume a prior jar — the jar returned
    /// by set-location becomes the session baseline.
    ///
    /// # Errors
    ///
    /// [`PlatformError::NoCandidates`] when autocomplete matches nothing;
    /// otherwise whatever the underlying steps return.
    pub async fn locate(
        self,
        client: &PlatformClient,
        query: &str,
    ) -> Result<Located, PlatformError> {
        let candidates = client.autocomplete_location(query).await?;
        let list: Vec<LocationCandidate> = serde_json::from_value(candidates.data.clone())
            .map_err(|e| PlatformError::Deserialize {
                context: format!("autocomplete-location({query}) candidates"),
                source: e,
            })?;
        let Some(candidate) = list.into_iter().next() else {
            return Err(PlatformError::NoCandidates {
                query: query.to_owned(),
            });
        };

        let details = client
            .location_details(&candidate.place_id, &candidate.provider)
            .await?;
        let selection = LocationSelection {
            place_id: candidate.place_id,
            provider: candidate.provider,
            detail: details.data,
        };

        let set = client.set_location(&selection).await?;
        let mut jar = CookieJar::new();
        if Step::SetLocation.forwards_response_cookies() {
            jar.merge(set.cookies);
        }
        Ok(Located { jar })
    }
}

/// A delivery location is pinned; the jar holds the session's location
/// context.
#[derive(Debug, Clone)]
pub struct Located {
    jar: CookieJar,
}

impl Located {
    /// Resumes a session from a jar a caller held onto.
    #[must_use]
    pub fn from_jar(jar: CookieJar) -> Self {
        Self { jar }
    }

    #[must_use]
    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    /// Free-text search. The step may rotate session cookies, so the response
    /// jar is merged into the running jar.
    ///
    /// # Errors
    ///
    /// Propagates the underlying step's failure; the running jar is unchanged
    /// on error and the caller may retry.
    pub async fn search(
        mut self,
        client: &PlatformClient,
        query: &str,
    ) -> Result<Searched, PlatformError> {
        let response = client.search(query, &self.jar).await?;
        if Step::Search.forwards_response_cookies() {
            self.jar.merge(response.cookies);
        }
        Ok(Searched {
            jar: self.jar,
            results: response.data,
        })
    }

    /// Search-box suggestions; same jar contract as search, independent of it.
    ///
    /// # Errors
    ///
    /// Propagates the underlying step's failure.
    pub async fn suggest(
        mut self,
        client: &PlatformClient,
        query: &str,
    ) -> Result<Searched, PlatformError> {
        let response = client.autocomplete_search(query, &self.jar).await?;
        if Step::AutocompleteSearch.forwards_response_cookies() {
            self.jar.merge(response.cookies);
        }
        Ok(Searched {
            jar: self.jar,
            results: response.data,
        })
    }

    /// Opens a cart directly from the located state.
    ///
    /// # Errors
    ///
    /// Propagates the underlying step's failure.
    pub async fn create_cart(
        self,
        client: &PlatformClient,
        item: &NewCartItem,
    ) -> Result<CartOpen, PlatformError> {
        open_cart(client, self.jar, item).await
    }
}

/// Search results are in hand; the jar may have rotated.
#[derive(Debug, Clone)]
pub struct Searched {
    jar: CookieJar,
    results: Value,
}

impl Searched {
    #[must_use]
    pub fn results(&self) -> &Value {
        &self.results
    }

    #[must_use]
    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    /// Runs another search with the current jar.
    ///
    /// # Errors
    ///
    /// Propagates the underlying step's failure.
    pub async fn search(
        mut self,
        client: &PlatformClient,
        query: &str,
    ) -> Result<Searched, PlatformError> {
        let response = client.search(query, &self.jar).await?;
        if Step::Search.forwards_response_cookies() {
            self.jar.merge(response.cookies);
        }
        self.results = response.data;
        Ok(self)
    }

    /// Opens a cart with the running jar.
    ///
    /// # Errors
    ///
    /// Propagates the underlying step's failure.
    pub async fn create_cart(
        self,
        client: &PlatformClient,
        item: &NewCartItem,
    ) -> Result<CartOpen, PlatformError> {
        open_cart(client, self.jar, item).await
    }
}

async fn open_cart(
    client: &PlatformClient,
    mut jar: CookieJar,
    item: &NewCartItem,
) -> Result<CartOpen, PlatformError> {
    let created = client.create_cart(item, &jar).await?;
    if Step::CreateCart.forwards_response_cookies() {
        jar.merge(created.response.cookies);
    }
    Ok(CartOpen {
        jar,
        order: created.order,
        first_item_instance_id: created.first_item_instance_id,
    })
}

/// A draft order exists; its identifiers thread through every cart
/// operation.
#[derive(Debug, Clone)]
pub struct CartOpen {
    jar: CookieJar,
    order: DraftOrder,
    first_item_instance_id: String,
}

impl CartOpen {
    #[must_use]
    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    #[must_use]
    pub fn order(&self) -> &DraftOrder {
        &self.order
    }

    /// Instance id of the line item the cart was created with.
    #[must_use]
    pub fn first_item_instance_id(&self) -> &str {
        &self.first_item_instance_id
    }

    /// Adds a line item; returns the fresh instance id for later removal.
    ///
    /// # Errors
    ///
    /// Propagates the underlying step's failure; the jar and cart identity
    /// are unchanged on error.
    pub async fn add_item(
        &mut self,
        client: &PlatformClient,
        item: &NewCartItem,
    ) -> Result<String, PlatformError> {
        let mutation = client
            .add_item(
                &self.order.draft_order_uuid,
                &self.order.cart_uuid,
                item,
                &self.jar,
            )
            .await?;
        if Step::AddItem.forwards_response_cookies() {
            self.jar.merge(mutation.response.cookies);
        }
        Ok(mutation.item_instance_id)
    }

    /// Removes a line item by instance id. Per the forwarding table, the
    /// response jar is NOT merged here.
    ///
    /// # Errors
    ///
    /// Propagates the underlying step's failure.
    pub async fn remove_item(
        &mut self,
        client: &PlatformClient,
        item_instance_id: &str,
    ) -> Result<Value, PlatformError> {
        let response = client
            .remove_item(
                &self.order.cart_uuid,
                &self.order.draft_order_uuid,
                item_instance_id,
                &self.order.store_uuid,
                &self.jar,
            )
            .await?;
        if Step::RemoveItem.forwards_response_cookies() {
            self.jar.merge(response.cookies);
        }
        Ok(response.data)
    }

    /// Prices the cart's current contents. Does not change the item set and
    /// may be repeated; pricing itself is time-sensitive on the remote side.
    ///
    /// # Errors
    ///
    /// Propagates the underlying step's failure.
    pub async fn compute_fee(mut self, client: &PlatformClient) -> Result<CartPriced, PlatformError> {
        let response = client
            .compute_fee(&self.order.draft_order_uuid, &self.jar)
            .await?;
        if Step::ComputeFee.forwards_response_cookies() {
            self.jar.merge(response.cookies);
        }
        Ok(CartPriced {
            cart: self,
            fees: response.data,
        })
    }
}

/// A fee breakdown has been computed for the cart's current contents.
#[derive(Debug, Clone)]
pub struct CartPriced {
    cart: CartOpen,
    fees: Value,
}

impl CartPriced {
    #[must_use]
    pub fn fees(&self) -> &Value {
        &self.fees
    }

    #[must_use]
    pub fn cart(&self) -> &CartOpen {
        &self.cart
    }

    /// Hands the cart back for further mutation; the breakdown is stale from
    /// that point and must be recomputed.
    #[must_use]
    pub fn into_cart(self) -> CartOpen {
        self.cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwarding_table_matches_observed_behavior() {
        assert!(Step::SetLocation.forwards_response_cookies());
        assert!(Step::Search.forwards_response_cookies());
        assert!(Step::AutocompleteSearch.forwards_response_cookies());
        assert!(Step::CreateCart.forwards_response_cookies());
        assert!(Step::AddItem.forwards_response_cookies());
        assert!(Step::ComputeFee.forwards_response_cookies());
        // Location resolution and catalog reads carry no session; remove-item
        // is the observed divergence among the mutating steps.
        assert!(!Step::AutocompleteLocation.forwards_response_cookies());
        assert!(!Step::LocationDetails.forwards_response_cookies());
        assert!(!Step::DeliveryLocationDetail.forwards_response_cookies());
        assert!(!Step::StoreMenu.forwards_response_cookies());
        assert!(!Step::ItemDetail.forwards_response_cookies());
        assert!(!Step::RemoveItem.forwards_response_cookies());
    }

    #[test]
    fn located_resumes_from_caller_jar() {
        let mut jar = CookieJar::new();
        jar.insert("session", "abc");
        let located = Located::from_jar(jar);
        assert_eq!(located.jar().get("session"), Some("abc"));
    }
}
