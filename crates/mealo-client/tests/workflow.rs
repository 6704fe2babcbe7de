//! Scripted end-to-end workflow against a wiremock platform: every step's
//! mock matches the exact `Cookie` header the merged jar should produce, so
//! any dropped or unmerged cookie fails the run at the step that needed it.

use mealo_client::types::NewCartItem;
use mealo_client::workflow::Unlocated;
use mealo_client::{PlatformClient, PlatformError};
use mealo_core::CookieJar;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlatformClient {
    PlatformClient::with_base_url(base_url, 30, "test-agent")
        .expect("client construction should not fail")
}

fn item(catalog_item_id: &str, quantity: u32) -> NewCartItem {
    NewCartItem {
        catalog_item_id: catalog_item_id.to_owned(),
        store_id: "store-1".to_owned(),
        section_id: "sec-1".to_owned(),
        subsection_id: "sub-1".to_owned(),
        unit_price_cents: 1250,
        title: "Margherita".to_owned(),
        quantity,
        customizations: json!({}),
        image: None,
    }
}

async fn mount_location_chain(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/location/autocomplete"))
        .and(body_partial_json(json!({"query": "123 Main St"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"placeId": "p-1", "provider": "google"}
        ])))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/location/details"))
        .and(body_partial_json(json!({"placeId": "p-1"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"formattedAddress": "123 Main St"})),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/location/set"))
        .and(header(
            "cookie",
            "mealo_location={%22formattedAddress%22:%22123MainSt%22}; ",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .append_header("set-cookie", "session=abc; Path=/; HttpOnly")
                .append_header("set-cookie", "zone=us-east; Domain=.mealo.app"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_workflow_threads_cookies_through_every_step() {
    let server = MockServer::start().await;
    mount_location_chain(&server).await;

    // Search rotates the session cookie; zone must survive the merge.
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(header("cookie", "session=abc; zone=us-east; "))
        .and(body_partial_json(json!({"query": "pizza"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"stores": [{"storeUUID": "store-1"}]}))
                .append_header("set-cookie", "session=rotated; Path=/"),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/cart"))
        .and(header("cookie", "session=rotated; zone=us-east; "))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "draftOrderUUID": "draft-1",
                    "cartUUID": "cart-1",
                    "storeUUID": "store-1"
                }))
                .append_header("set-cookie", "cart_ctx=xyz; Path=/"),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/cart/items"))
        .and(header("cookie", "cart_ctx=xyz; session=rotated; zone=us-east; "))
        .and(body_partial_json(json!({"draftOrderUUID": "draft-1", "cartUUID": "cart-1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .append_header("set-cookie", "pricing_ctx=p1; Path=/"),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/cart/fee"))
        .and(header(
            "cookie",
            "cart_ctx=xyz; pricing_ctx=p1; session=rotated; zone=us-east; ",
        ))
        .and(body_partial_json(json!({"draftOrderUUID": "draft-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"total": 2899})))
        .mount(&server)
        .await;

    // Remove-item answers with a cookie that must NOT be folded back.
    Mock::given(method("POST"))
        .and(path("/api/cart/items/remove"))
        .and(header(
            "cookie",
            "cart_ctx=xyz; pricing_ctx=p1; session=rotated; zone=us-east; ",
        ))
        .and(body_partial_json(json!({"draftOrderUUID": "draft-1", "cartUUID": "cart-1"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"removed": true}))
                .append_header("set-cookie", "sneaky=1; Path=/"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    let located = Unlocated::new()
        .locate(&client, "123 Main St")
        .await
        .expect("locate");
    assert_eq!(located.jar().get("session"), Some("abc"));
    assert_eq!(located.jar().get("zone"), Some("us-east"));

    let searched = located.search(&client, "pizza").await.expect("search");
    assert_eq!(searched.jar().get("session"), Some("rotated"));
    assert_eq!(
        searched.jar().get("zone"),
        Some("us-east"),
        "merge must keep cookies the step did not rotate"
    );
    assert_eq!(searched.results()["stores"][0]["storeUUID"], "store-1");

    let mut cart = searched
        .create_cart(&client, &item("item-x", 1))
        .await
        .expect("create cart");
    assert_eq!(cart.order().draft_order_uuid, "draft-1");
    assert_eq!(cart.jar().get("cart_ctx"), Some("xyz"));

    let added_instance = cart
        .add_item(&client, &item("item-y", 2))
        .await
        .expect("add item");
    assert_ne!(added_instance, cart.first_item_instance_id());
    assert_eq!(cart.jar().get("pricing_ctx"), Some("p1"));

    let priced = cart.compute_fee(&client).await.expect("fee");
    assert_eq!(priced.fees()["total"], 2899);

    let mut cart = priced.into_cart();
    let removed = cart
        .remove_item(&client, &added_instance)
        .await
        .expect("remove item");
    assert_eq!(removed["removed"], true);
    assert_eq!(
        cart.jar().get("sneaky"),
        None,
        "remove-item response cookies are deliberately not merged"
    );
}

#[tokio::test]
async fn jar_requiring_step_fails_without_location_context() {
    let server = MockServer::start().await;

    // The platform answers searches that carry a session; anything else is
    // rejected outright.
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .and(header("cookie", "session=abc; "))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stores": []})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "forbidden"})))
        .with_priority(10)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search("pizza", &CookieJar::new()).await;

    match result {
        Err(PlatformError::Status { status, body, .. }) => {
            assert_eq!(status, 403);
            assert!(body.contains("forbidden"));
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn locate_with_no_candidates_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/location/autocomplete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = Unlocated::new().locate(&client, "nowhere at all").await;

    assert!(
        matches!(result, Err(PlatformError::NoCandidates { ref query }) if query == "nowhere at all"),
        "expected NoCandidates, got: {result:?}"
    );
}

#[tokio::test]
async fn suggest_transitions_to_searched_with_merged_jar() {
    let server = MockServer::start().await;
    mount_location_chain(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/search/autocomplete"))
        .and(header("cookie", "session=abc; zone=us-east; "))
        .and(body_partial_json(json!({"query": "piz"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"suggestions": ["pizza", "pizzeria"]}))
                .append_header("set-cookie", "suggest_seen=1; Path=/"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let located = Unlocated::new()
        .locate(&client, "123 Main St")
        .await
        .expect("locate");
    let searched = located.suggest(&client, "piz").await.expect("suggest");

    assert_eq!(searched.results()["suggestions"][0], "pizza");
    assert_eq!(searched.jar().get("suggest_seen"), Some("1"));
    assert_eq!(searched.jar().get("session"), Some("abc"));
}
