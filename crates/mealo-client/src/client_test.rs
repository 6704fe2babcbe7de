use super::*;

fn test_client(base_url: &str) -> PlatformClient {
    PlatformClient::with_base_url(base_url, 30, "test-agent")
        .expect("client construction should not fail")
}

#[test]
fn endpoint_sets_absolute_path() {
    let client = test_client("https://www.mealo.app");
    let url = client.endpoint("/api/search");
    assert_eq!(url.as_str(), "https://www.mealo.app/api/search");
}

#[test]
fn with_base_url_strips_trailing_slash() {
    let client = test_client("https://www.mealo.app/");
    let url = client.endpoint("/api/cart");
    assert_eq!(url.as_str(), "https://www.mealo.app/api/cart");
}

#[test]
fn with_base_url_rejects_garbage() {
    let result = PlatformClient::with_base_url("not-a-url", 30, "test-agent");
    assert!(
        matches!(result, Err(PlatformError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn item_payload_carries_wire_names_and_instance_id() {
    let item = NewCartItem {
        catalog_item_id: "item-9".to_owned(),
        store_id: "store-1".to_owned(),
        section_id: "sec-1".to_owned(),
        subsection_id: "sub-1".to_owned(),
        unit_price_cents: 1250,
        title: "Margherita".to_owned(),
        quantity: 2,
        customizations: json!({"size": "large"}),
        image: None,
    };
    let payload = PlatformClient::item_payload(&item, "instance-abc");
    assert_eq!(payload["itemId"], "item-9");
    assert_eq!(payload["price"], 1250);
    assert_eq!(payload["quantity"], 2);
    assert_eq!(payload["itemInstanceId"], "instance-abc");
    assert_eq!(payload["customizationList"]["size"], "large");
}

#[test]
fn post_renders_jar_into_cookie_header() {
    let client = test_client("https://www.mealo.app");
    let mut jar = CookieJar::new();
    jar.insert("session", "abc");
    jar.insert("zone", "us");
    let request = client
        .post("/api/search", &json!({"query": "pizza"}), Some(&jar))
        .build()
        .expect("request builds");
    let cookie = request
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("cookie header present");
    assert_eq!(cookie, "session=abc; zone=us; ");
}

#[test]
fn post_omits_cookie_header_for_empty_jar() {
    let client = test_client("https://www.mealo.app");
    let jar = CookieJar::new();
    let request = client
        .post("/api/search", &json!({"query": "pizza"}), Some(&jar))
        .build()
        .expect("request builds");
    assert!(request.headers().get(COOKIE).is_none());
}

#[test]
fn post_attaches_browser_header_table() {
    let client = test_client("https://www.mealo.app");
    let request = client
        .post("/api/search", &json!({"query": "pizza"}), None)
        .build()
        .expect("request builds");
    assert_eq!(
        request
            .headers()
            .get("x-requested-with")
            .and_then(|v| v.to_str().ok()),
        Some("XMLHttpRequest")
    );
    assert_eq!(
        request
            .headers()
            .get(reqwest::header::ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("https://www.mealo.app")
    );
}
