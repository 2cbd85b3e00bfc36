//! Integration tests for [`StatsClient`] — envelope handling, auth header,
//! error-message extraction, and the typed endpoint helpers.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use huginn::{HuginnError, Params, StatsClient, StatsConfig, params1};

fn client_for(server: &MockServer) -> StatsClient {
    StatsClient::new(StatsConfig::new().base_url(server.uri())).expect("client should build")
}

// =========================================================================
// Envelope handling
// =========================================================================

#[tokio::test]
async fn get_unwraps_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/shop"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "status": 200,
                "data": { "date": "2026-08-29", "entries": [] }
            })),
        )
        .mount(&server)
        .await;

    let body = client_for(&server)
        .get("/v2/shop", &Params::new())
        .await
        .expect("fetch should succeed");
    assert_eq!(body["date"], "2026-08-29");
    assert!(body.get("status").is_none());
}

#[tokio::test]
async fn get_falls_back_to_raw_body_without_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/other"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "plain": true })))
        .mount(&server)
        .await;

    let body = client_for(&server)
        .get("/v1/other", &Params::new())
        .await
        .expect("fetch should succeed");
    assert_eq!(body, json!({ "plain": true }));
}

#[tokio::test]
async fn get_raw_keeps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/stats/br/v2"))
        .and(query_param("name", "Ninja"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": 200, "data": { "account": {} } })),
        )
        .mount(&server)
        .await;

    let body = client_for(&server)
        .get_raw("/v2/stats/br/v2", &params1("name", "Ninja"))
        .await
        .expect("fetch should succeed");
    assert_eq!(body["status"], 200);
    assert!(body.get("data").is_some());
}

// =========================================================================
// Authorization header
// =========================================================================

#[tokio::test]
async fn api_key_sent_as_bare_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/news"))
        .and(header("Authorization", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let client = StatsClient::new(
        StatsConfig::new()
            .base_url(server.uri())
            .api_key("secret-key"),
    )
    .expect("client should build");

    client
        .get("/v2/news", &Params::new())
        .await
        .expect("authorized fetch should succeed");
}

// =========================================================================
// Error-message extraction
// =========================================================================

#[tokio::test]
async fn error_field_surfaces_as_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/stats/br/v2"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Account not found" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get("/v2/stats/br/v2", &params1("name", "nobody"))
        .await
        .expect_err("fetch should fail");
    match err {
        HuginnError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Account not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn message_field_is_extraction_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/shop"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid key" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get("/v2/shop", &Params::new())
        .await
        .expect_err("fetch should fail");
    assert_eq!(err.user_message(), "Invalid key");
}

#[tokio::test]
async fn bodyless_failure_reports_status_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/shop"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get("/v2/shop", &Params::new())
        .await
        .expect_err("fetch should fail");
    assert_eq!(err.user_message(), "Request failed with status code 500");
}

#[tokio::test]
async fn connection_failure_is_http_error() {
    // Nothing listens here; connect fails fast.
    let client = StatsClient::new(
        StatsConfig::new()
            .base_url("http://127.0.0.1:1")
            .timeout(Duration::from_secs(2)),
    )
    .expect("client should build");

    let err = client
        .get("/v2/shop", &Params::new())
        .await
        .expect_err("fetch should fail");
    assert!(matches!(err, HuginnError::Http(_)));
    assert!(!err.user_message().is_empty());
}

// =========================================================================
// Typed endpoints
// =========================================================================

#[tokio::test]
async fn player_stats_decodes_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/stats/br/v2"))
        .and(query_param("name", "Ninja"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "data": {
                "account": { "name": "Ninja", "id": "abc" },
                "battlePass": { "level": 87, "progress": 40 },
                "stats": { "all": { "overall": {
                    "score": 1000, "wins": 10, "winRate": 5.0,
                    "kills": 100, "kd": 2.0, "matches": 200, "deaths": 50
                }}}
            }
        })))
        .mount(&server)
        .await;

    let stats = client_for(&server)
        .player_stats("Ninja")
        .await
        .expect("stats should decode");
    assert_eq!(stats.account.name, "Ninja");
    assert_eq!(stats.stats.all.overall.wins, 10);
}

#[tokio::test]
async fn shop_decodes_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/shop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "date": "2026-08-29",
                "vbuckIcon": "https://img/vbuck.png",
                "entries": [{
                    "offerId": "v2:/abc",
                    "devName": "[VIRTUAL]1 x Skin",
                    "regularPrice": 1500,
                    "finalPrice": 1200,
                    "layout": { "name": "Featured", "index": 0 },
                    "brItems": [{
                        "name": "Skin",
                        "rarity": { "value": "epic" },
                        "type": { "value": "outfit", "displayValue": "Outfit" },
                        "images": { "icon": "https://img/icon.png" }
                    }]
                }]
            }
        })))
        .mount(&server)
        .await;

    let shop = client_for(&server).shop().await.expect("shop should decode");
    assert_eq!(shop.entries.len(), 1);
    let entry = &shop.entries[0];
    assert_eq!(entry.final_price, 1200);
    assert_eq!(entry.layout.as_ref().unwrap().name.as_deref(), Some("Featured"));
    let item = &entry.br_items.as_ref().unwrap()[0];
    assert_eq!(item.rarity.as_ref().unwrap().value, "epic");
    assert_eq!(item.images.icon.as_deref(), Some("https://img/icon.png"));
}

#[tokio::test]
async fn news_and_map_decode_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/news"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "br": {
                    "date": "2026-08-29T00:00:00Z",
                    "motds": [{ "id": "m1", "title": "Patch", "sortingPriority": 10 }]
                },
                "stw": { "date": "2026-08-29T00:00:00Z", "messages": [{ "title": "Event" }] }
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/map"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "images": { "blank": null, "pois": "https://img/map.png" },
                "pois": [{
                    "id": "poi1", "name": "Tilted Towers",
                    "location": { "x": 1000.0, "y": -2000.0, "z": 0.0 }
                }]
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let news = client.news().await.expect("news should decode");
    assert_eq!(news.br.unwrap().motds[0].sorting_priority, 10);
    assert_eq!(news.stw.unwrap().messages[0].title, "Event");

    let map = client.map().await.expect("map should decode");
    assert_eq!(map.images.pois, "https://img/map.png");
    assert_eq!(map.pois[0].name, "Tilted Towers");
}
