//! End-to-end API tests over in-memory backends.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use serde_json::{Value, json};

use stockroom_blob_memory::MemoryBlobStore;
use stockroom_pipeline::Registry;
use stockroom_search_memory::MemorySearchIndex;
use stockroom_server::api::{AppState, router};
use stockroom_server::auth::JwtManager;
use stockroom_store_memory::MemoryRegistryStore;

const PNG_PAYLOAD: &str = "iVBORw0KGgo=";
const PLACEHOLDER: &str = "https://via.placeholder.com/600";

fn test_server() -> TestServer {
    let registry = Registry::builder(
        Arc::new(MemoryRegistryStore::new()),
        Arc::new(MemoryBlobStore::new()),
        Arc::new(MemorySearchIndex::new()),
    )
    .assets_bucket("assets")
    .users_bucket("users")
    .build();

    let state = AppState {
        registry: Arc::new(registry),
        jwt: Arc::new(JwtManager::new("test-secret", 3600)),
    };

    TestServer::new(router(state)).expect("failed to start test server")
}

async fn register(server: &TestServer, email: &str, password: &str) -> (i64, String) {
    let response = server
        .post("/register")
        .json(&json!({
            "new_user": {
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": email,
                "password": password,
            }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let user_id = body["user"]["user_id"].as_i64().expect("user_id");
    let token = body["token"].as_str().expect("token").to_owned();
    (user_id, token)
}

fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&format!("Bearer {token}")).expect("header value"),
    )
}

#[tokio::test]
async fn register_issues_token_and_hides_password() {
    let server = test_server();

    let response = server
        .post("/register")
        .json(&json!({
            "new_user": {
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "password": "hunter2",
            }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["user_image_url"], PLACEHOLDER);
    // The hash must never appear in any serialized user.
    assert!(body["user"].get("password_hash").is_none());
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn signin_distinguishes_unknown_email_from_wrong_password() {
    let server = test_server();
    register(&server, "ada@example.com", "hunter2").await;

    let response = server
        .post("/signin")
        .json(&json!({
            "signin_packet": { "email": "nobody@example.com", "password": "hunter2" }
        }))
        .await;
    response.assert_status_unauthorized();
    let body: Value = response.json();
    assert_eq!(body["auth"], false);
    assert_eq!(body["msg"], "No user found for that email");

    let response = server
        .post("/signin")
        .json(&json!({
            "signin_packet": { "email": "ada@example.com", "password": "wrong" }
        }))
        .await;
    response.assert_status_unauthorized();
    let body: Value = response.json();
    assert_eq!(body["auth"], false);
    assert_eq!(body["msg"], "Incorrect password");

    let response = server
        .post("/signin")
        .json(&json!({
            "signin_packet": { "email": "ada@example.com", "password": "hunter2" }
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["auth"], true);
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let server = test_server();

    let response = server
        .post("/assets")
        .json(&json!({ "new_asset": { "asset_name": "Watch" } }))
        .await;
    response.assert_status_unauthorized();

    let (name, value) = bearer("garbage-token");
    let response = server
        .post("/assets")
        .add_header(name, value)
        .json(&json!({ "new_asset": { "asset_name": "Watch" } }))
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn create_asset_without_image_gets_placeholder() {
    let server = test_server();
    let (user_id, token) = register(&server, "ada@example.com", "hunter2").await;

    let (name, value) = bearer(&token);
    let response = server
        .post("/assets")
        .add_header(name, value)
        .json(&json!({
            "new_asset": {
                "asset_name": "Watch",
                "asset_type": "wearable",
                "asset_serial_number": "SN-100",
                "asset_image": "",
            }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let asset = &body["new_asset"];
    assert!(asset["asset_id"].as_i64().is_some());
    assert_eq!(asset["user_id"].as_i64(), Some(user_id));
    assert_eq!(asset["asset_name"], "Watch");
    assert_eq!(asset["user_asset_state"], 0);
    assert_eq!(asset["asset_image_url"], PLACEHOLDER);
}

#[tokio::test]
async fn create_asset_with_image_stores_keyed_url() {
    let server = test_server();
    let (_, token) = register(&server, "ada@example.com", "hunter2").await;

    let (name, value) = bearer(&token);
    let response = server
        .post("/assets")
        .add_header(name, value)
        .json(&json!({
            "new_asset": {
                "asset_name": "Camera",
                "asset_serial_number": "SN-200",
                "asset_image": PNG_PAYLOAD,
            }
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let asset = &body["new_asset"];
    let asset_id = asset["asset_id"].as_i64().expect("asset_id");
    let url = asset["asset_image_url"].as_str().expect("url");
    assert_ne!(url, PLACEHOLDER);
    assert!(url.contains(&format!("asset_id_{asset_id}")));
}

#[tokio::test]
async fn create_asset_with_bad_image_is_rejected() {
    let server = test_server();
    let (_, token) = register(&server, "ada@example.com", "hunter2").await;

    let (name, value) = bearer(&token);
    let response = server
        .post("/assets")
        .add_header(name, value)
        .json(&json!({
            "new_asset": {
                "asset_name": "Camera",
                "asset_image": "qqqq",
            }
        }))
        .await;
    response.assert_status_bad_request();

    // Nothing was created.
    let (name, value) = bearer(&token);
    let response = server.get("/assets").add_header(name, value).await;
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn list_and_fetch_assets() {
    let server = test_server();
    let (user_id, token) = register(&server, "ada@example.com", "hunter2").await;

    for serial in ["SN-100", "SN-101"] {
        let (name, value) = bearer(&token);
        server
            .post("/assets")
            .add_header(name, value)
            .json(&json!({
                "new_asset": { "asset_name": "Watch", "asset_serial_number": serial }
            }))
            .await
            .assert_status_ok();
    }

    let (name, value) = bearer(&token);
    let response = server
        .get("/assets")
        .add_header(name, value)
        .add_query_param("user_id", user_id)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 2);

    let first_id = data[0]["asset_id"].as_i64().expect("asset_id");
    let (name, value) = bearer(&token);
    let response = server
        .get(&format!("/assets/{first_id}"))
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["asset_id"].as_i64(), Some(first_id));

    // Unknown id yields an empty data array, not an error.
    let (name, value) = bearer(&token);
    let response = server.get("/assets/99999").add_header(name, value).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn update_asset_changes_columns() {
    let server = test_server();
    let (_, token) = register(&server, "ada@example.com", "hunter2").await;

    let (name, value) = bearer(&token);
    let response = server
        .post("/assets")
        .add_header(name, value)
        .json(&json!({
            "new_asset": { "asset_name": "Watch", "asset_serial_number": "SN-100" }
        }))
        .await;
    let body: Value = response.json();
    let asset_id = body["new_asset"]["asset_id"].as_i64().expect("asset_id");

    let (name, value) = bearer(&token);
    let response = server
        .put("/assets")
        .add_header(name, value)
        .json(&json!({
            "asset": {
                "asset_id": asset_id,
                "user_asset_state": 1,
                "asset_name": "Watch mk2",
                "asset_serial_number": "SN-200",
                "asset_image_url": PLACEHOLDER,
            },
            "is_image_change": false,
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["data"][0]["asset_name"], "Watch mk2");
    assert_eq!(body["data"][0]["user_asset_state"], 1);
    assert_eq!(body["data"][0]["asset_serial_number"], "SN-200");
}

#[tokio::test]
async fn search_returns_prefix_matches_only() {
    let server = test_server();
    let (_, token) = register(&server, "ada@example.com", "hunter2").await;

    for serial in ["SN-100", "SN-101", "XX-900"] {
        let (name, value) = bearer(&token);
        server
            .post("/assets")
            .add_header(name, value)
            .json(&json!({
                "new_asset": { "asset_name": "Watch", "asset_serial_number": serial }
            }))
            .await
            .assert_status_ok();
    }

    let response = server.get("/search").add_query_param("q", "SN-10").await;
    response.assert_status_ok();
    let hits: Vec<Value> = response.json();
    assert_eq!(hits.len(), 2);
    assert!(
        hits.iter()
            .all(|d| d["asset_serial_number"].as_str().unwrap().starts_with("SN-10"))
    );

    // Paging: size=1 returns a single hit.
    let response = server
        .get("/search")
        .add_query_param("q", "SN-10")
        .add_query_param("size", 1)
        .await;
    let hits: Vec<Value> = response.json();
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn verify_jwt_returns_bare_boolean() {
    let server = test_server();
    let (_, token) = register(&server, "ada@example.com", "hunter2").await;

    // Both the raw token and the Bearer form verify.
    let (name, value) = (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&token).expect("header value"),
    );
    let response = server.get("/verifyJWT").add_header(name, value).await;
    response.assert_status_ok();
    assert!(response.json::<bool>());

    let (name, value) = bearer(&token);
    let response = server.get("/verifyJWT").add_header(name, value).await;
    response.assert_status_ok();
    assert!(response.json::<bool>());

    let (name, value) = bearer("not.a.jwt");
    let response = server.get("/verifyJWT").add_header(name, value).await;
    response.assert_status_ok();
    assert!(!response.json::<bool>());

    // No header at all is simply "not valid".
    let response = server.get("/verifyJWT").await;
    response.assert_status_ok();
    assert!(!response.json::<bool>());
}
