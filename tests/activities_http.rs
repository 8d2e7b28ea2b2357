//! HTTP-level tests: drive the router the way a chat transport would.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use memegen_bot::{config::Config, routes::create_router, startup::init_state};
use serde_json::{Value, json};
use std::collections::HashMap;
use tower::ServiceExt;

const CATALOG_BODY: &str = r#"[
    {"id": "drake", "name": "Drakeposting", "lines": 2, "styles": ["default"]},
    {"id": "gru", "name": "Gru's Plan", "lines": 4, "styles": []},
    {"id": "oprah", "name": "Oprah Winfrey", "lines": 2, "styles": []},
    {"id": "party", "name": "Party Parrot", "lines": 2, "styles": ["animated"]}
]"#;

async fn build_test_app(server: &mut mockito::ServerGuard) -> axum::Router {
    // The catalog is fetched once, inside init_state.
    let _m = server
        .mock("GET", "/templates")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CATALOG_BODY)
        .create_async()
        .await;

    let vars = HashMap::from([
        ("MEMEGEN_CATALOG_URL".to_string(), format!("{}/templates", server.url())),
        ("MEMEGEN_RENDERER_URL".to_string(), "https://api.memegen.link".to_string()),
        ("APP_VERSION".to_string(), "test".to_string()),
        ("CATALOG_MAX_RETRY_SECS".to_string(), "1".to_string()),
    ]);
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let state = init_state(&config).await.unwrap();
    create_router(state)
}

async fn post_activity(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/activities")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn meme_command_returns_form_with_catalog_choices() {
    let mut server = mockito::Server::new_async().await;
    let app = build_test_app(&mut server).await;

    let (status, body) = post_activity(app, json!({ "room_id": "room-1", "text": "/meme" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["type"], "card");
    assert_eq!(body[0]["room_id"], "room-1");
    let choices = body[0]["form"]["choice_set"]["choices"].as_array().unwrap();
    let values: Vec<&str> = choices.iter().map(|c| c["value"].as_str().unwrap()).collect();
    assert_eq!(values, vec!["drake.jpg", "oprah.jpg", "party.gif"]);
    assert_eq!(choices[1]["title"], "Oprah You Get A...");
}

#[tokio::test]
async fn submission_returns_meme_url() {
    let mut server = mockito::Server::new_async().await;
    let app = build_test_app(&mut server).await;

    let (status, body) = post_activity(
        app,
        json!({
            "room_id": "room-1",
            "inputs": {
                "callback_keyword": "make_meme_callback_rbamzfyx",
                "meme_type": "party.gif",
                "text_top": "is this a meme?",
                "text_bottom": ""
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["type"], "message");
    assert_eq!(
        body[0]["text"],
        "Generating your meme. GIF-based memes take a little longer. Please wait..."
    );
    assert_eq!(body[1]["type"], "files");
    assert_eq!(
        body[1]["files"][0],
        "https://api.memegen.link/images/party/is_this_a_meme~q/.gif"
    );
    assert_eq!(body[1]["content_type"], "image/gif");
}

#[tokio::test]
async fn empty_submission_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let app = build_test_app(&mut server).await;

    let (status, body) = post_activity(
        app,
        json!({
            "room_id": "room-1",
            "inputs": {
                "callback_keyword": "make_meme_callback_rbamzfyx",
                "meme_type": "drake.jpg",
                "text_top": "",
                "text_bottom": ""
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["text"], "Please provide at least one positional text argument.");
}

#[tokio::test]
async fn cancel_returns_no_responses() {
    let mut server = mockito::Server::new_async().await;
    let app = build_test_app(&mut server).await;

    let (status, body) = post_activity(
        app,
        json!({ "room_id": "room-1", "inputs": { "command_keyword": "exit" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn activity_without_trigger_is_bad_request() {
    let mut server = mockito::Server::new_async().await;
    let app = build_test_app(&mut server).await;

    let (status, body) = post_activity(app, json!({ "room_id": "room-1" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid activity"));
}

#[tokio::test]
async fn health_reports_version() {
    let mut server = mockito::Server::new_async().await;
    let app = build_test_app(&mut server).await;

    let resp = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "ok", "version": "test" }));
}

#[tokio::test]
async fn catalog_outage_aborts_startup() {
    let mut server = mockito::Server::new_async().await;
    let _m = server.mock("GET", "/templates").with_status(404).create_async().await;

    let vars = HashMap::from([("MEMEGEN_CATALOG_URL".to_string(), format!("{}/templates", server.url()))]);
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();

    assert!(init_state(&config).await.is_err());
}
