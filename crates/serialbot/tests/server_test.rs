//! Router tests: slash-command posts against a wiremock cloud endpoint.
#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::post;
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use serialbot::AppState;
use serialbot::routes::HEALTH_TEXT;
use serialbot_api::TransportConfig;
use serialbot_core::{CloudCredentials, Pipeline, PipelineConfig};

const CHANNEL: &str = "C0ALLOWED";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Router) {
    let server = MockServer::start().await;
    let config = PipelineConfig {
        endpoint: Url::parse(&format!("{}/v1/request", server.uri())).unwrap(),
        credentials: CloudCredentials {
            user_id: "ops".into(),
            password: SecretString::from("pw".to_string()),
            oem_id: "1".into(),
        },
        allowed_channels: HashSet::from([CHANNEL.to_string()]),
        dashboard_url: Url::parse("https://metabase.example.com/d/7").unwrap(),
        transport: TransportConfig::default(),
    };
    let pipeline = Pipeline::from_config(config).unwrap();
    (server, serialbot::server::router(AppState::new(pipeline)))
}

async fn mount_device(server: &MockServer, status: &str) {
    let envelope = |data: Value| {
        ResponseTemplate::new(200).set_body_json(json!({ "status": 1, "complete": 1, "data": data }))
    };
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "call": "login_with_id_and_password" })))
        .respond_with(envelope(json!({ "token": "tok" })))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "call": "legacy_id_mapping" })))
        .respond_with(envelope(
            json!({ "map": { "controller": { "ids_to_uuids": { "92000000": "u-1" } } } }),
        ))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "call": "controller_raw_command" })))
        .respond_with(envelope(json!({
            "controller_response": { "result": { "features": { "mqttwebrtc.v2": { "status": status } } } }
        })))
        .mount(server)
        .await;
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn json_post(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ── Health ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let (_server, app) = setup().await;

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), HEALTH_TEXT.as_bytes());
}

// ── Dashboard link ──────────────────────────────────────────────────

#[tokio::test]
async fn test_link_form_post_is_in_channel() {
    let (_server, app) = setup().await;

    let (status, body) = send(
        app,
        form("/", "channel_id=C0ALLOWED&text=%2A%2A92000000%2A%2A&command=%2Fdevice"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "response_type": "in_channel",
            "text": "🔗 <https://metabase.example.com/d/7?serial_number=92000000|View dashboard for 92000000>",
        })
    );
}

#[tokio::test]
async fn test_link_forbidden_channel_is_ephemeral() {
    let (_server, app) = setup().await;

    let (status, body) = send(app, form("/", "channel_id=C0OTHER&text=92000000")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "response_type": "ephemeral",
            "text": "❌ This command is not allowed in this channel.",
        })
    );
}

// ── Device status ───────────────────────────────────────────────────

#[tokio::test]
async fn test_snapshot_in_thread_is_posted_to_thread() {
    let (server, app) = setup().await;
    mount_device(&server, "on").await;

    let (status, body) = send(
        app,
        json_post(
            "/snapshot",
            &json!({ "channel_id": CHANNEL, "text": "92000000", "thread_ts": "1700000000.000100" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response_type"], "in_channel");
    assert_eq!(body["thread_ts"], "1700000000.000100");
    assert_eq!(
        body["text"],
        "Controller with serial number 92000000 is running correct FW and packages to work with doorbell. Reason: WebRTC v2 is installed and on"
    );
}

#[tokio::test]
async fn test_snapshot_without_thread_is_ephemeral() {
    let (server, app) = setup().await;
    mount_device(&server, "off").await;

    let (status, body) = send(
        app,
        form("/snapshot", "channel_id=C0ALLOWED&text=92000000&thread_ts="),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response_type"], "ephemeral");
    assert!(body.get("thread_ts").is_none());
    assert!(body["text"].as_str().unwrap().ends_with("WebRTC v2 is off"));
}

#[tokio::test]
async fn test_snapshot_failure_is_ephemeral_in_thread() {
    let (server, app) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(
        app,
        json_post(
            "/snapshot",
            &json!({ "channel_id": CHANNEL, "text": "92000000", "thread_ts": "1.2" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "response_type": "ephemeral",
            "text": "❌ Authentication failed: Login failed: Authentication rejected by server",
            "thread_ts": "1.2",
        })
    );
}

// ── Bad input ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_undecodable_body_is_bad_request() {
    let (server, app) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = send(app, json_post("/snapshot", &json!(["not", "an", "object"]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "response_type": "ephemeral",
            "text": "❌ An error occurred while processing your request.",
        })
    );
}

#[tokio::test]
async fn test_handler_panic_is_generic_server_error() {
    #[allow(clippy::unused_async)]
    async fn explode() -> &'static str {
        panic!("boom");
    }

    let app = serialbot::server::with_middleware(Router::new().route("/snapshot", post(explode)));

    let (status, body) = send(app, form("/snapshot", "channel_id=C0ALLOWED&text=92000000")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "response_type": "ephemeral",
            "text": "❌ An error occurred while processing your request.",
        })
    );
}
