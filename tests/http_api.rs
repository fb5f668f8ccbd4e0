//! End-to-end tests: the real router and service against a mock Ollama endpoint.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use docbrief::{api, config, service::SummarizeService};
use httpmock::{Method::POST, MockServer};
use serde_json::json;
use tokio::sync::OnceCell;
use tower::ServiceExt;

static INIT: OnceCell<()> = OnceCell::const_new();
static MOCK_SERVER: OnceCell<&'static MockServer> = OnceCell::const_new();

const BOUNDARY: &str = "docbrief-e2e-boundary";

fn set_env(key: &str, value: &str) {
    // SAFETY: Tests run in a single process and establish deterministic configuration upfront.
    unsafe { std::env::set_var(key, value) }
}

async fn test_app() -> Router {
    INIT.get_or_init(|| async {
        let mock_server = Box::leak(Box::new(MockServer::start_async().await));

        set_env("SUMMARY_MODEL", "llama3.2");
        set_env("OLLAMA_URL", &mock_server.base_url());
        set_env("SUMMARY_MIN_WORDS", "30");
        set_env("SUMMARY_MAX_WORDS", "1000");
        config::init_config();

        MOCK_SERVER.set(mock_server).ok();
    })
    .await;

    api::create_router(Arc::new(SummarizeService::new()))
}

fn upload_request(file_name: &str, content_type: &str, body: &[u8]) -> Request<Body> {
    let mut payload = Vec::new();
    payload.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    payload.extend_from_slice(body);
    payload.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/summarize")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(payload))
        .expect("request")
}

#[tokio::test]
async fn text_upload_round_trips_to_a_summary() {
    let app = test_app().await;
    let server = MOCK_SERVER.get().expect("mock server initialized");

    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/generate")
                .body_contains("llama3.2")
                .body_contains("Quarterly report body for the happy path");
            then.status(200).json_body(json!({
                "response": "The report summarized.",
                "done": true
            }));
        })
        .await;

    let response = app
        .oneshot(upload_request(
            "report.txt",
            "text/plain",
            b"Quarterly report body for the happy path",
        ))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(payload["summary"], "The report summarized.");
    assert_eq!(payload["file_name"], "report.txt");
    assert_eq!(payload["declared_type"], "text/plain");

    mock.assert_async().await;
}

#[tokio::test]
async fn unsupported_upload_never_reaches_the_provider() {
    let app = test_app().await;

    let response = app
        .oneshot(upload_request(
            "slides.ppt",
            "application/vnd.ms-powerpoint",
            b"not a supported format",
        ))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(
        payload["error"],
        "File type not supported. Please upload a txt, pdf or docx file."
    );
}

#[tokio::test]
async fn provider_error_collapses_into_the_fixed_retry_message() {
    let app = test_app().await;
    let server = MOCK_SERVER.get().expect("mock server initialized");

    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/generate")
                .body_contains("Document destined to fail");
            then.status(500).body("model fell over");
        })
        .await;

    let response = app
        .oneshot(upload_request(
            "doomed.txt",
            "text/plain",
            b"Document destined to fail",
        ))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let payload: serde_json::Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(payload["error"], "Failed to generate summary. Please try again!");
    let message = payload["error"].as_str().expect("message string");
    assert!(!message.contains("model fell over"));
}
