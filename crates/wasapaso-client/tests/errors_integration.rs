//! Error classification tests: status mapping, transport failures and
//! configuration errors.

mod common;

use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use wasapaso_client::{ClientBuilder, Error, ErrorKind, WasapasoClient};
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn fail_with(status: u16, body: serde_json::Value) -> Error {
    let server = common::start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sessions/s1"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    common::client(&server)
        .sessions()
        .get("s1")
        .await
        .expect_err("call should fail")
}

#[tokio::test]
async fn test_status_codes_map_to_kinds() {
    let cases = [
        (401, ErrorKind::Authentication),
        (403, ErrorKind::Permission),
        (404, ErrorKind::NotFound),
        (400, ErrorKind::Validation),
        (422, ErrorKind::Validation),
        (429, ErrorKind::RateLimit),
        (500, ErrorKind::Server),
        (502, ErrorKind::Server),
        (503, ErrorKind::Server),
        (409, ErrorKind::Api),
        (418, ErrorKind::Api),
    ];

    for (status, kind) in cases {
        let err = fail_with(status, json!({"success": false})).await;
        assert_eq!(err.kind(), Some(kind), "status {}", status);
        assert_eq!(err.status(), Some(status));
        assert_eq!(err.body(), Some(&json!({"success": false})));
    }
}

#[tokio::test]
async fn test_server_message_wins_over_default() {
    let err = fail_with(401, json!({"message": "Invalid API key"})).await;
    assert!(err.is_auth_error());
    assert_eq!(err.to_string(), "[401] Invalid API key");

    let err = fail_with(401, json!({})).await;
    assert_eq!(
        err.to_string(),
        "[401] Authentication failed. Check your credential."
    );
}

#[tokio::test]
async fn test_validation_error_keeps_details() {
    let body = json!({
        "success": false,
        "message": "Validation failed",
        "errors": [{"field": "to", "message": "Invalid phone number"}]
    });
    let err = fail_with(400, body.clone()).await;
    assert_eq!(err.kind(), Some(ErrorKind::Validation));
    assert_eq!(err.body(), Some(&body));
    assert_eq!(err.body().unwrap()["errors"][0]["field"], "to");
}

#[tokio::test]
async fn test_invalid_json_error_body() {
    let server = common::start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sessions/s1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = common::client(&server).sessions().get("s1").await.unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(
        err.body(),
        Some(&json!({"error": "Invalid JSON response", "raw": "<html>Bad Gateway</html>"}))
    );
    assert_eq!(err.to_string(), "[502] Server error. Please try again later.");
}

#[tokio::test]
async fn test_invalid_json_success_body_is_returned_raw() -> Result<()> {
    let server = common::start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let health = common::client(&server).account().health().await?;
    assert_eq!(health, json!({"error": "Invalid JSON response", "raw": "OK"}));
    Ok(())
}

#[tokio::test]
async fn test_empty_success_body_is_empty_object() -> Result<()> {
    let server = common::start_server().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/sessions/s1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let result = common::client(&server).sessions().delete("s1").await?;
    assert_eq!(result, json!({}));
    Ok(())
}

#[tokio::test]
async fn test_mismatched_success_body_is_decode_error() {
    let server = common::start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sessions/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 7}})))
        .mount(&server)
        .await;

    let err = common::client(&server).sessions().get("s1").await.unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert_eq!(err.kind(), None);
}

#[tokio::test]
async fn test_connection_refused() {
    common::init_tracing();
    // Grab a free port, then release it so nothing listens there.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = ClientBuilder::new()
        .api_key(common::KEY)
        .base_url(&uri)
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let err = client.sessions().get("s1").await.unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Connection));
    assert_eq!(err.status(), None);
    assert!(err.to_string().starts_with("Failed to connect to"));
}

#[tokio::test]
async fn test_client_timeout() {
    let server = common::start_server().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = ClientBuilder::new()
        .api_key(common::KEY)
        .base_url(server.uri())
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = client.account().health().await.unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Timeout));
    assert_eq!(err.to_string(), "Request timed out after 0.1s");
}

#[tokio::test]
async fn test_bad_key_fails_before_any_request() {
    let server = common::start_server().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = ClientBuilder::new()
        .api_key("abc_1234567890abcdef")
        .base_url(server.uri())
        .build()
        .unwrap_err();
    assert!(err.is_config_error());
    assert_eq!(
        err.to_string(),
        "Configuration error: Invalid API key format. API keys should start with 'wsk_'"
    );

    let err = WasapasoClient::new("").unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("API key is required"));
}

#[tokio::test]
async fn test_is_healthy_reports_failures() {
    let server = common::start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(!common::client(&server).account().is_healthy().await);
}

#[tokio::test]
async fn test_empty_error_body_keeps_raw_marker() {
    let server = common::start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sessions/s1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = common::client(&server).sessions().get("s1").await.unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err.body(),
        Some(&json!({"error": "Invalid JSON response", "raw": ""}))
    );
    assert_eq!(err.to_string(), "[500] Server error. Please try again later.");
}

#[tokio::test]
async fn test_zero_call_timeout_uses_client_default() -> Result<()> {
    let server = common::start_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/sessions/s1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::session_response("s1", "WORKING"))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = common::client(&server)
        .sessions()
        .with_timeout(Duration::ZERO)
        .get("s1")
        .await?;
    assert_eq!(session.id, "s1");
    Ok(())
}
