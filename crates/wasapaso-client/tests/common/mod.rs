//! Common test utilities for integration tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use wasapaso_client::{ClientBuilder, WasapasoClient};
use wiremock::MockServer;

/// A well-formed test API key.
pub const KEY: &str = "wsk_test_key_1234567890abcdef";

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Start a mock API server.
pub async fn start_server() -> MockServer {
    init_tracing();
    MockServer::start().await
}

/// Async client pointed at the mock server.
pub fn client(server: &MockServer) -> WasapasoClient {
    ClientBuilder::new()
        .api_key(KEY)
        .base_url(server.uri())
        .build()
        .expect("client should build")
}

/// Blocking client pointed at `uri`. Build it off the async runtime.
#[cfg(feature = "blocking")]
pub fn blocking_client(uri: &str) -> wasapaso_client::Result<wasapaso_client::blocking::WasapasoClient> {
    ClientBuilder::new().api_key(KEY).base_url(uri).build_blocking()
}

/// Wire representation of a session.
pub fn session_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": "Test Session",
        "sessionName": format!("session_user123_{}", id),
        "status": status,
        "messageCount": 0,
        "isPaid": false,
        "metadata": {},
        "customWebhook": null,
        "webhookEvents": [],
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    })
}

/// Single-session response envelope.
pub fn session_response(id: &str, status: &str) -> Value {
    json!({
        "success": true,
        "message": "OK",
        "data": session_json(id, status)
    })
}

/// Wire representation of a received message.
pub fn message_json(id: &str, from_me: bool) -> Value {
    json!({
        "id": id,
        "sessionId": "64abc123",
        "messageId": format!("wamid_{}", id),
        "from": "1234567890@c.us",
        "to": "0987654321@c.us",
        "body": "Test message",
        "type": "text",
        "timestamp": "2024-01-01T00:00:00.000Z",
        "fromMe": from_me
    })
}

/// Response to a send call, echoing the type tag.
pub fn sent_response(message_type: &str) -> Value {
    json!({
        "success": true,
        "message": "Message sent successfully",
        "data": {
            "sessionId": "64abc123",
            "to": "1234567890@c.us",
            "type": message_type,
            "messageId": "msg_xyz789",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "result": {}
        }
    })
}
