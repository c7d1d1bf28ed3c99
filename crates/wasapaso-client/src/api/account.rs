//! Health and API key status.

use std::time::Duration;

use serde_json::Value;

use crate::client::WasapasoClient;
use crate::error::Result;
use crate::transport::Call;
use crate::types::ApiKeyInfo;

/// Request builders shared by the async and blocking facades.
pub(crate) mod calls {
    use serde_json::Value;

    use crate::error::Result;
    use crate::transport::{ApiRequest, Call, decode_field, decode_raw};
    use crate::types::ApiKeyInfo;

    fn decode_api_key(body: Value) -> Result<ApiKeyInfo> {
        decode_field(body, "apiKey")
    }

    pub(crate) fn health() -> Call<Value> {
        Call::new(ApiRequest::get("health"), decode_raw)
    }

    pub(crate) fn status() -> Call<Value> {
        Call::new(ApiRequest::get("status"), decode_raw)
    }

    pub(crate) fn api_key_info() -> Call<ApiKeyInfo> {
        Call::new(ApiRequest::get("status"), decode_api_key)
    }
}

/// Health and status API client.
pub struct AccountApi {
    client: WasapasoClient,
    timeout: Option<Duration>,
}

impl AccountApi {
    pub(crate) fn new(client: WasapasoClient) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Use a different timeout for calls made through this handle.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn run<T>(&self, call: Call<T>) -> Result<T> {
        self.client.call(call.timeout_opt(self.timeout)).await
    }

    /// Check API health.
    pub async fn health(&self) -> Result<Value> {
        self.run(calls::health()).await
    }

    /// Simple connectivity check - returns true if the API answers.
    pub async fn is_healthy(&self) -> bool {
        self.health().await.is_ok()
    }

    /// Raw status of the API key in use.
    pub async fn status(&self) -> Result<Value> {
        self.run(calls::status()).await
    }

    /// Typed metadata, permissions and limits of the API key in use.
    pub async fn api_key_info(&self) -> Result<ApiKeyInfo> {
        self.run(calls::api_key_info()).await
    }
}
