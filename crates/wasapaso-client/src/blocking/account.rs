//! Blocking health and API key status.

use std::time::Duration;

use serde_json::Value;

use super::WasapasoClient;
use crate::api::account::calls;
use crate::error::Result;
use crate::transport::Call;
use crate::types::ApiKeyInfo;

/// Blocking health and status API client.
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

    fn run<T>(&self, call: Call<T>) -> Result<T> {
        self.client.call(call.timeout_opt(self.timeout))
    }

    /// Check API health.
    pub fn health(&self) -> Result<Value> {
        self.run(calls::health())
    }

    /// Simple connectivity check - returns true if the API answers.
    pub fn is_healthy(&self) -> bool {
        self.health().is_ok()
    }

    /// Raw status of the API key in use.
    pub fn status(&self) -> Result<Value> {
        self.run(calls::status())
    }

    /// Typed metadata, permissions and limits of the API key in use.
    pub fn api_key_info(&self) -> Result<ApiKeyInfo> {
        self.run(calls::api_key_info())
    }
}
