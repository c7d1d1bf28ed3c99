//! Blocking client.
//!
//! Mirrors the async API one-to-one; every request is built by the same code
//! and only the I/O differs. Do not call these methods from inside an async
//! runtime.
//!
//! ```no_run
//! use wasapaso_client::blocking::WasapasoClient;
//! use wasapaso_client::CreateSession;
//!
//! # fn example() -> wasapaso_client::Result<()> {
//! let client = WasapasoClient::new("wsk_your_api_key_here")?;
//! let session = client.sessions().create(CreateSession::new("Support"))?;
//! client.sessions().start(&session.id)?;
//! # Ok(())
//! # }
//! ```

mod account;
mod messages;
mod sessions;

pub use account::AccountApi;
pub use messages::MessagesApi;
pub use sessions::SessionsApi;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::client::{ClientBuilder, ClientConfig};
use crate::error::Result;
use crate::transport::{self, ApiRequest, Call};

/// Blocking Wasapaso API client.
#[derive(Clone)]
pub struct WasapasoClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::blocking::Client,
    config: ClientConfig,
}

impl WasapasoClient {
    /// Create a client for the production API.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build_blocking()
    }

    /// Create a client configured from `WASAPASO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env()?.build_blocking()
    }

    pub(crate) fn from_config(config: ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .default_headers(config.default_headers()?)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner { http, config }),
        })
    }

    /// The API key in masked form.
    pub fn api_key(&self) -> String {
        self.inner.config.credential.masked()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.config.base_url
    }

    /// Client-wide request timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.config.timeout
    }

    /// Access the sessions API.
    pub fn sessions(&self) -> SessionsApi {
        SessionsApi::new(self.clone())
    }

    /// Access the messages API.
    pub fn messages(&self) -> MessagesApi {
        MessagesApi::new(self.clone())
    }

    /// Access health and API key status.
    pub fn account(&self) -> AccountApi {
        AccountApi::new(self.clone())
    }

    /// Make a GET request and return the raw response body.
    pub fn get(&self, path: &str) -> Result<Value> {
        self.execute(ApiRequest::get(path))
    }

    /// Make a POST request and return the raw response body.
    pub fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.execute(ApiRequest::post(path).json_from(body)?)
    }

    /// Make a PATCH request and return the raw response body.
    pub fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.execute(ApiRequest::patch(path).json_from(body)?)
    }

    /// Make a PUT request and return the raw response body.
    pub fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.execute(ApiRequest::put(path).json_from(body)?)
    }

    /// Make a DELETE request and return the raw response body.
    pub fn delete(&self, path: &str) -> Result<Value> {
        self.execute(ApiRequest::delete(path))
    }

    /// Send a request and return the raw response body.
    pub fn execute(&self, request: ApiRequest) -> Result<Value> {
        let config = &self.inner.config;
        let url = transport::endpoint_url(&config.base_url, &request.path)?;
        let timeout = transport::effective_timeout(&request, config.timeout);

        tracing::debug!(method = %request.method, path = %request.path, ?timeout, "Sending blocking request");

        let mut builder = self
            .inner
            .http
            .request(request.method, url.clone())
            .timeout(timeout);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .map_err(|e| transport::transport_error(e, &url, timeout))?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        let text = response
            .text()
            .map_err(|e| transport::transport_error(e, &url, timeout))?;
        transport::into_result(status, &text)
    }

    pub(crate) fn call<T>(&self, call: Call<T>) -> Result<T> {
        let body = self.execute(call.request)?;
        (call.decode)(body)
    }
}

impl fmt::Debug for WasapasoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WasapasoClient")
            .field("api_key", &self.api_key())
            .field("base_url", &self.base_url().as_str())
            .field("blocking", &true)
            .finish()
    }
}
