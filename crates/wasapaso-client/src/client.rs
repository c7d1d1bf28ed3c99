//! Main client implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::api::{AccountApi, MessagesApi, SessionsApi};
use crate::credential::Credential;
use crate::error::{Error, Result};
use crate::transport::{self, ApiRequest, Call};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.wasapaso.com";

/// Default timeout for requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "WASAPASO_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "WASAPASO_BASE_URL";

/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "WASAPASO_TIMEOUT_SECS";

/// Immutable configuration shared by every call of a client.
pub(crate) struct ClientConfig {
    pub(crate) credential: Credential,
    /// Always ends with `/`.
    pub(crate) base_url: Url,
    pub(crate) timeout: Duration,
    pub(crate) user_agent: String,
}

impl ClientConfig {
    /// Headers sent with every request.
    pub(crate) fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut key = HeaderValue::from_str(self.credential.expose())
            .map_err(|_| Error::Config("API key contains invalid header characters".to_string()))?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

        Ok(headers)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.credential.masked())
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Wasapaso API client.
///
/// Cheap to clone; clones share the connection pool and configuration.
///
/// # Example
///
/// ```no_run
/// use wasapaso_client::WasapasoClient;
///
/// # async fn example() -> wasapaso_client::Result<()> {
/// let client = WasapasoClient::new("wsk_your_api_key_here")?;
///
/// let sessions = client.sessions().list(&Default::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WasapasoClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
}

impl WasapasoClient {
    /// Create a client for the production API.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client configured from `WASAPASO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env()?.build()
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

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

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

    // ─────────────────────────────────────────────────────────────────────────
    // Raw HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Make a GET request and return the raw response body.
    pub async fn get(&self, path: &str) -> Result<Value> {
        self.execute(ApiRequest::get(path)).await
    }

    /// Make a POST request and return the raw response body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.execute(ApiRequest::post(path).json_from(body)?).await
    }

    /// Make a PATCH request and return the raw response body.
    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.execute(ApiRequest::patch(path).json_from(body)?).await
    }

    /// Make a PUT request and return the raw response body.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.execute(ApiRequest::put(path).json_from(body)?).await
    }

    /// Make a DELETE request and return the raw response body.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.execute(ApiRequest::delete(path)).await
    }

    /// Send a request and return the raw response body.
    ///
    /// Error statuses are mapped to typed errors; nothing is retried.
    pub async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let config = &self.inner.config;
        let url = transport::endpoint_url(&config.base_url, &request.path)?;
        let timeout = transport::effective_timeout(&request, config.timeout);

        tracing::debug!(method = %request.method, path = %request.path, ?timeout, "Sending request");

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
            .await
            .map_err(|e| transport::transport_error(e, &url, timeout))?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        let text = response
            .text()
            .await
            .map_err(|e| transport::transport_error(e, &url, timeout))?;
        transport::into_result(status, &text)
    }

    /// Run a facade call: send the request, then decode the response.
    pub(crate) async fn call<T>(&self, call: Call<T>) -> Result<T> {
        let body = self.execute(call.request).await?;
        (call.decode)(body)
    }
}

impl fmt::Debug for WasapasoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WasapasoClient")
            .field("api_key", &self.api_key())
            .field("base_url", &self.base_url().as_str())
            .finish()
    }
}

/// Builder for creating a [`WasapasoClient`] or its blocking counterpart.
#[derive(Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Create a builder from `WASAPASO_API_KEY`, and optionally
    /// `WASAPASO_BASE_URL` and `WASAPASO_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Config(format!("{} environment variable not set", API_KEY_ENV)))?;

        let mut builder = Self::new().api_key(api_key);
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            builder = builder.base_url(url);
        }
        if let Some(secs) = lookup(TIMEOUT_ENV).filter(|v| !v.is_empty()) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::Config(format!("{} must be a whole number of seconds", TIMEOUT_ENV))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }

    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL for the server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the default request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Validate the settings. No network activity happens here.
    pub(crate) fn config(self) -> Result<ClientConfig> {
        let credential = Credential::parse(self.api_key.unwrap_or_default())?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(self.base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("base URL '{}' cannot be a base", base_url)));
        }
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("wasapaso-rust/{}", env!("CARGO_PKG_VERSION")));

        Ok(ClientConfig {
            credential,
            base_url,
            timeout: self.timeout,
            user_agent,
        })
    }

    /// Build the async client.
    pub fn build(self) -> Result<WasapasoClient> {
        let config = self.config()?;

        let http = reqwest::Client::builder()
            .default_headers(config.default_headers()?)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(WasapasoClient {
            inner: Arc::new(ClientInner { http, config }),
        })
    }

    /// Build the blocking client.
    #[cfg(feature = "blocking")]
    pub fn build_blocking(self) -> Result<crate::blocking::WasapasoClient> {
        crate::blocking::WasapasoClient::from_config(self.config()?)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
