//! Request description and response normalization shared by the async and
//! blocking clients.
//!
//! Nothing in here performs I/O. The clients turn an [`ApiRequest`] into a
//! `reqwest` request, and hand the status and body text back to
//! [`into_result`].

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use url::Url;

use crate::error::{ApiError, Error, ErrorKind, Result, map_status};

/// Versioned path prefix every endpoint lives under.
pub(crate) const API_PREFIX: &str = "api/v1/";

/// A single API call, described independently of the call mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Value>,
    pub(crate) timeout: Option<Duration>,
}

impl ApiRequest {
    /// Describe a request to a path relative to `/api/v1/`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// A GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// A PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// A PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// A DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add one query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add every field of a serializable struct as a query parameter.
    ///
    /// `null` fields are skipped; booleans render as `true`/`false`.
    pub fn query_from<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self> {
        match serde_json::to_value(query)? {
            Value::Object(fields) => {
                for (key, value) in fields {
                    match value {
                        Value::Null => {}
                        Value::String(s) => self.query.push((key, s)),
                        other => self.query.push((key, other.to_string())),
                    }
                }
                Ok(self)
            }
            Value::Null => Ok(self),
            other => Err(Error::Config(format!(
                "query parameters must serialize to an object, got {}",
                other
            ))),
        }
    }

    /// Set the JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize a typed payload as the JSON body.
    pub fn json_from<B: Serialize + ?Sized>(self, body: &B) -> Result<Self> {
        Ok(self.json(serde_json::to_value(body)?))
    }

    /// Override the client-wide timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Apply a timeout override if one is given.
    pub(crate) fn timeout_opt(mut self, timeout: Option<Duration>) -> Self {
        if timeout.is_some() {
            self.timeout = timeout;
        }
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path relative to `/api/v1/`.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// How a successful response body becomes a typed value.
pub(crate) type Decoder<T> = fn(Value) -> Result<T>;

/// A request plus the decoder for its response.
///
/// Facades build one of these per operation; either client runs it.
pub(crate) struct Call<T> {
    pub(crate) request: ApiRequest,
    pub(crate) decode: Decoder<T>,
}

impl<T> Call<T> {
    pub(crate) fn new(request: ApiRequest, decode: Decoder<T>) -> Self {
        Self { request, decode }
    }

    pub(crate) fn timeout_opt(mut self, timeout: Option<Duration>) -> Self {
        self.request = self.request.timeout_opt(timeout);
        self
    }
}

/// Decode the `data` sub-object of a single-entity response.
pub(crate) fn decode_data<T: DeserializeOwned>(mut body: Value) -> Result<T> {
    let data = body
        .get_mut("data")
        .map(Value::take)
        .unwrap_or(Value::Null);
    Ok(serde_json::from_value(data)?)
}

/// Decode the whole response envelope.
pub(crate) fn decode_envelope<T: DeserializeOwned>(body: Value) -> Result<T> {
    Ok(serde_json::from_value(body)?)
}

/// Return the response untouched.
pub(crate) fn decode_raw(body: Value) -> Result<Value> {
    Ok(body)
}

/// Decode the value under `key` of the response.
pub(crate) fn decode_field<T: DeserializeOwned>(mut body: Value, key: &str) -> Result<T> {
    let field = body.get_mut(key).map(Value::take).unwrap_or(Value::Null);
    Ok(serde_json::from_value(field)?)
}

/// Join the base URL, the versioned prefix and an endpoint path.
///
/// `base` must end with `/`.
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    let path = path.trim_start_matches('/');
    base.join(&format!("{}{}", API_PREFIX, path))
        .map_err(Error::from)
}

/// Parse a response body, substituting a marker object for invalid JSON.
///
/// A blank body is not valid JSON and gets the marker too.
pub(crate) fn parse_body(text: &str) -> Value {
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Response body is not valid JSON");
            json!({
                "error": "Invalid JSON response",
                "raw": text,
            })
        }
    }
}

/// Turn a received response into the parsed body or a typed error.
///
/// An empty success body (e.g. 204) becomes `{}`.
pub(crate) fn into_result(status: StatusCode, text: &str) -> Result<Value> {
    if status.as_u16() >= 400 {
        let err = map_status(status.as_u16(), parse_body(text));
        tracing::debug!(status = status.as_u16(), kind = %err.kind(), "API returned an error");
        return Err(err.into());
    }
    if text.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    Ok(parse_body(text))
}

/// The timeout a request runs with. A zero override means no override.
pub(crate) fn effective_timeout(request: &ApiRequest, default: Duration) -> Duration {
    request
        .timeout
        .filter(|t| !t.is_zero())
        .unwrap_or(default)
}

/// Classify a transport failure that happened before a response arrived.
pub(crate) fn transport_error(err: reqwest::Error, url: &Url, timeout: Duration) -> Error {
    if err.is_timeout() {
        ApiError::new(
            ErrorKind::Timeout,
            format!("Request timed out after {}s", timeout.as_secs_f64()),
        )
        .into()
    } else if err.is_connect() {
        ApiError::new(ErrorKind::Connection, format!("Failed to connect to {}", url)).into()
    } else {
        Error::Http(err)
    }
}
