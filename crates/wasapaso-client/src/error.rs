//! Client error types.
//!
//! Every failure the server reports is normalized into an [`ApiError`] whose
//! [`ErrorKind`] is derived from the HTTP status alone. Transport failures that
//! never produced a response (connect failures, timeouts) use the same shape
//! with no status code.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Classification of an API or transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 401: the credential was rejected.
    Authentication,
    /// 403: the credential lacks a permission.
    Permission,
    /// 404: the resource does not exist.
    NotFound,
    /// 400 or 422: the request parameters were rejected.
    Validation,
    /// 429: the server-side rate limit was hit.
    RateLimit,
    /// Any status in `500..600`.
    Server,
    /// Any other error status.
    Api,
    /// The connection could not be established.
    Connection,
    /// The request did not complete within its timeout.
    Timeout,
}

impl ErrorKind {
    /// Classify an HTTP error status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Permission,
            404 => ErrorKind::NotFound,
            400 | 422 => ErrorKind::Validation,
            429 => ErrorKind::RateLimit,
            500..=599 => ErrorKind::Server,
            _ => ErrorKind::Api,
        }
    }

    /// Message used when the server did not supply one.
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::Authentication => "Authentication failed. Check your credential.",
            ErrorKind::Permission => "Permission denied. Credential lacks required permissions.",
            ErrorKind::NotFound => "Resource not found.",
            ErrorKind::Validation => "Validation error. Check your request parameters.",
            ErrorKind::RateLimit => "Rate limit exceeded. Please try again later.",
            ErrorKind::Server => "Server error. Please try again later.",
            ErrorKind::Api => "An error occurred",
            ErrorKind::Connection => "Failed to connect to API.",
            ErrorKind::Timeout => "Request timed out.",
        }
    }

    /// Short name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Authentication => "authentication",
            ErrorKind::Permission => "permission",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Validation => "validation",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Server => "server",
            ErrorKind::Api => "api",
            ErrorKind::Connection => "connection",
            ErrorKind::Timeout => "timeout",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed failure reported by the API or the transport.
///
/// Always carries the kind and a message; carries the status code and the
/// parsed response body whenever a response was received.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    body: Option<Value>,
}

impl ApiError {
    /// Create an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Attach the HTTP status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the parsed response body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message, without the status prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status code, if a response was received.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Parsed response body, if a response was received.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "[{}] {}", status, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Map an error status and its parsed body to a typed error.
///
/// The message comes from the body's `message` field when it is a string,
/// otherwise from the kind's default.
pub fn map_status(status: u16, body: Value) -> ApiError {
    let kind = ErrorKind::from_status(status);
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| kind.default_message().to_string());

    ApiError::new(kind, message)
        .with_status(status)
        .with_body(body)
}

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The API or the transport reported a failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Invalid client configuration. Raised before any network activity.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A successful response did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Any other HTTP-layer failure.
    #[error("HTTP error occurred: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// The taxonomy kind, if this is an API or transport failure.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Api(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// HTTP status code, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(err) => err.status(),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Parsed response body of a failed call.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Error::Api(err) => err.body(),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::NotFound)
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.kind() == Some(ErrorKind::Authentication)
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        self.kind() == Some(ErrorKind::RateLimit)
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        self.kind() == Some(ErrorKind::Server)
    }

    /// Check if this is a configuration error.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
