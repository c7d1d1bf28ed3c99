//! Blocking sessions API.

use std::time::Duration;

use serde_json::{Map, Value};

use super::WasapasoClient;
use crate::api::sessions::calls;
use crate::error::Result;
use crate::transport::Call;
use crate::types::{
    CreateSession, ListSessionsQuery, PairingCode, QrCode, QrFormat, Session, SessionList,
    UpdateSession,
};

/// Blocking sessions API client.
pub struct SessionsApi {
    client: WasapasoClient,
    timeout: Option<Duration>,
}

impl SessionsApi {
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

    /// Create a new session.
    pub fn create(&self, request: CreateSession) -> Result<Session> {
        self.run(calls::create(calls::payload(&request)?))
    }

    /// Create a session from an untyped payload, sent as-is.
    pub fn create_raw(&self, payload: Map<String, Value>) -> Result<Session> {
        self.run(calls::create(Value::Object(payload)))
    }

    /// List sessions.
    pub fn list(&self, query: &ListSessionsQuery) -> Result<SessionList> {
        self.run(calls::list(query)?)
    }

    /// Get a session by ID.
    pub fn get(&self, id: &str) -> Result<Session> {
        self.run(calls::get(id))
    }

    /// Update a session. Only the fields set on `request` are sent.
    pub fn update(&self, id: &str, request: UpdateSession) -> Result<Session> {
        self.run(calls::update(id, calls::payload(&request)?))
    }

    /// Update a session from an untyped payload, sent as-is.
    pub fn update_raw(&self, id: &str, payload: Map<String, Value>) -> Result<Session> {
        self.run(calls::update(id, Value::Object(payload)))
    }

    /// Delete a session. Returns the server's confirmation.
    pub fn delete(&self, id: &str) -> Result<Value> {
        self.run(calls::delete(id))
    }

    /// Start a session.
    pub fn start(&self, id: &str) -> Result<Session> {
        self.run(calls::start(id))
    }

    /// Stop a session.
    pub fn stop(&self, id: &str) -> Result<Session> {
        self.run(calls::stop(id))
    }

    /// Get the QR code used to link the session.
    pub fn qr(&self, id: &str) -> Result<QrCode> {
        self.qr_with_format(id, QrFormat::default())
    }

    /// Get the QR code in a specific format.
    pub fn qr_with_format(&self, id: &str, format: QrFormat) -> Result<QrCode> {
        self.run(calls::qr(id, format))
    }

    /// Request a pairing code to link the session by phone number.
    pub fn request_pairing_code(&self, id: &str, phone_number: &str) -> Result<PairingCode> {
        self.run(calls::pairing_code(id, phone_number))
    }
}
