//! Sessions API.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::client::WasapasoClient;
use crate::error::Result;
use crate::transport::Call;
use crate::types::{
    CreateSession, ListSessionsQuery, PairingCode, QrCode, QrFormat, Session, SessionList,
    UpdateSession,
};

/// Request builders shared by the async and blocking facades.
pub(crate) mod calls {
    use serde::Serialize;
    use serde_json::{Value, json};

    use crate::error::Result;
    use crate::transport::{ApiRequest, Call, decode_data, decode_envelope, decode_raw};
    use crate::types::{ListSessionsQuery, PairingCode, QrCode, QrFormat, Session, SessionList};

    /// Serialize a typed create/update payload; unset fields are omitted.
    pub(crate) fn payload<T: Serialize>(typed: &T) -> Result<Value> {
        Ok(serde_json::to_value(typed)?)
    }

    pub(crate) fn create(payload: Value) -> Call<Session> {
        Call::new(ApiRequest::post("sessions").json(payload), decode_data)
    }

    pub(crate) fn list(query: &ListSessionsQuery) -> Result<Call<SessionList>> {
        let request = ApiRequest::get("sessions").query_from(query)?;
        Ok(Call::new(request, decode_envelope))
    }

    pub(crate) fn get(id: &str) -> Call<Session> {
        Call::new(ApiRequest::get(format!("sessions/{}", id)), decode_data)
    }

    pub(crate) fn update(id: &str, payload: Value) -> Call<Session> {
        Call::new(
            ApiRequest::patch(format!("sessions/{}", id)).json(payload),
            decode_data,
        )
    }

    pub(crate) fn delete(id: &str) -> Call<Value> {
        Call::new(ApiRequest::delete(format!("sessions/{}", id)), decode_raw)
    }

    pub(crate) fn start(id: &str) -> Call<Session> {
        Call::new(ApiRequest::post(format!("sessions/{}/start", id)), decode_data)
    }

    pub(crate) fn stop(id: &str) -> Call<Session> {
        Call::new(ApiRequest::post(format!("sessions/{}/stop", id)), decode_data)
    }

    pub(crate) fn qr(id: &str, format: QrFormat) -> Call<QrCode> {
        let request = ApiRequest::get(format!("sessions/{}/qr", id)).query("format", format.as_str());
        Call::new(request, decode_data)
    }

    pub(crate) fn pairing_code(id: &str, phone_number: &str) -> Call<PairingCode> {
        let request = ApiRequest::post(format!("sessions/{}/pair", id))
            .json(json!({ "phoneNumber": phone_number }));
        Call::new(request, decode_data)
    }
}

/// Sessions API client.
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

    async fn run<T>(&self, call: Call<T>) -> Result<T> {
        self.client.call(call.timeout_opt(self.timeout)).await
    }

    /// Create a new session.
    pub async fn create(&self, request: CreateSession) -> Result<Session> {
        self.run(calls::create(calls::payload(&request)?)).await
    }

    /// Create a session from an untyped payload, sent as-is.
    pub async fn create_raw(&self, payload: Map<String, Value>) -> Result<Session> {
        self.run(calls::create(Value::Object(payload))).await
    }

    /// List sessions.
    pub async fn list(&self, query: &ListSessionsQuery) -> Result<SessionList> {
        self.run(calls::list(query)?).await
    }

    /// Get a session by ID.
    pub async fn get(&self, id: &str) -> Result<Session> {
        self.run(calls::get(id)).await
    }

    /// Update a session. Only the fields set on `request` are sent.
    pub async fn update(&self, id: &str, request: UpdateSession) -> Result<Session> {
        self.run(calls::update(id, calls::payload(&request)?)).await
    }

    /// Update a session from an untyped payload, sent as-is.
    pub async fn update_raw(&self, id: &str, payload: Map<String, Value>) -> Result<Session> {
        self.run(calls::update(id, Value::Object(payload))).await
    }

    /// Delete a session. Returns the server's confirmation.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.run(calls::delete(id)).await
    }

    /// Start a session. The returned status is whatever the server reports.
    pub async fn start(&self, id: &str) -> Result<Session> {
        self.run(calls::start(id)).await
    }

    /// Stop a session.
    pub async fn stop(&self, id: &str) -> Result<Session> {
        self.run(calls::stop(id)).await
    }

    /// Get the QR code used to link the session.
    pub async fn qr(&self, id: &str) -> Result<QrCode> {
        self.qr_with_format(id, QrFormat::default()).await
    }

    /// Get the QR code in a specific format.
    pub async fn qr_with_format(&self, id: &str, format: QrFormat) -> Result<QrCode> {
        self.run(calls::qr(id, format)).await
    }

    /// Request a pairing code to link the session by phone number.
    pub async fn request_pairing_code(&self, id: &str, phone_number: &str) -> Result<PairingCode> {
        self.run(calls::pairing_code(id, phone_number)).await
    }
}
