//! Messages API.

use std::time::Duration;

use serde_json::{Map, Value};

use crate::client::WasapasoClient;
use crate::error::Result;
use crate::transport::Call;
use crate::types::{
    ButtonsContent, Contact, ListMessagesQuery, Location, MediaContent, MediaKind, Message,
    MessageList, OutboundMessage, Poll, SentMessage,
};

/// Request builders shared by the async and blocking facades.
pub(crate) mod calls {
    use serde_json::{Value, json};

    use crate::error::Result;
    use crate::transport::{ApiRequest, Call, decode_data, decode_envelope, decode_raw};
    use crate::types::{
        ListMessagesQuery, Location, MediaContent, MediaKind, Message, MessageList,
        OutboundMessage, SentMessage,
    };

    fn with_reply(message: OutboundMessage, reply_to: Option<&str>) -> OutboundMessage {
        match reply_to {
            Some(id) => message.reply_to(id),
            None => message,
        }
    }

    pub(crate) fn send(message: &OutboundMessage) -> Result<Call<SentMessage>> {
        let request = ApiRequest::post(message.endpoint()).json_from(message)?;
        Ok(Call::new(request, decode_data))
    }

    pub(crate) fn send_raw(payload: Value) -> Call<SentMessage> {
        Call::new(ApiRequest::post("messages/send").json(payload), decode_data)
    }

    pub(crate) fn text(
        session_id: &str,
        to: &str,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<Call<SentMessage>> {
        send(&with_reply(OutboundMessage::text(session_id, to, text), reply_to))
    }

    pub(crate) fn media(
        session_id: &str,
        to: &str,
        kind: MediaKind,
        media: MediaContent,
        caption: Option<&str>,
        reply_to: Option<&str>,
    ) -> Result<Call<SentMessage>> {
        let mut message = OutboundMessage::media(session_id, to, kind, media);
        if let Some(caption) = caption {
            message = message.with_caption(caption);
        }
        send(&with_reply(message, reply_to))
    }

    pub(crate) fn location(
        session_id: &str,
        to: &str,
        location: Location,
        reply_to: Option<&str>,
    ) -> Result<Call<SentMessage>> {
        send(&with_reply(
            OutboundMessage::location(session_id, to, location),
            reply_to,
        ))
    }

    pub(crate) fn list(query: &ListMessagesQuery) -> Result<Call<MessageList>> {
        let request = ApiRequest::get("messages").query_from(query)?;
        Ok(Call::new(request, decode_envelope))
    }

    pub(crate) fn get(id: &str) -> Call<Message> {
        Call::new(ApiRequest::get(format!("messages/{}", id)), decode_data)
    }

    pub(crate) fn mark_as_read(id: &str) -> Call<Value> {
        Call::new(ApiRequest::post(format!("messages/{}/read", id)), decode_raw)
    }

    pub(crate) fn react(id: &str, reaction: &str) -> Call<Value> {
        let request =
            ApiRequest::post(format!("messages/{}/react", id)).json(json!({ "reaction": reaction }));
        Call::new(request, decode_raw)
    }

    pub(crate) fn delete(id: &str, for_everyone: bool) -> Call<Value> {
        let request =
            ApiRequest::delete(format!("messages/{}", id)).query("deleteForEveryone", for_everyone);
        Call::new(request, decode_raw)
    }
}

/// Messages API client.
pub struct MessagesApi {
    client: WasapasoClient,
    timeout: Option<Duration>,
}

impl MessagesApi {
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

    /// Send any kind of message.
    pub async fn send(&self, message: &OutboundMessage) -> Result<SentMessage> {
        self.run(calls::send(message)?).await
    }

    /// Send an untyped payload to the generic send endpoint, as-is.
    pub async fn send_raw(&self, payload: Map<String, Value>) -> Result<SentMessage> {
        self.run(calls::send_raw(Value::Object(payload))).await
    }

    /// Send a text message.
    pub async fn send_text(
        &self,
        session_id: &str,
        to: &str,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<SentMessage> {
        self.run(calls::text(session_id, to, text, reply_to)?).await
    }

    /// Send an image, video, audio clip or file.
    pub async fn send_media(
        &self,
        session_id: &str,
        to: &str,
        kind: MediaKind,
        media: MediaContent,
        caption: Option<&str>,
        reply_to: Option<&str>,
    ) -> Result<SentMessage> {
        self.run(calls::media(session_id, to, kind, media, caption, reply_to)?)
            .await
    }

    /// Send a location.
    pub async fn send_location(
        &self,
        session_id: &str,
        to: &str,
        location: Location,
        reply_to: Option<&str>,
    ) -> Result<SentMessage> {
        self.run(calls::location(session_id, to, location, reply_to)?)
            .await
    }

    /// Share one or more contacts.
    pub async fn send_contacts(
        &self,
        session_id: &str,
        to: &str,
        contacts: Vec<Contact>,
    ) -> Result<SentMessage> {
        self.send(&OutboundMessage::contacts(session_id, to, contacts))
            .await
    }

    /// Send a poll.
    pub async fn send_poll(&self, session_id: &str, to: &str, poll: Poll) -> Result<SentMessage> {
        self.send(&OutboundMessage::poll(session_id, to, poll)).await
    }

    /// Send a message with interactive buttons.
    pub async fn send_buttons(
        &self,
        session_id: &str,
        to: &str,
        buttons: ButtonsContent,
    ) -> Result<SentMessage> {
        self.send(&OutboundMessage::buttons(session_id, to, buttons))
            .await
    }

    /// List messages of a session.
    pub async fn list(&self, query: &ListMessagesQuery) -> Result<MessageList> {
        self.run(calls::list(query)?).await
    }

    /// Get a message by ID.
    pub async fn get(&self, id: &str) -> Result<Message> {
        self.run(calls::get(id)).await
    }

    /// Mark a message as read.
    pub async fn mark_as_read(&self, id: &str) -> Result<Value> {
        self.run(calls::mark_as_read(id)).await
    }

    /// React to a message with an emoji.
    pub async fn react(&self, id: &str, reaction: &str) -> Result<Value> {
        self.run(calls::react(id, reaction)).await
    }

    /// Delete a message, optionally for every participant.
    pub async fn delete(&self, id: &str, for_everyone: bool) -> Result<Value> {
        self.run(calls::delete(id, for_everyone)).await
    }
}
