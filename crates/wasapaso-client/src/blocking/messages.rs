//! Blocking messages API.

use std::time::Duration;

use serde_json::{Map, Value};

use super::WasapasoClient;
use crate::api::messages::calls;
use crate::error::Result;
use crate::transport::Call;
use crate::types::{
    ButtonsContent, Contact, ListMessagesQuery, Location, MediaContent, MediaKind, Message,
    MessageList, OutboundMessage, Poll, SentMessage,
};

/// Blocking messages API client.
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

    fn run<T>(&self, call: Call<T>) -> Result<T> {
        self.client.call(call.timeout_opt(self.timeout))
    }

    /// Send any kind of message.
    pub fn send(&self, message: &OutboundMessage) -> Result<SentMessage> {
        self.run(calls::send(message)?)
    }

    /// Send an untyped payload to the generic send endpoint, as-is.
    pub fn send_raw(&self, payload: Map<String, Value>) -> Result<SentMessage> {
        self.run(calls::send_raw(Value::Object(payload)))
    }

    /// Send a text message.
    pub fn send_text(
        &self,
        session_id: &str,
        to: &str,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<SentMessage> {
        self.run(calls::text(session_id, to, text, reply_to)?)
    }

    /// Send an image, video, audio clip or file.
    pub fn send_media(
        &self,
        session_id: &str,
        to: &str,
        kind: MediaKind,
        media: MediaContent,
        caption: Option<&str>,
        reply_to: Option<&str>,
    ) -> Result<SentMessage> {
        self.run(calls::media(session_id, to, kind, media, caption, reply_to)?)
    }

    /// Send a location.
    pub fn send_location(
        &self,
        session_id: &str,
        to: &str,
        location: Location,
        reply_to: Option<&str>,
    ) -> Result<SentMessage> {
        self.run(calls::location(session_id, to, location, reply_to)?)
    }

    /// Share one or more contacts.
    pub fn send_contacts(
        &self,
        session_id: &str,
        to: &str,
        contacts: Vec<Contact>,
    ) -> Result<SentMessage> {
        self.send(&OutboundMessage::contacts(session_id, to, contacts))
    }

    /// Send a poll.
    pub fn send_poll(&self, session_id: &str, to: &str, poll: Poll) -> Result<SentMessage> {
        self.send(&OutboundMessage::poll(session_id, to, poll))
    }

    /// Send a message with interactive buttons.
    pub fn send_buttons(
        &self,
        session_id: &str,
        to: &str,
        buttons: ButtonsContent,
    ) -> Result<SentMessage> {
        self.send(&OutboundMessage::buttons(session_id, to, buttons))
    }

    /// List messages of a session.
    pub fn list(&self, query: &ListMessagesQuery) -> Result<MessageList> {
        self.run(calls::list(query)?)
    }

    /// Get a message by ID.
    pub fn get(&self, id: &str) -> Result<Message> {
        self.run(calls::get(id))
    }

    /// Mark a message as read.
    pub fn mark_as_read(&self, id: &str) -> Result<Value> {
        self.run(calls::mark_as_read(id))
    }

    /// React to a message with an emoji.
    pub fn react(&self, id: &str, reaction: &str) -> Result<Value> {
        self.run(calls::react(id, reaction))
    }

    /// Delete a message, optionally for every participant.
    pub fn delete(&self, id: &str, for_everyone: bool) -> Result<Value> {
        self.run(calls::delete(id, for_everyone))
    }
}
