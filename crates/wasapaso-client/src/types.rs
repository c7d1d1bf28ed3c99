//! Request and response types for the Wasapaso API.
//!
//! These types mirror the server's API contract. Wire names are camelCase;
//! the mapping lives in the serde attributes on each type and is applied the
//! same way on decode and encode. Optional request fields the caller left
//! unset are never serialized.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─────────────────────────────────────────────────────────────────────────────
// Pagination
// ─────────────────────────────────────────────────────────────────────────────

/// Pagination descriptor returned by list endpoints.
///
/// Sessions are paged by `page`/`limit`; messages by `limit`/`offset`. Fields
/// the endpoint does not use are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page (1-based).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Offset of the first entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Total number of entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Total number of pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    /// Whether more entries follow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

impl Pagination {
    /// Whether the server reports entries beyond this page.
    pub fn has_next(&self) -> bool {
        if let Some(has_more) = self.has_more {
            return has_more;
        }
        match (self.page, self.pages, self.limit, self.total) {
            (Some(page), Some(pages), _, _) => page < pages,
            (Some(page), None, Some(limit), Some(total)) => {
                u64::from(page) * u64::from(limit) < total
            }
            (None, _, Some(limit), Some(total)) => {
                u64::from(self.offset.unwrap_or(0)) + u64::from(limit) < total
            }
            _ => false,
        }
    }
}

/// A page of entities plus its pagination descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Entities on this page.
    pub data: Vec<T>,
    /// Pagination descriptor.
    #[serde(default)]
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Number of entities on this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this page is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the entities on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sessions
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle status of a session. Always reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Not connected.
    Stopped,
    /// Connecting.
    Starting,
    /// Waiting for the QR code to be scanned.
    #[serde(rename = "SCAN_QR_CODE")]
    ScanQrCode,
    /// Connected and able to send.
    Working,
    /// The connection failed.
    Failed,
}

impl SessionStatus {
    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Stopped => "STOPPED",
            SessionStatus::Starting => "STARTING",
            SessionStatus::ScanQrCode => "SCAN_QR_CODE",
            SessionStatus::Working => "WORKING",
            SessionStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A messaging-channel connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Internal channel name assigned by the server.
    pub session_name: String,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// Number of messages exchanged.
    #[serde(default)]
    pub message_count: u64,
    /// Whether the session is billed.
    #[serde(default)]
    pub is_paid: bool,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Webhook URL events are delivered to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_webhook: Option<String>,
    /// Subscribed webhook events.
    #[serde(default)]
    pub webhook_events: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSession {
    /// Display name.
    pub name: String,
    /// Webhook URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// Webhook events to subscribe to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_events: Option<Vec<String>>,
    /// Free-form metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl CreateSession {
    /// Create a request with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the webhook URL.
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Set the webhook events.
    pub fn with_webhook_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.webhook_events = Some(events.into_iter().map(Into::into).collect());
        self
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Partial update of a session. Unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSession {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New webhook URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    /// New webhook events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_events: Option<Vec<String>>,
    /// Replacement metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl UpdateSession {
    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the webhook URL.
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Set the webhook events.
    pub fn webhook_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.webhook_events = Some(events.into_iter().map(Into::into).collect());
        self
    }

    /// Set the metadata.
    pub fn metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Query parameters for listing sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSessionsQuery {
    /// Page number (1-based).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Only return sessions in this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SessionStatus>,
}

impl Default for ListSessionsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            status: None,
        }
    }
}

impl ListSessionsQuery {
    /// Filter by status.
    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Paginated list of sessions.
pub type SessionList = Page<Session>;

/// Output format for the QR endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrFormat {
    /// Raw QR value.
    #[default]
    Json,
    /// Rendered image (base64).
    Image,
}

impl QrFormat {
    /// Wire name of the format.
    pub fn as_str(self) -> &'static str {
        match self {
            QrFormat::Json => "json",
            QrFormat::Image => "image",
        }
    }
}

/// QR value. The server returns either a plain string or a structured object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QrPayload {
    /// String value (raw QR data or a base64 image).
    Text(String),
    /// Any other JSON value, preserved as-is.
    Structured(Value),
}

impl QrPayload {
    /// The string value, if the server returned one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            QrPayload::Text(text) => Some(text),
            QrPayload::Structured(_) => None,
        }
    }
}

/// QR code used to link a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    /// Session ID.
    pub session_id: String,
    /// Internal channel name.
    pub session_name: String,
    /// QR value.
    pub qr: QrPayload,
}

/// Pairing code used to link a session by phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingCode {
    /// Session ID.
    pub session_id: String,
    /// Internal channel name.
    pub session_name: String,
    /// Phone number the code was issued for.
    pub phone_number: String,
    /// The code to enter on the phone.
    pub code: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

/// Message type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
    Video,
    Audio,
    File,
    Location,
    Contact,
    Poll,
    Buttons,
    /// A type this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A message exchanged through a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message ID.
    pub id: String,
    /// Owning session ID.
    pub session_id: String,
    /// Provider-assigned message ID.
    pub message_id: String,
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Message type.
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// When the message was exchanged.
    pub timestamp: DateTime<Utc>,
    /// Whether the message was sent by this account.
    pub from_me: bool,
}

/// Paginated list of messages.
pub type MessageList = Page<Message>;

/// Query parameters for listing messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesQuery {
    /// Session to list messages for.
    pub session_id: String,
    /// Only return messages from this chat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    /// Maximum number of messages.
    pub limit: u32,
    /// Offset of the first message.
    pub offset: u32,
    /// Only sent (`true`) or received (`false`) messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_me: Option<bool>,
}

impl ListMessagesQuery {
    /// Query the first 50 messages of a session.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            chat_id: None,
            limit: 50,
            offset: 0,
            from_me: None,
        }
    }

    /// Filter by chat.
    pub fn chat(mut self, chat_id: impl Into<String>) -> Self {
        self.chat_id = Some(chat_id.into());
        self
    }

    /// Set the page window.
    pub fn window(mut self, limit: u32, offset: u32) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    /// Filter by direction.
    pub fn from_me(mut self, from_me: bool) -> Self {
        self.from_me = Some(from_me);
        self
    }
}

/// Server confirmation of a sent message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    /// Session the message was sent through.
    pub session_id: String,
    /// Recipient address, as normalized by the server.
    pub to: String,
    /// Message type.
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// Provider-assigned message ID.
    pub message_id: String,
    /// When the message was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Raw provider result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Outbound messages
// ─────────────────────────────────────────────────────────────────────────────

/// A message to send.
///
/// Serializes to the flat wire shape: addressing fields plus the `type` tag
/// and the fields of the chosen [`MessageContent`] variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    /// Session to send through.
    pub session_id: String,
    /// Recipient phone number or chat ID.
    pub to: String,
    /// ID of the message being replied to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Type-specific content.
    #[serde(flatten)]
    pub content: MessageContent,
}

impl OutboundMessage {
    /// Create a message with arbitrary content.
    pub fn new(session_id: impl Into<String>, to: impl Into<String>, content: MessageContent) -> Self {
        Self {
            session_id: session_id.into(),
            to: to.into(),
            reply_to: None,
            content,
        }
    }

    /// A text message.
    pub fn text(
        session_id: impl Into<String>,
        to: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            session_id,
            to,
            MessageContent::Text {
                message: message.into(),
            },
        )
    }

    /// A media message (image, video, audio or file).
    pub fn media(
        session_id: impl Into<String>,
        to: impl Into<String>,
        kind: MediaKind,
        media: MediaContent,
    ) -> Self {
        let payload = MediaPayload {
            media,
            caption: None,
        };
        Self::new(session_id, to, kind.into_content(payload))
    }

    /// A location message.
    pub fn location(session_id: impl Into<String>, to: impl Into<String>, location: Location) -> Self {
        Self::new(session_id, to, MessageContent::Location { location })
    }

    /// A message sharing one or more contacts.
    pub fn contacts(
        session_id: impl Into<String>,
        to: impl Into<String>,
        contacts: Vec<Contact>,
    ) -> Self {
        Self::new(session_id, to, MessageContent::Contact { contacts })
    }

    /// A poll.
    pub fn poll(session_id: impl Into<String>, to: impl Into<String>, poll: Poll) -> Self {
        Self::new(session_id, to, MessageContent::Poll { poll })
    }

    /// A message with interactive buttons.
    pub fn buttons(
        session_id: impl Into<String>,
        to: impl Into<String>,
        buttons: ButtonsContent,
    ) -> Self {
        Self::new(session_id, to, MessageContent::Buttons { buttons })
    }

    /// Reply to an earlier message.
    pub fn reply_to(mut self, message_id: impl Into<String>) -> Self {
        self.reply_to = Some(message_id.into());
        self
    }

    /// Set the caption. Only media messages carry one; ignored otherwise.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        if let Some(payload) = self.content.media_mut() {
            payload.caption = Some(caption.into());
        }
        self
    }

    /// The type tag this message is sent with.
    pub fn message_type(&self) -> MessageType {
        self.content.message_type()
    }

    /// Path of the endpoint that accepts this message.
    pub fn endpoint(&self) -> &'static str {
        match self.content {
            MessageContent::Text { .. } => "messages/text",
            MessageContent::Image(_)
            | MessageContent::Video(_)
            | MessageContent::Audio(_)
            | MessageContent::File(_) => "messages/media",
            _ => "messages/send",
        }
    }
}

/// Type-specific message content, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageContent {
    /// Plain text.
    Text {
        /// Text body.
        message: String,
    },
    /// Image attachment.
    Image(MediaPayload),
    /// Video attachment.
    Video(MediaPayload),
    /// Audio attachment.
    Audio(MediaPayload),
    /// Generic file attachment.
    File(MediaPayload),
    /// Geographic location.
    Location {
        /// Coordinates.
        location: Location,
    },
    /// Shared contacts.
    Contact {
        /// Contact cards.
        contacts: Vec<Contact>,
    },
    /// Poll.
    Poll {
        /// Poll definition.
        poll: Poll,
    },
    /// Interactive buttons.
    Buttons {
        /// Buttons definition.
        buttons: ButtonsContent,
    },
}

impl MessageContent {
    /// The type tag of this content.
    pub fn message_type(&self) -> MessageType {
        match self {
            MessageContent::Text { .. } => MessageType::Text,
            MessageContent::Image(_) => MessageType::Image,
            MessageContent::Video(_) => MessageType::Video,
            MessageContent::Audio(_) => MessageType::Audio,
            MessageContent::File(_) => MessageType::File,
            MessageContent::Location { .. } => MessageType::Location,
            MessageContent::Contact { .. } => MessageType::Contact,
            MessageContent::Poll { .. } => MessageType::Poll,
            MessageContent::Buttons { .. } => MessageType::Buttons,
        }
    }

    fn media_mut(&mut self) -> Option<&mut MediaPayload> {
        match self {
            MessageContent::Image(p)
            | MessageContent::Video(p)
            | MessageContent::Audio(p)
            | MessageContent::File(p) => Some(p),
            _ => None,
        }
    }
}

/// Kind of media attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    File,
}

impl MediaKind {
    fn into_content(self, payload: MediaPayload) -> MessageContent {
        match self {
            MediaKind::Image => MessageContent::Image(payload),
            MediaKind::Video => MessageContent::Video(payload),
            MediaKind::Audio => MessageContent::Audio(payload),
            MediaKind::File => MessageContent::File(payload),
        }
    }
}

/// Media attachment plus optional caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaPayload {
    /// The attachment.
    pub media: MediaContent,
    /// Caption shown with the attachment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Where the media bytes come from. Serialized as either `url` or `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaSource {
    /// Publicly reachable URL.
    Url(String),
    /// Base64-encoded inline data.
    Data(String),
}

/// A media attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaContent {
    /// URL or inline data.
    #[serde(flatten)]
    pub source: MediaSource,
    /// MIME type, e.g. `image/jpeg`.
    pub mimetype: String,
    /// File name shown to the recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl MediaContent {
    /// Media fetched by the server from a URL.
    pub fn from_url(url: impl Into<String>, mimetype: impl Into<String>) -> Self {
        Self {
            source: MediaSource::Url(url.into()),
            mimetype: mimetype.into(),
            filename: None,
        }
    }

    /// Media sent inline as base64 data.
    pub fn from_data(data: impl Into<String>, mimetype: impl Into<String>) -> Self {
        Self {
            source: MediaSource::Data(data.into()),
            mimetype: mimetype.into(),
            filename: None,
        }
    }

    /// Set the file name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Geographic coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Place name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Location {
    /// Coordinates without a title.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            title: None,
        }
    }

    /// Set the place name.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A shared contact card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub full_name: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl Contact {
    /// Create a contact card.
    pub fn new(full_name: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            phone_number: phone_number.into(),
            organization: None,
        }
    }
}

/// A poll definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    /// Question.
    pub name: String,
    /// Answer options.
    pub options: Vec<String>,
    /// Whether more than one option may be picked.
    #[serde(default)]
    pub multiple_answers: bool,
}

impl Poll {
    /// A single-answer poll.
    pub fn new<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
            multiple_answers: false,
        }
    }
}

/// Kind of interactive button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonType {
    Reply,
    Call,
    Url,
    Copy,
}

/// An interactive button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    #[serde(rename = "type")]
    pub button_type: ButtonType,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_code: Option<String>,
}

impl Button {
    fn plain(button_type: ButtonType, text: impl Into<String>) -> Self {
        Self {
            button_type,
            text: text.into(),
            url: None,
            phone_number: None,
            copy_code: None,
        }
    }

    /// Quick-reply button.
    pub fn reply(text: impl Into<String>) -> Self {
        Self::plain(ButtonType::Reply, text)
    }

    /// Button that opens a URL.
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::plain(ButtonType::Url, text)
        }
    }

    /// Button that places a call.
    pub fn call(text: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            ..Self::plain(ButtonType::Call, text)
        }
    }

    /// Button that copies a code.
    pub fn copy(text: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            copy_code: Some(code.into()),
            ..Self::plain(ButtonType::Copy, text)
        }
    }
}

/// Content of a buttons message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonsContent {
    pub header: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    pub buttons: Vec<Button>,
}

// ─────────────────────────────────────────────────────────────────────────────
// API key status
// ─────────────────────────────────────────────────────────────────────────────

/// Session permissions of an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPermissions {
    pub create: bool,
    pub read: bool,
    pub update: bool,
    pub delete: bool,
}

impl Default for SessionPermissions {
    fn default() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }
}

/// Message permissions of an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagePermissions {
    pub send: bool,
    pub read: bool,
    pub delete: bool,
}

impl Default for MessagePermissions {
    fn default() -> Self {
        Self {
            send: true,
            read: true,
            delete: false,
        }
    }
}

/// Contact permissions of an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactPermissions {
    pub read: bool,
    pub manage: bool,
}

impl Default for ContactPermissions {
    fn default() -> Self {
        Self {
            read: true,
            manage: false,
        }
    }
}

/// Webhook permissions of an API key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookPermissions {
    pub manage: bool,
}

/// Permissions granted to an API key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub sessions: SessionPermissions,
    pub messages: MessagePermissions,
    pub contacts: ContactPermissions,
    pub webhooks: WebhookPermissions,
}

/// Server-enforced rate limits of an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    pub requests_per_minute: u32,
    pub requests_per_hour: u32,
    pub requests_per_day: u32,
}

/// Usage counters of an API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
    pub total_requests: u64,
    pub requests_today: u64,
    pub last_reset_date: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Metadata about the API key the client authenticates with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyInfo {
    /// Key name.
    pub name: String,
    /// Masked key as shown in the dashboard.
    pub display_key: String,
    /// Granted permissions.
    pub permissions: Permissions,
    /// Rate limits.
    pub rate_limit: RateLimit,
    /// Usage counters.
    pub usage: Usage,
    /// Whether the key is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Expiry time, if any.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Free-form metadata.
    #[serde(default)]
    pub metadata: Option<HashMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session_json() -> Value {
        json!({
            "id": "64abc123def456",
            "name": "Test Session",
            "sessionName": "session_user123_1234567890",
            "status": "SCAN_QR_CODE",
            "messageCount": 3,
            "isPaid": false,
            "metadata": {},
            "customWebhook": null,
            "webhookEvents": ["message"],
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z"
        })
    }

    #[test]
    fn test_session_decodes_camel_case() {
        let session: Session = serde_json::from_value(session_json()).unwrap();
        assert_eq!(session.id, "64abc123def456");
        assert_eq!(session.session_name, "session_user123_1234567890");
        assert_eq!(session.status, SessionStatus::ScanQrCode);
        assert_eq!(session.message_count, 3);
        assert_eq!(session.custom_webhook, None);
        assert_eq!(session.webhook_events, vec!["message"]);
    }

    #[test]
    fn test_session_status_order() {
        assert!(SessionStatus::Stopped < SessionStatus::Starting);
        assert!(SessionStatus::Starting < SessionStatus::ScanQrCode);
        assert!(SessionStatus::ScanQrCode < SessionStatus::Working);
        assert!(SessionStatus::Working < SessionStatus::Failed);
        assert_eq!(
            serde_json::to_value(SessionStatus::ScanQrCode).unwrap(),
            json!("SCAN_QR_CODE")
        );
        assert_eq!(SessionStatus::Working.to_string(), "WORKING");
    }

    #[test]
    fn test_update_session_omits_unset_fields() {
        let update = UpdateSession::default().name("Renamed");
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({"name": "Renamed"}));

        let empty = serde_json::to_value(UpdateSession::default()).unwrap();
        assert_eq!(empty, json!({}));
    }

    #[test]
    fn test_create_session_wire_names() {
        let create = CreateSession::new("Mine")
            .with_webhook_url("https://example.com/hook")
            .with_webhook_events(["message", "session.status"])
            .with_metadata("team", "sales");
        let value = serde_json::to_value(&create).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Mine",
                "webhookUrl": "https://example.com/hook",
                "webhookEvents": ["message", "session.status"],
                "metadata": {"team": "sales"}
            })
        );
    }

    #[test]
    fn test_text_message_wire_shape() {
        let msg = OutboundMessage::text("s1", "1234567890", "Hello").reply_to("m0");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "sessionId": "s1",
                "to": "1234567890",
                "replyTo": "m0",
                "type": "text",
                "message": "Hello"
            })
        );
        assert_eq!(msg.endpoint(), "messages/text");
    }

    #[test]
    fn test_media_message_wire_shape() {
        let media = MediaContent::from_url("https://example.com/a.jpg", "image/jpeg");
        let msg = OutboundMessage::media("s1", "123", MediaKind::Image, media).with_caption("Look");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "sessionId": "s1",
                "to": "123",
                "type": "image",
                "media": {"url": "https://example.com/a.jpg", "mimetype": "image/jpeg"},
                "caption": "Look"
            })
        );
        assert_eq!(msg.endpoint(), "messages/media");
    }

    #[test]
    fn test_inline_media_uses_data_key() {
        let media = MediaContent::from_data("aGVsbG8=", "application/pdf").with_filename("a.pdf");
        let value = serde_json::to_value(&media).unwrap();
        assert_eq!(
            value,
            json!({"data": "aGVsbG8=", "mimetype": "application/pdf", "filename": "a.pdf"})
        );
    }

    #[test]
    fn test_caption_ignored_for_non_media() {
        let msg = OutboundMessage::text("s1", "123", "hi").with_caption("nope");
        let value = serde_json::to_value(&msg).unwrap();
        assert!(value.get("caption").is_none());
    }

    #[test]
    fn test_location_poll_buttons_route_to_send() {
        let location = OutboundMessage::location(
            "s1",
            "123",
            Location::new(40.7128, -74.006).with_title("New York"),
        );
        assert_eq!(location.endpoint(), "messages/send");
        assert_eq!(
            serde_json::to_value(&location).unwrap()["location"],
            json!({"latitude": 40.7128, "longitude": -74.006, "title": "New York"})
        );

        let poll = OutboundMessage::poll("s1", "123", Poll::new("Lunch?", ["Yes", "No"]));
        assert_eq!(poll.message_type(), MessageType::Poll);
        assert_eq!(
            serde_json::to_value(&poll).unwrap()["poll"],
            json!({"name": "Lunch?", "options": ["Yes", "No"], "multipleAnswers": false})
        );

        let buttons = OutboundMessage::buttons(
            "s1",
            "123",
            ButtonsContent {
                header: "Hi".into(),
                body: "Pick one".into(),
                footer: None,
                buttons: vec![Button::reply("Yes"), Button::copy("Code", "X1")],
            },
        );
        assert_eq!(buttons.endpoint(), "messages/send");
        assert_eq!(
            serde_json::to_value(&buttons).unwrap()["buttons"]["buttons"][1],
            json!({"type": "copy", "text": "Code", "copyCode": "X1"})
        );
    }

    #[test]
    fn test_contacts_wire_shape() {
        let msg = OutboundMessage::contacts("s1", "123", vec![Contact::new("Ana", "+34600000000")]);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "contact");
        assert_eq!(
            value["contacts"],
            json!([{"fullName": "Ana", "phoneNumber": "+34600000000"}])
        );
    }

    #[test]
    fn test_message_decodes_from_and_type() {
        let message: Message = serde_json::from_value(json!({
            "id": "msg1",
            "sessionId": "64abc123",
            "messageId": "msg_id_1",
            "from": "1234567890@c.us",
            "to": "0987654321@c.us",
            "body": "Test message",
            "type": "text",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "fromMe": false
        }))
        .unwrap();
        assert_eq!(message.from, "1234567890@c.us");
        assert_eq!(message.message_type, MessageType::Text);
        assert!(!message.from_me);
    }

    #[test]
    fn test_unknown_message_type_is_preserved_as_unknown() {
        let ty: MessageType = serde_json::from_value(json!("sticker")).unwrap();
        assert_eq!(ty, MessageType::Unknown);
    }

    #[test]
    fn test_qr_payload_keeps_both_shapes() {
        let qr: QrCode = serde_json::from_value(json!({
            "sessionId": "s1",
            "sessionName": "session_1",
            "qr": "2@abc"
        }))
        .unwrap();
        assert_eq!(qr.qr.as_text(), Some("2@abc"));

        let qr: QrCode = serde_json::from_value(json!({
            "sessionId": "s1",
            "sessionName": "session_1",
            "qr": {"value": "2@abc", "expiresIn": 20}
        }))
        .unwrap();
        assert_eq!(
            qr.qr,
            QrPayload::Structured(json!({"value": "2@abc", "expiresIn": 20}))
        );
    }

    #[test]
    fn test_pagination_has_next() {
        let offset = Pagination {
            limit: Some(50),
            offset: Some(0),
            total: Some(1),
            has_more: Some(false),
            ..Default::default()
        };
        assert!(!offset.has_next());

        let paged = Pagination {
            page: Some(1),
            limit: Some(20),
            total: Some(45),
            ..Default::default()
        };
        assert!(paged.has_next());

        let last = Pagination {
            page: Some(3),
            pages: Some(3),
            ..Default::default()
        };
        assert!(!last.has_next());
    }

    #[test]
    fn test_list_messages_query_wire_names() {
        let query = ListMessagesQuery::new("s1").chat("123@c.us").from_me(true);
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(
            value,
            json!({"sessionId": "s1", "chatId": "123@c.us", "limit": 50, "offset": 0, "fromMe": true})
        );
    }

    #[test]
    fn test_api_key_info_defaults() {
        let info: ApiKeyInfo = serde_json::from_value(json!({
            "name": "Production",
            "displayKey": "wsk_****cdef",
            "permissions": {"sessions": {}, "messages": {"delete": true}},
            "rateLimit": {"requestsPerMinute": 60, "requestsPerHour": 1000, "requestsPerDay": 10000},
            "usage": {"totalRequests": 12, "requestsToday": 2, "lastResetDate": "2024-01-01T00:00:00Z"},
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(info.is_active);
        assert!(info.permissions.sessions.create);
        assert!(info.permissions.messages.delete);
        assert!(!info.permissions.webhooks.manage);
        assert_eq!(info.rate_limit.requests_per_minute, 60);
        assert_eq!(info.usage.last_used, None);
    }
}
