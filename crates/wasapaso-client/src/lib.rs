//! HTTP client SDK for the Wasapaso messaging API.
//!
//! This crate provides a typed client for managing messaging sessions and
//! sending and listing messages.
//!
//! # Example
//!
//! ```no_run
//! use wasapaso_client::{CreateSession, ListMessagesQuery, SessionStatus, WasapasoClient, Result};
//!
//! # async fn example() -> Result<()> {
//! // Create a client; the key format is checked before any request is made
//! let client = WasapasoClient::new("wsk_your_api_key_here")?;
//!
//! // Create and start a session
//! let session = client.sessions().create(CreateSession::new("Support")).await?;
//! let session = client.sessions().start(&session.id).await?;
//!
//! if session.status == SessionStatus::ScanQrCode {
//!     let qr = client.sessions().qr(&session.id).await?;
//!     println!("Scan: {:?}", qr.qr);
//! }
//!
//! // Send a text message
//! let sent = client
//!     .messages()
//!     .send_text(&session.id, "1234567890", "Hello!", None)
//!     .await?;
//! println!("Sent {}", sent.message_id);
//!
//! // Read received messages
//! let page = client
//!     .messages()
//!     .list(&ListMessagesQuery::new(&session.id).from_me(false))
//!     .await?;
//! for message in page {
//!     println!("{}: {:?}", message.from, message.body);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Failed calls return [`Error::Api`] carrying an [`ApiError`] whose
//! [`ErrorKind`] is derived from the HTTP status (401, 403, 404, 400/422, 429,
//! 5xx, anything else) or from the transport (connect failure, timeout). The
//! status code and parsed response body are kept. Invalid configuration fails
//! with [`Error::Config`] before any request is made. Nothing is retried.
//!
//! # Blocking API
//!
//! With the default `blocking` feature, [`blocking::WasapasoClient`] offers
//! the same operations as synchronous methods.

pub mod api;
#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod credential;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{ClientBuilder, WasapasoClient};
pub use credential::Credential;
pub use error::{ApiError, Error, ErrorKind, Result, map_status};
pub use transport::ApiRequest;
pub use types::*;
