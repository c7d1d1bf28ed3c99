//! API endpoint implementations.
//!
//! Each resource module builds its requests once, as `Call` values, and
//! exposes an async facade over them. The blocking facades reuse the same
//! builders.

pub(crate) mod account;
pub(crate) mod messages;
pub(crate) mod sessions;

pub use account::AccountApi;
pub use messages::MessagesApi;
pub use sessions::SessionsApi;
