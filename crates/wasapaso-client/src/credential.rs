//! API key handling.

use std::fmt;

use crate::error::{Error, Result};

/// Prefix every Wasapaso API key starts with.
pub const API_KEY_PREFIX: &str = "wsk_";

const MASK: &str = "****";

/// A validated API key.
///
/// The raw value is only ever handed to the transport; `Debug` and `Display`
/// render the masked form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Validate an API key.
    pub fn parse(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::Config(
                "API key is required and must be a non-empty string".to_string(),
            ));
        }
        if !key.starts_with(API_KEY_PREFIX) {
            return Err(Error::Config(format!(
                "Invalid API key format. API keys should start with '{}'",
                API_KEY_PREFIX
            )));
        }
        Ok(Self(key))
    }

    /// Masked form: prefix, mask, and the last 4 characters.
    ///
    /// Keys of 8 characters or fewer are masked entirely.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() > 8 {
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}{}{}", API_KEY_PREFIX, MASK, tail)
        } else {
            format!("{}{}", API_KEY_PREFIX, MASK)
        }
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}
