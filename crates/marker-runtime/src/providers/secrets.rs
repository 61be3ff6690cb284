//! API key handling.
//!
//! The key is held in a [`SecretString`] and only reachable through
//! [`ApiCredential::expose`]. Debug and Display print `[REDACTED]`.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value as JsonValue;
use std::fmt;

use super::ProviderError;

/// An API key that stays out of logs.
pub struct ApiCredential {
    value: SecretString,
}

impl ApiCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: SecretString::from(value.into()),
        }
    }

    /// Read the key stored under `key` in a config document.
    ///
    /// A missing, non-string or empty value is an error naming the key.
    pub fn from_config(config: &JsonValue, key: &str) -> Result<Self, ProviderError> {
        match config[key].as_str() {
            Some(value) if !value.is_empty() => Ok(Self::new(value)),
            _ => Err(ProviderError::NotConfigured(format!(
                "'{}' must be set to a non-empty string",
                key
            ))),
        }
    }

    /// The raw key. Call only where it is sent.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential([REDACTED])")
    }
}

impl fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}
