//! Client configuration.

use serde::{Deserialize, Serialize};

/// Naming profile of a server flavour.
///
/// The same API ships under several brands that differ only in header prefix,
/// API root and the name of the auth token field in login responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Header prefix, e.g. `X-Divroll` in `X-Divroll-App-Id`.
    pub header_prefix: String,
    /// Path prefix of every endpoint, e.g. `/divroll`.
    pub api_root: String,
    /// Key holding the auth token in user payloads.
    pub auth_token_field: String,
}

impl Brand {
    pub fn divroll() -> Self {
        Self::named("X-Divroll", "/divroll", "authToken")
    }

    pub fn domino() -> Self {
        Self::named("X-Domino", "/domino", "authToken")
    }

    pub fn roll() -> Self {
        Self::named("X-Roll", "/roll", "webToken")
    }

    fn named(header_prefix: &str, api_root: &str, auth_token_field: &str) -> Self {
        Self {
            header_prefix: header_prefix.to_string(),
            api_root: api_root.to_string(),
            auth_token_field: auth_token_field.to_string(),
        }
    }

    /// Full header name for a suffix such as `App-Id`.
    pub fn header(&self, suffix: &str) -> String {
        format!("{}-{}", self.header_prefix, suffix)
    }
}

impl Default for Brand {
    fn default() -> Self {
        Self::divroll()
    }
}

/// Connection settings for a [`crate::DivrollClient`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server base URL without the API root (e.g. `https://api.example.com`).
    pub base_url: String,
    /// Server flavour.
    #[serde(default)]
    pub brand: Brand,
    /// Per-request timeout (in seconds).
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            brand: Brand::default(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_brand(mut self, brand: Brand) -> Self {
        self.brand = brand;
        self
    }
}
