//! Startup configuration.
//!
//! Built once from the parsed command line and passed by value into the API
//! client. Secrets arrive through clap's `env` fallback, so nothing below
//! reads the process environment directly.

use crate::credentials::ApiKey;

/// Default API host for both the token and the search endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.twitter.com";

const TOKEN_PATH: &str = "/oauth2/token";
const SEARCH_PATH: &str = "/1.1/search/tweets.json";

/// Fully resolved endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub token_url: String,
    pub search_url: String,
}

impl Endpoints {
    /// Derive both endpoints from an API base such as `https://api.twitter.com`.
    /// A trailing slash on the base is ignored.
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            token_url: format!("{base}{TOKEN_PATH}"),
            search_url: format!("{base}{SEARCH_PATH}"),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_base(DEFAULT_API_BASE)
    }
}

#[derive(Clone)]
pub struct Config {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub endpoints: Endpoints,
}

impl Config {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            endpoints: Endpoints::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Encode the credential pair. Empty values are not rejected here; the
    /// returned key remembers that it is missing and the token exchange
    /// refuses it.
    pub fn api_key(&self) -> ApiKey {
        ApiKey::encode(&self.consumer_key, &self.consumer_secret)
    }
}

// Hand-written so the secret never ends up in a log line.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("endpoints", &self.endpoints)
            .finish()
    }
}
