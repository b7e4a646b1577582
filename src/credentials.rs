// Credential encoding for application-only authentication.
//
// The provider expects `base64(urlencode(key) + ":" + urlencode(secret))` in
// an `Authorization: Basic` header when exchanging client credentials for a
// bearer token.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encoded Basic-Auth key. Computed once from the credential pair and never
/// mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey {
    value: String,
    missing: bool,
}

impl ApiKey {
    /// Encode a consumer key and secret. Empty inputs still produce a key,
    /// but it is flagged as missing so the token exchange can refuse it.
    pub fn encode(key: &str, secret: &str) -> Self {
        let joined = format!("{}:{}", form_urlencode(key), form_urlencode(secret));
        Self {
            value: STANDARD.encode(joined.as_bytes()),
            missing: key.is_empty() || secret.is_empty(),
        }
    }

    /// True when either half of the credential pair was empty.
    pub fn is_missing(&self) -> bool {
        self.missing
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("len", &self.value.len())
            .field("missing", &self.missing)
            .finish()
    }
}

/// Percent-encode with form rules: unreserved characters pass through,
/// space becomes `+`, everything else is `%XX`.
pub fn form_urlencode(s: &str) -> String {
    // `urlencoding` emits `%20` for space; a literal `%` is always `%25`, so
    // this replacement cannot touch anything else.
    urlencoding::encode(s).replace("%20", "+")
}
