// API client module: a small blocking HTTP client for the two provider
// endpoints this tool needs. The token exchange runs once per process and
// the resulting bearer token is attached unchanged to every search.

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{Config, Endpoints};
use crate::credentials::ApiKey;
use crate::error::ApiError;

/// Maximum results requested per search. There is no pagination.
pub const SEARCH_COUNT: u32 = 100;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";
const GRANT_BODY: &str = "grant_type=client_credentials";

/// Blocking client holding the encoded key and, once acquired, the bearer
/// token for authenticated calls.
pub struct ApiClient {
    client: Client,
    endpoints: Endpoints,
    api_key: ApiKey,
    token: Option<String>,
}

/// Expected body of the token endpoint. `token_type` is read but not checked.
#[derive(Deserialize, Debug)]
pub struct OauthResponse {
    #[serde(default)]
    pub token_type: String,
    pub access_token: String,
}

/// Search endpoint response. Only the fields the tool consumes are modeled;
/// everything else in the payload is ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub statuses: Vec<Tweet>,
    #[serde(default)]
    pub search_metadata: SearchMetadata,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Tweet {
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub id_str: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user: User,
}

/// Author of a result. Just enough to identify them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct User {
    #[serde(default)]
    pub id_str: String,
    #[serde(default)]
    pub screen_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchMetadata {
    #[serde(default)]
    pub completed_in: f64,
    #[serde(default)]
    pub max_id_str: String,
    #[serde(default)]
    pub since_id_str: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub next_results: Option<String>,
}

impl ApiClient {
    /// Build a client from the startup configuration. The credential pair is
    /// encoded here, exactly once.
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = Client::builder().build().map_err(ApiError::ClientSetup)?;
        let api_key = config.api_key();
        Ok(ApiClient {
            client,
            endpoints: config.endpoints,
            api_key,
            token: None,
        })
    }

    /// Returns whether a bearer token has been acquired.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Exchange the client credentials for a bearer token
    /// (application-only authentication).
    ///
    /// On any failure the previously held token, if any, is left untouched.
    pub fn acquire_token(&mut self) -> Result<(), ApiError> {
        if self.api_key.is_missing() {
            return Err(ApiError::MissingCredentials);
        }

        let url = &self.endpoints.token_url;
        let res = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Basic {}", self.api_key.as_str()))
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(GRANT_BODY)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        info!(status = status.as_u16(), "token endpoint responded");
        let body = res.text().map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let token = parse_token_body(status, &body)?;
        debug!(token_len = token.len(), "bearer token acquired");
        self.token = Some(token);
        Ok(())
    }

    /// Search for recent results matching `query`, capped at
    /// [`SEARCH_COUNT`]. Requires a token from [`ApiClient::acquire_token`].
    pub fn search(&self, query: &str) -> Result<SearchResponse, ApiError> {
        let token = match self.token.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ApiError::NotAuthenticated),
        };

        // A GET carries no body, so the parameters go on the URL itself.
        let url = &self.endpoints.search_url;
        let count = SEARCH_COUNT.to_string();
        let res = self
            .client
            .get(url)
            .query(&[
                ("q", query),
                ("count", count.as_str()),
                ("result_type", "recent"),
            ])
            .bearer_auth(token)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        info!(status = status.as_u16(), query, "search endpoint responded");
        let body = res.text().map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let response = parse_search_body(status, &body)?;
        let meta = &response.search_metadata;
        info!(
            results = response.statuses.len(),
            completed_in = meta.completed_in,
            max_id = %meta.max_id_str,
            has_more = meta.next_results.is_some(),
            "search complete"
        );
        Ok(response)
    }
}

/// Pull the access token out of a token-endpoint body. A non-success status
/// is only reported; the body shape decides success.
pub fn parse_token_body(status: StatusCode, body: &str) -> Result<String, ApiError> {
    let parsed: OauthResponse =
        serde_json::from_str(body).map_err(|e| ApiError::TokenParse {
            status: status.as_u16(),
            message: e.to_string(),
        })?;
    if parsed.access_token.is_empty() {
        return Err(ApiError::TokenParse {
            status: status.as_u16(),
            message: "access_token is empty".to_owned(),
        });
    }
    debug!(token_type = %parsed.token_type, "parsed token response");
    Ok(parsed.access_token)
}

pub fn parse_search_body(status: StatusCode, body: &str) -> Result<SearchResponse, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::ResponseParse {
        status: status.as_u16(),
        message: e.to_string(),
    })
}
