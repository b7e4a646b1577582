// Library root
// -----------
// This crate exposes the pieces of the tweet collection and labeling tool.
// The binary (`main.rs`) parses arguments and hands control to `ui`.
//
// Module responsibilities:
// - `config`: Named, validated startup configuration (secrets, endpoints).
// - `credentials`: Builds the Basic-Auth key from consumer key and secret.
// - `api`: Blocking HTTP client for the token and search endpoints.
// - `export`: Writes search results as a delimited record file.
// - `labeler`: The deduplicating interactive labeling loop.
// - `ui`: Terminal flows (menu, spinners) that tie the others together.
// - `error`: Typed errors for the API client and the labeler.
pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod export;
pub mod labeler;
pub mod ui;

pub use config::{Config, Endpoints};
pub use error::{ApiError, LabelError};
