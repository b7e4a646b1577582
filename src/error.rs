use std::io;

use thiserror::Error;

/// Failures of the token exchange and the search request.
///
/// None of these are retried: the caller surfaces the error and the
/// process exits non-zero.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing credentials: consumer key and secret must both be set")]
    MissingCredentials,

    #[error("failed to build HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error("transport failure contacting {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not parse token response (HTTP {status}): {message}")]
    TokenParse { status: u16, message: String },

    #[error("could not parse search response (HTTP {status}): {message}")]
    ResponseParse { status: u16, message: String },

    #[error("not authenticated: acquire a bearer token before searching")]
    NotAuthenticated,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failures of the labeling loop. Every variant stops the run.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("malformed record at line {line}: expected 3 tab-separated fields, found {found}")]
    MalformedRecord { line: usize, found: usize },

    #[error("interrupted: unrecognized label input {input:?}")]
    UnrecognizedLabel { input: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}
