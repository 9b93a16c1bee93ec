//! Error types for the fetch stage. Compute and formatting are infallible.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP {status} {reason} from {url}")]
    Http {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
