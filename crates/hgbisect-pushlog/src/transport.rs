//! Transport capability trait for fetching json-pushes queries.
//!
//! The resolution core never talks HTTP directly: it takes any
//! implementation of [`Transport`], so the logic stays unit-testable
//! offline and retry/backoff policy lives entirely behind the trait.

use async_trait::async_trait;
use thiserror::Error;

/// Failures below the domain layer, produced by transport implementations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint answered with a non-success HTTP status.
    #[error("url {url} returned HTTP status {status}")]
    Status { status: u16, url: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not the JSON the endpoint promises.
    #[error("invalid JSON payload: {0}")]
    Decode(String),
}

/// Capability to GET a URL and return its parsed JSON body.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` and parse the response body as JSON.
    ///
    /// Implementations report every non-2xx status as
    /// [`TransportError::Status`]; transient-failure retries happen inside
    /// the implementation and are invisible to callers.
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, TransportError>;
}
