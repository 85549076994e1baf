//! Default HTTP transport for push-log queries.
//!
//! Wraps a `reqwest::Client` behind the core's [`Transport`] trait, with a
//! bounded retry for connection-level failures. HTTP status failures are
//! never retried here; interpreting them belongs to the resolution core.

use std::time::Duration;

use async_trait::async_trait;
use hgbisect_pushlog::{Transport, TransportError};
use tracing::{debug, warn};

/// HTTP transport configuration.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// User agent sent with every request.
    pub user_agent: String,
    /// Total attempts for connection-level failures.
    pub max_attempts: u32,
    /// Delay between attempts.
    pub retry_delay: Duration,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        HttpTransportConfig {
            user_agent: format!("hgbisect/{}", env!("CARGO_PKG_VERSION")),
            max_attempts: 3,
            retry_delay: Duration::from_secs(5),
        }
    }
}

impl HttpTransportConfig {
    /// Set the attempt budget for connection-level failures.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the delay between attempts.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }
}

/// Transport implementation over a shared `reqwest::Client`.
pub struct HttpTransport {
    config: HttpTransportConfig,
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport; fails if the TLS backend cannot be initialised.
    pub fn new(config: HttpTransportConfig) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| TransportError::Network(err.to_string()))?;

        Ok(HttpTransport {
            config,
            http_client,
        })
    }

    /// Create a transport with the default configuration.
    pub fn with_defaults() -> Result<Self, TransportError> {
        Self::new(HttpTransportConfig::default())
    }
}

/// Connection-level failures worth retrying; anything with a response is not.
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value, TransportError> {
        let mut attempt = 0;
        let response = loop {
            attempt += 1;
            match self.http_client.get(url).send().await {
                Ok(response) => break response,
                Err(err) if is_transient(&err) && attempt < self.config.max_attempts => {
                    warn!(
                        "transient failure fetching {} (attempt {}): {}",
                        url, attempt, err
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(err) => return Err(TransportError::Network(err.to_string())),
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        debug!("fetched {} ({})", url, status);

        response
            .json()
            .await
            .map_err(|err| TransportError::Decode(err.to_string()))
    }
}
