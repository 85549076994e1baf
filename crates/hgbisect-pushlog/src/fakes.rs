//! In-memory transport fakes (testing only).
//!
//! [`ScriptedTransport`] answers queries from a fixed url-to-response table
//! and records every requested URL, so resolution logic can be exercised
//! without any network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::transport::{Transport, TransportError};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Successful JSON body.
    Json(Value),
    /// HTTP status failure.
    Status(u16),
    /// Connection-level failure.
    Network(String),
}

/// Transport fake answering from a fixed url-to-response script.
///
/// Unscripted URLs answer 404, matching how the live endpoint treats
/// queries for repositories or pushes it does not know.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<HashMap<String, ScriptedResponse>>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful JSON body for `url`.
    pub fn with_json(self, url: &str, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), ScriptedResponse::Json(body));
        self
    }

    /// Script an HTTP status failure for `url`.
    pub fn with_status(self, url: &str, status: u16) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), ScriptedResponse::Status(status));
        self
    }

    /// Script a connection-level failure for `url`.
    pub fn with_network_error(self, url: &str, detail: &str) -> Self {
        self.responses.lock().unwrap().insert(
            url.to_string(),
            ScriptedResponse::Network(detail.to_string()),
        );
        self
    }

    /// URLs requested so far, in request order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        self.requested.lock().unwrap().push(url.to_string());
        let response = self.responses.lock().unwrap().get(url).cloned();
        match response {
            Some(ScriptedResponse::Json(body)) => Ok(body),
            Some(ScriptedResponse::Status(status)) => Err(TransportError::Status {
                status,
                url: url.to_string(),
            }),
            Some(ScriptedResponse::Network(detail)) => Err(TransportError::Network(detail)),
            None => Err(TransportError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }
}
