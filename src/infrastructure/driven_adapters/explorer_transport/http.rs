//! HTTP Explorer Transport
//!
//! Implements the explorer transport port over reqwest. The whole call is
//! bound by a single timeout budget so an unresponsive explorer resolves
//! as a `Timeout` failure instead of stalling the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::gateways::explorer_transport::{ExplorerCall, ExplorerResponse, ExplorerTransport};
use crate::shared::errors::TransportError;

/// Header carrying the explorer credential, when one is configured
const API_KEY_HEADER: &str = "x-api-key";

/// reqwest-backed implementation of the explorer transport port
pub struct HttpExplorerTransport {
    client: Client,
    timeout: Duration,
}

impl HttpExplorerTransport {
    /// Build a transport with the given per-call timeout budget
    ///
    /// # Errors
    ///
    /// Returns the underlying builder error if the TLS backend cannot be
    /// initialized.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl ExplorerTransport for HttpExplorerTransport {
    async fn submit(&self, call: &ExplorerCall) -> Result<ExplorerResponse, TransportError> {
        let mut request = self
            .client
            .post(call.verify_url.clone())
            .json(&call.payload);
        if let Some(api_key) = &call.api_key {
            request = request.header(API_KEY_HEADER, api_key.expose());
        }

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                TransportError::Timeout(self.timeout)
            } else {
                TransportError::Connect(err.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ExplorerResponse>()
            .await
            .map_err(|err| TransportError::Rejected {
                status: status.as_u16(),
                message: format!("unparseable explorer response: {err}"),
            })
    }
}
