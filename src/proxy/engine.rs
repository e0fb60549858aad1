// ────────────────────────────────
// src/proxy/engine.rs
// Outbound side: one GET per inbound request to the simulation engine.
// ────────────────────────────────

use hyper::StatusCode;
use reqwest::Client;
use serde_json::value::RawValue;
use tracing::debug;

use super::endpoint::SimulationEndpoint;
use super::error::ProxyError;
use crate::config::EngineConfig;

/// What the engine answered: its status code and a body known to be JSON.
#[derive(Debug)]
pub struct EngineReply {
    pub status: StatusCode,
    pub body: Box<RawValue>,
}

#[derive(Debug, Clone)]
pub struct EngineClient {
    client: Client,
    base_url: String,
    max_body_bytes: usize,
}

impl EngineClient {
    pub fn new(config: &EngineConfig) -> Result<Self, ProxyError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ProxyError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base().to_string(),
            max_body_bytes: config.max_body_bytes,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: SimulationEndpoint, run_id: &str) -> String {
        format!("{}{}", self.base_url, endpoint.downstream_path(run_id))
    }

    /// Issue the GET and validate the reply body. Any status code counts as
    /// a reply; only transport and parse problems are errors.
    pub async fn fetch(
        &self,
        endpoint: SimulationEndpoint,
        run_id: &str,
    ) -> Result<EngineReply, ProxyError> {
        let url = self.url_for(endpoint, run_id);
        debug!(%url, "forwarding to simulation engine");

        let mut response = self.client.get(&url).send().await?;
        let status = response.status();

        if let Some(len) = response.content_length() {
            if len > self.max_body_bytes as u64 {
                return Err(ProxyError::BodyTooLarge {
                    limit: self.max_body_bytes,
                });
            }
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_body_bytes {
                return Err(ProxyError::BodyTooLarge {
                    limit: self.max_body_bytes,
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        let body: Box<RawValue> =
            serde_json::from_slice(&bytes).map_err(ProxyError::InvalidJson)?;

        debug!(%url, status = status.as_u16(), bytes = bytes.len(), "engine replied");
        Ok(EngineReply { status, body })
    }

    /// Probe `{base}/health`; true on any 2xx within `timeout`.
    pub async fn probe_health(&self, timeout: std::time::Duration) -> Result<bool, ProxyError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).timeout(timeout).send().await?;
        Ok(response.status().is_success())
    }
}
