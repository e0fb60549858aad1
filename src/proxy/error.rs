// ────────────────────────────────
// src/proxy/error.rs
// Forwarding failures and the JSON envelope they are reported in.
// ────────────────────────────────

use hyper::{Body, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::error::Error as _;

use super::response::json_response;

pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Anything that stops us from obtaining a well-formed engine reply.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("Request to simulation engine timed out")]
    Timeout,

    #[error("Invalid JSON from simulation engine: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Simulation engine response exceeded {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::Timeout
        } else {
            ProxyError::Transport(err)
        }
    }
}

impl ProxyError {
    /// Human-readable cause, including the low-level chain for transport
    /// errors. Falls back to [`UNKNOWN_ERROR`] when nothing is available.
    pub fn message(&self) -> String {
        let mut message = self.to_string();

        if let ProxyError::Transport(err) = self {
            let mut source = err.source();
            while let Some(cause) = source {
                let text = cause.to_string();
                if !text.is_empty() && !message.contains(&text) {
                    message.push_str(": ");
                    message.push_str(&text);
                }
                source = cause.source();
            }
        }

        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}

/// `{ "error": ..., "message": ... }`, synthesized only when forwarding fails
/// or the inbound request cannot be routed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            error: error.into(),
            message: if message.trim().is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                message
            },
        }
    }

    pub fn into_response(self, status: StatusCode) -> Response<Body> {
        let body = serde_json::to_vec(&self).unwrap_or_else(|_| {
            br#"{"error":"Internal Server Error","message":"Unknown error"}"#.to_vec()
        });
        json_response(status, body)
    }
}
