// src/health/checker.rs
use chrono::{DateTime, Utc};
use hyper::{Body, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::proxy::{json_response, EngineClient};

pub const SERVICE_NAME: &str = "Simulation API Gateway";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Online,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    Online,
    Offline,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub service: &'static str,
    pub status: HealthStatus,
    pub engine: EngineStatus,
    pub time: DateTime<Utc>,
}

impl HealthReport {
    pub fn into_response(self) -> Response<Body> {
        match serde_json::to_vec(&self) {
            Ok(body) => json_response(StatusCode::OK, body),
            Err(e) => {
                warn!(%e, "failed to encode health report");
                json_response(StatusCode::OK, r#"{"status":"online"}"#)
            }
        }
    }
}

/// On-demand probe of the engine's own health endpoint.
#[derive(Debug, Clone)]
pub struct HealthChecker {
    engine: EngineClient,
    timeout: Duration,
}

impl HealthChecker {
    pub fn new(engine: EngineClient, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    pub async fn check(&self) -> HealthReport {
        let engine = match self.engine.probe_health(self.timeout).await {
            Ok(true) => EngineStatus::Online,
            Ok(false) => {
                warn!(engine = self.engine.base_url(), "simulation engine reported unhealthy");
                EngineStatus::Offline
            }
            Err(e) => {
                warn!(
                    engine = self.engine.base_url(),
                    error = %e.message(),
                    "simulation engine unreachable"
                );
                EngineStatus::Offline
            }
        };

        let status = match engine {
            EngineStatus::Online => HealthStatus::Online,
            EngineStatus::Offline => HealthStatus::Degraded,
        };
        debug!(?status, "health check complete");

        HealthReport {
            service: SERVICE_NAME,
            status,
            engine,
            time: Utc::now(),
        }
    }
}
