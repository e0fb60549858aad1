// ────────────────────────────────
// src/proxy/proxy.rs
// Forward-and-relay for the simulation status/result endpoints
// ────────────────────────────────

use hyper::{Body, Response, StatusCode};
use std::sync::Arc;
use tracing::error;

use super::endpoint::SimulationEndpoint;
use super::engine::EngineClient;
use super::error::ErrorEnvelope;
use super::response::json_response;
use crate::metrics::{MetricsCollector, Timer};

pub struct SimulationProxy {
    engine: EngineClient,
    metrics: Arc<MetricsCollector>,
}

impl SimulationProxy {
    pub fn new(engine: EngineClient, metrics: Arc<MetricsCollector>) -> Self {
        Self { engine, metrics }
    }

    pub async fn status(&self, run_id: &str) -> Response<Body> {
        self.handle(SimulationEndpoint::Status, run_id).await
    }

    pub async fn result(&self, run_id: &str) -> Response<Body> {
        self.handle(SimulationEndpoint::Result, run_id).await
    }

    /// Relay the engine's status and body, or answer 500 with an
    /// [`ErrorEnvelope`] if no well-formed reply could be obtained.
    pub async fn handle(&self, endpoint: SimulationEndpoint, run_id: &str) -> Response<Body> {
        let timer = Timer::new();
        let outcome = self.engine.fetch(endpoint, run_id).await;
        self.metrics
            .record_engine_request(endpoint.name(), outcome.is_ok(), timer.elapsed());

        match outcome {
            Ok(reply) => json_response(reply.status, reply.body.get().to_owned()),
            Err(err) => {
                let message = err.message();
                error!(
                    %endpoint,
                    run_id,
                    error = %message,
                    "{}",
                    endpoint.error_label()
                );
                ErrorEnvelope::new(endpoint.error_label(), message)
                    .into_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
