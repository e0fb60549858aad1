// src/server/handler.rs
use hyper::header::HeaderValue;
use hyper::{Body, Request, Response, StatusCode};
use std::sync::Arc;
use tower::Service;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::router::Route;
use crate::config::EngineConfig;
use crate::health::HealthChecker;
use crate::metrics::{MetricsCollector, Timer};
use crate::proxy::{EngineClient, ErrorEnvelope, ProxyError, SimulationEndpoint, SimulationProxy};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct RequestHandler {
    proxy: Arc<SimulationProxy>,
    health: Arc<HealthChecker>,
    metrics: Arc<MetricsCollector>,
}

impl RequestHandler {
    pub fn new(
        proxy: Arc<SimulationProxy>,
        health: Arc<HealthChecker>,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            proxy,
            health,
            metrics,
        }
    }

    /// Wire the engine client, proxy and health checker from configuration.
    pub fn from_config(
        config: &EngineConfig,
        metrics: Arc<MetricsCollector>,
    ) -> Result<Self, ProxyError> {
        let engine = EngineClient::new(config)?;
        let health = HealthChecker::new(engine.clone(), config.health_timeout());
        let proxy = SimulationProxy::new(engine, metrics.clone());

        Ok(Self::new(Arc::new(proxy), Arc::new(health), metrics))
    }

    async fn dispatch(&self, route: &Route) -> Response<Body> {
        match route {
            Route::Simulation { endpoint, run_id } => match endpoint {
                SimulationEndpoint::Status => self.proxy.status(run_id).await,
                SimulationEndpoint::Result => self.proxy.result(run_id).await,
            },
            Route::Health => self.health.check().await.into_response(),
            Route::MissingRunId => ErrorEnvelope::new(
                "Simulation ID is required",
                "Request path is missing a simulation run identifier",
            )
            .into_response(StatusCode::BAD_REQUEST),
            Route::InvalidRunId => ErrorEnvelope::new(
                "Invalid simulation ID",
                "Simulation ID must not be a '.' or '..' path segment",
            )
            .into_response(StatusCode::BAD_REQUEST),
            Route::MethodNotAllowed => {
                ErrorEnvelope::new("Method not allowed", "Only GET is supported on this path")
                    .into_response(StatusCode::METHOD_NOT_ALLOWED)
            }
            Route::NotFound => ErrorEnvelope::new("Not found", "No route matches this path")
                .into_response(StatusCode::NOT_FOUND),
        }
    }
}

impl Service<Request<Body>> for RequestHandler {
    type Response = Response<Body>;
    type Error = Box<dyn std::error::Error + Send + Sync>;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let handler = self.clone();
        let request_id = Uuid::new_v4();
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let span = info_span!("request", %request_id, %method, %path);

        Box::pin(
            async move {
                let timer = Timer::new();
                let route = Route::resolve(&method, &path);

                let mut response = handler.dispatch(&route).await;
                if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }

                let elapsed = timer.elapsed();
                let status = response.status().as_u16();
                handler
                    .metrics
                    .record_request(route.name(), status, elapsed);
                info!(
                    route = route.name(),
                    status,
                    duration_ms = elapsed.as_millis() as u64,
                    "HTTP request"
                );

                Ok::<_, Box<dyn std::error::Error + Send + Sync>>(response)
            }
            .instrument(span),
        )
    }
}
