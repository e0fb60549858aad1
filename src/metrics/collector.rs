// src/metrics/collector.rs
use anyhow::Result;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Instant;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    pub fn gather(&self) -> Vec<u8> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!(%e, "failed to encode metrics");
        }
        buffer
    }
}

pub struct MetricsCollector {
    // Inbound
    pub requests_total: IntCounterVec,
    pub request_duration_seconds: HistogramVec,
    pub active_connections: IntGauge,

    // Engine
    pub engine_requests_total: IntCounterVec,
    pub engine_request_duration_seconds: HistogramVec,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let requests_total = IntCounterVec::new(
            Opts::new("gateway_requests_total", "Total number of inbound requests"),
            &["route", "status_code"],
        )?;
        registry.register(Box::new(requests_total.clone()))?;

        let request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "gateway_request_duration_seconds",
                "Inbound request duration in seconds",
            ),
            &["route"],
        )?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        let active_connections =
            IntGauge::new("gateway_active_connections", "Open client connections")?;
        registry.register(Box::new(active_connections.clone()))?;

        let engine_requests_total = IntCounterVec::new(
            Opts::new(
                "gateway_engine_requests_total",
                "Requests forwarded to the simulation engine",
            ),
            &["endpoint", "outcome"],
        )?;
        registry.register(Box::new(engine_requests_total.clone()))?;

        let engine_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "gateway_engine_request_duration_seconds",
                "Simulation engine round trip in seconds",
            ),
            &["endpoint"],
        )?;
        registry.register(Box::new(engine_request_duration_seconds.clone()))?;

        Ok(Self {
            requests_total,
            request_duration_seconds,
            active_connections,
            engine_requests_total,
            engine_request_duration_seconds,
        })
    }

    /// Collector on a private registry, for tests and embedding.
    pub fn detached() -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new(&Registry::new())?))
    }

    pub fn record_request(&self, route: &str, status_code: u16, duration: std::time::Duration) {
        let status = status_code.to_string();
        self.requests_total
            .with_label_values(&[route, &status])
            .inc();

        self.request_duration_seconds
            .with_label_values(&[route])
            .observe(duration.as_secs_f64());
    }

    pub fn record_engine_request(
        &self,
        endpoint: &str,
        relayed: bool,
        duration: std::time::Duration,
    ) {
        let outcome = if relayed { "relayed" } else { "failed" };
        self.engine_requests_total
            .with_label_values(&[endpoint, outcome])
            .inc();

        self.engine_request_duration_seconds
            .with_label_values(&[endpoint])
            .observe(duration.as_secs_f64());
    }

    pub fn increment_active_connections(&self) {
        self.active_connections.inc();
    }

    pub fn decrement_active_connections(&self) {
        self.active_connections.dec();
    }
}

// Helper for timing operations
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
