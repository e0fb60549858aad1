// src/health/mod.rs
mod checker;

pub use checker::{EngineStatus, HealthChecker, HealthReport, HealthStatus, SERVICE_NAME};
