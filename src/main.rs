// src/main.rs
use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

use sim_gateway::{
    config,
    metrics::{start_metrics_server, MetricsRegistry},
    server::{RequestHandler, ServerBuilder},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sim_gateway=debug".parse()?)
                .add_directive("hyper=info".parse()?),
        )
        .init();

    // Optional config file, environment always wins
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    match &config_path {
        Some(path) => info!("Loading configuration from: {}", path.display()),
        None => info!("No configuration file given, using defaults"),
    }
    let config = config::resolve_config(config_path.as_deref()).await?;
    info!(engine = %config.engine.base_url, "Simulation engine base URL resolved");
    if config.engine.timeout().is_none() {
        warn!("Outbound engine timeout disabled; requests may block indefinitely");
    }

    // Initialize metrics
    let metrics_registry = Arc::new(MetricsRegistry::new()?);
    let metrics = metrics_registry.collector();

    if config.metrics.enabled {
        let metrics_addr: SocketAddr = ([0, 0, 0, 0], config.metrics.port).into();
        start_metrics_server(metrics_addr, metrics_registry.clone(), config.metrics.path.clone())
            .await?;
    }

    let handler = RequestHandler::from_config(&config.engine, metrics.clone())?;

    info!("Starting simulation gateway on {}", config.server.listen_addr);

    ServerBuilder::new(config.server.listen_addr)
        .with_handler(handler)
        .with_metrics(metrics)
        .serve_with_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
