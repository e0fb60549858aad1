// src/config/models.rs
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENGINE_URL: &str = "http://localhost:8081";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub engine: EngineConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

/// Where the simulation engine lives and how far we trust it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub base_url: String,
    /// Bound on a single outbound call. `0` leaves it unbounded.
    pub timeout_secs: u64,
    pub health_timeout_secs: u64,
    pub max_body_bytes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ENGINE_URL.to_string(),
            timeout_secs: 30,
            health_timeout_secs: 2,
            max_body_bytes: 10 * 1024 * 1024,
        }
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs.max(1))
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub port: u16,
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 9090,
            path: "/metrics".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid engine base URL {url:?}: {reason}")]
    InvalidEngineUrl { url: String, reason: String },

    #[error("engine.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,

    #[error("metrics.path must start with '/', got {0:?}")]
    InvalidMetricsPath(String),

    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.engine.base_url).map_err(|e| ConfigError::InvalidEngineUrl {
            url: self.engine.base_url.clone(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEngineUrl {
                url: self.engine.base_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        if self.engine.max_body_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }

        if !self.metrics.path.starts_with('/') {
            return Err(ConfigError::InvalidMetricsPath(self.metrics.path.clone()));
        }

        Ok(())
    }

    /// Apply `SIM_ENGINE_URL` and `PORT` from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(
            std::env::var("SIM_ENGINE_URL").ok(),
            std::env::var("PORT").ok(),
        )
    }

    pub fn apply_overrides(
        &mut self,
        engine_url: Option<String>,
        port: Option<String>,
    ) -> Result<(), ConfigError> {
        self.engine.base_url = resolve_engine_base(engine_url, &self.engine.base_url);

        if let Some(port) = port.filter(|v| !v.is_empty()) {
            let port: u16 = port.parse().map_err(|_| ConfigError::InvalidPort(port.clone()))?;
            self.server.listen_addr.set_port(port);
        }

        Ok(())
    }
}

/// Pick the engine base URL from an optional override, falling back to
/// `configured` (the local engine unless a config file said otherwise).
/// An empty override counts as absent. Never fails.
pub fn resolve_engine_base(override_url: Option<String>, configured: &str) -> String {
    override_url
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| configured.to_string())
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_engine() {
        let config = Config::default();
        assert_eq!(config.engine.base_url, DEFAULT_ENGINE_URL);
        assert_eq!(config.server.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(config.engine.timeout(), Some(Duration::from_secs(30)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn resolve_engine_base_prefers_override() {
        assert_eq!(resolve_engine_base(None, DEFAULT_ENGINE_URL), DEFAULT_ENGINE_URL);
        assert_eq!(
            resolve_engine_base(Some(String::new()), DEFAULT_ENGINE_URL),
            DEFAULT_ENGINE_URL
        );
        assert_eq!(
            resolve_engine_base(Some("http://engine:9000".into()), DEFAULT_ENGINE_URL),
            "http://engine:9000"
        );
    }

    #[test]
    fn overrides_replace_url_and_port() {
        let mut config = Config::default();
        config
            .apply_overrides(Some("http://sim:7000/".into()), Some("3001".into()))
            .unwrap();

        assert_eq!(config.engine.base_url, "http://sim:7000/");
        assert_eq!(config.engine.base(), "http://sim:7000");
        assert_eq!(config.server.listen_addr.port(), 3001);
    }

    #[test]
    fn absent_override_keeps_file_value() {
        let mut config: Config =
            serde_yaml::from_str("engine:\n  base_url: http://from-file:8081\n").unwrap();
        config.apply_overrides(None, None).unwrap();
        assert_eq!(config.engine.base_url, "http://from-file:8081");

        config
            .apply_overrides(Some("http://from-env:8081".into()), None)
            .unwrap();
        assert_eq!(config.engine.base_url, "http://from-env:8081");
    }

    #[test]
    fn empty_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(Some(String::new()), None).unwrap();
        assert_eq!(config.engine.base_url, DEFAULT_ENGINE_URL);
    }

    #[test]
    fn bad_port_is_rejected() {
        let mut config = Config::default();
        let err = config.apply_overrides(None, Some("eighty".into())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }

    #[test]
    fn validate_rejects_non_http_engine() {
        let mut config = Config::default();
        config.engine.base_url = "ftp://engine".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEngineUrl { .. })
        ));

        config.engine.base_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_means_unbounded() {
        let mut config = Config::default();
        config.engine.timeout_secs = 0;
        assert_eq!(config.engine.timeout(), None);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str("engine:\n  base_url: http://sim:8081\n").unwrap();
        assert_eq!(config.engine.base_url, "http://sim:8081");
        assert_eq!(config.engine.timeout_secs, 30);
        assert!(config.metrics.enabled);
    }
}
