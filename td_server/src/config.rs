//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::{net::SocketAddr, time::Duration};
use tournament_directory::LatencyProfile;

/// Default bind address
pub const DEFAULT_BIND: &str = "127.0.0.1:6969";

/// Upper bound for any simulated latency
pub const MAX_SIMULATED_LATENCY_MS: u64 = 60_000;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Seed the directory with the demo sites, tournaments and leaderboards
    pub seed_demo_data: bool,
    /// Simulated backend latency (`None` answers immediately)
    pub latency: Option<LatencyProfile>,
    /// Per-request timeout in seconds (0 disables)
    pub request_timeout_secs: u64,
    /// Prometheus listener address
    pub metrics_bind: Option<SocketAddr>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `seed_demo_flag` - `--seed-demo` was passed
    /// * `latency_flag` - `--latency` was passed
    ///
    /// # Errors
    ///
    /// Returns error if an address variable cannot be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        seed_demo_flag: bool,
        latency_flag: bool,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_addr("SERVER_BIND")?
                .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 6969))),
        };

        let seed_demo_data = seed_demo_flag || parse_env_or("SEED_DEMO_DATA", false);

        let latency = if latency_flag || parse_env_or("SIMULATE_LATENCY", false) {
            Some(LatencyProfile::from_env())
        } else {
            None
        };

        Ok(ServerConfig {
            bind,
            seed_demo_data,
            latency,
            request_timeout_secs: parse_env_or("REQUEST_TIMEOUT_SECS", 30),
            metrics_bind: parse_addr("METRICS_BIND")?,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(profile) = &self.latency else {
            return Ok(());
        };

        let max_delay = profile.max_delay();
        if max_delay > Duration::from_millis(MAX_SIMULATED_LATENCY_MS) {
            return Err(ConfigError::Invalid {
                var: "LATENCY_*_MS".to_string(),
                reason: format!("Must be at most {MAX_SIMULATED_LATENCY_MS} ms"),
            });
        }

        if let Some(timeout) = self.request_timeout() {
            if timeout <= max_delay {
                return Err(ConfigError::Invalid {
                    var: "REQUEST_TIMEOUT_SECS".to_string(),
                    reason: format!(
                        "Must be longer than the largest simulated latency ({} ms)",
                        max_delay.as_millis()
                    ),
                });
            }
        }

        Ok(())
    }

    /// Request timeout, if enabled
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Optional socket address; set but unparsable is an error
fn parse_addr(key: &str) -> Result<Option<SocketAddr>, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::Invalid {
                    var: key.to_string(),
                    reason: format!("'{value}' is not an IP:PORT address"),
                })
        }
        _ => Ok(None),
    }
}
