use std::env;
use std::time::Duration;

use crate::endpoint::Endpoint;
use crate::error::ConfigError;
use crate::transport::TransportConfig;

/// Environment variable holding the comma separated list of servers to
/// monitor, in the form `host1:port1,host2:port2`.
/// e.g: `50.108.116.1:2324,50.108.116.1:2315`
pub const ENV_SERVER_LIST: &str = "SOURCEWATCH_SERVERS";

/// Optional per-query timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "SOURCEWATCH_TIMEOUT_SECS";

/// Optional poll interval, in whole seconds.
pub const ENV_INTERVAL_SECS: &str = "SOURCEWATCH_INTERVAL_SECS";

const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Runtime configuration for the monitor binary.
///
/// The library core never touches the environment; this is the one place
/// that reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub servers: Vec<Endpoint>,
    pub transport: TransportConfig,
    pub interval: Duration,
}

impl Config {
    /// Reads the configuration from the process environment. The server
    /// list is required; timeout and interval fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let list = env::var(ENV_SERVER_LIST)
            .map_err(|_| ConfigError::MissingServerList(ENV_SERVER_LIST))?;
        let servers = parse_server_list(&list)?;

        let transport = TransportConfig {
            timeout_secs: env::var(ENV_TIMEOUT_SECS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(TransportConfig::default().timeout_secs),
        };

        let interval = Duration::from_secs(
            env::var(ENV_INTERVAL_SECS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_INTERVAL_SECS),
        );

        Ok(Config {
            servers,
            transport,
            interval,
        })
    }
}

/// Parses a comma separated `host:port` list into endpoints.
pub fn parse_server_list(list: &str) -> Result<Vec<Endpoint>, ConfigError> {
    if list.trim().is_empty() {
        return Err(ConfigError::EmptyServerList(ENV_SERVER_LIST));
    }

    list.split(',')
        .map(|entry| {
            let entry = entry.trim();
            entry
                .parse()
                .map_err(|source| ConfigError::InvalidEndpoint {
                    endpoint: entry.to_owned(),
                    source,
                })
        })
        .collect()
}
