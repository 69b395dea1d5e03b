use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

const HOST_VAR: &str = "VALIDATOR_HOST";
const PORT_VAR: &str = "VALIDATOR_PORT";
const LOG_VAR: &str = "VALIDATOR_LOG";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an IP address, got {value:?}")]
    InvalidHost { var: &'static str, value: String },

    #[error("{var} must be a port number between 0 and 65535, got {value:?}")]
    InvalidPort { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = match lookup(HOST_VAR) {
            Some(value) => value.trim().parse::<IpAddr>().map_err(|_| ConfigError::InvalidHost {
                var: HOST_VAR,
                value,
            })?,
            None => defaults.bind_addr.ip(),
        };

        let port = match lookup(PORT_VAR) {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                var: PORT_VAR,
                value,
            })?,
            None => defaults.bind_addr.port(),
        };

        let log_filter = lookup(LOG_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            log_filter,
        })
    }
}
