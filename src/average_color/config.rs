use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::application::error::ApplicationError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub fetch_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

fn parse_var<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, ApplicationError> {
    match value {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ApplicationError::ConfigurationError(format!("{} has invalid value {:?}", key, raw))),
    }
}

impl Config {
    /// Reads `HOST`, `PORT` and `FETCH_TIMEOUT_SECS` from the process environment.
    pub fn from_env() -> Result<Self, ApplicationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApplicationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_var("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let timeout_secs = parse_var("FETCH_TIMEOUT_SECS", lookup("FETCH_TIMEOUT_SECS"), DEFAULT_FETCH_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ApplicationError::ConfigurationError(
                "FETCH_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            fetch_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ApplicationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ApplicationError::ConfigurationError(format!("invalid listen address: {}", e)))
    }
}
