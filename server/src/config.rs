//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}: expected 1-65535")]
    InvalidPort(String),

    #[error("invalid HOST {0:?}: expected an IP address")]
    InvalidHost(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `HOST`: default `0.0.0.0`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is set but does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT").map(|raw| raw.trim().to_owned()) {
            None => DEFAULT_PORT,
            Some(raw) if raw.is_empty() => DEFAULT_PORT,
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
        };
        let host = match lookup("HOST").map(|raw| raw.trim().to_owned()) {
            None => DEFAULT_HOST,
            Some(raw) if raw.is_empty() => DEFAULT_HOST,
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidHost(raw))?,
        };
        Ok(Self { host, port })
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
