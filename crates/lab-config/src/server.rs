//! HTTP server configuration.

use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_host() -> String {
    String::from("127.0.0.1")
}

const fn default_port() -> u16 {
    3000
}

/// Default request body cap: 64 KiB is far more than any single statement needs.
const fn default_body_limit_bytes() -> usize {
    64 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to bind (IP literal).
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body size, in bytes.
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

impl ServerConfig {
    /// Resolve `host:port` into a bindable socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `host` is not an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| ConfigError::invalid("server.host", format!("{e}")))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::invalid("server.port", "must be non-zero"));
        }
        if self.body_limit_bytes == 0 {
            return Err(ConfigError::invalid(
                "server.body_limit_bytes",
                "must be greater than zero",
            ));
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.body_limit_bytes, 65_536);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn socket_addr_joins_host_and_port() {
        let config = ServerConfig {
            host: "0.0.0.0".into(),
            port: 8080,
            ..ServerConfig::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn hostname_is_rejected() {
        let config = ServerConfig {
            host: "localhost".into(),
            ..ServerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.host"
        ));
    }

    #[test]
    fn zero_port_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
