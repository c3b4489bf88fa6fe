//! Server configuration from the environment

use std::net::SocketAddr;

use tracing::warn;

pub const BIND_ADDR_VAR: &str = "CHESS_BIND_ADDR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(BIND_ADDR_VAR).ok().as_deref())
    }

    /// Unparseable addresses fall back to the default.
    fn from_value(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::default();
        };
        match raw.trim().parse() {
            Ok(bind_addr) => Self { bind_addr },
            Err(err) => {
                warn!(value = raw, %err, "invalid {}, using default", BIND_ADDR_VAR);
                Self::default()
            }
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_address() {
        assert_eq!(ServerConfig::from_value(None).bind_addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_custom_address() {
        let config = ServerConfig::from_value(Some("0.0.0.0:8080"));
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn test_invalid_address_falls_back() {
        assert_eq!(ServerConfig::from_value(Some("not an address")), ServerConfig::default());
    }
}
