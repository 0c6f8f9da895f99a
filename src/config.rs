use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub database_url: String,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = match lookup("BIND_ADDR") {
            Some(v) => v
                .parse()
                .with_context(|| format!("BIND_ADDR must be an IP address, got '{v}'"))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = match lookup("PORT") {
            Some(v) => v
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got '{v}'"))?,
            None => 8000,
        };
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite:database.db?mode=rwc".to_string());

        Ok(Self {
            bind_addr,
            port,
            database_url,
        })
    }

    /// Socket address the HTTP server listens on.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.database_url, "sqlite:database.db?mode=rwc");
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9100"),
            ("BIND_ADDR", "127.0.0.1"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:9100");
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_invalid_port_is_error() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
