use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::Path;

use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::identity::IdentityConfig;
use super::logging::LoggingConfig;
use super::policy::PolicyConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;
use crate::{ClientIdentity, UserId};

const LOCAL_CONFIG_PATH: &str = "sentinel-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/sentinel-dns/config.toml";

/// Main configuration structure for Sentinel DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (ports, bind address, TLS)
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolver allowed queries are forwarded to
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Sinkhole and TTL rewriting behaviour
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Client network to user attribution for plain DNS
    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rule store
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. sentinel-dns.toml in current directory
    /// 3. /etc/sentinel-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(port) = overrides.web_port {
            self.server.web_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(db) = overrides.database_path {
            self.database.path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.web_port == 0 {
            return Err(ConfigError::Validation("Web port cannot be 0".to_string()));
        }

        self.bind_ip()?;

        if let Some(tls) = &self.server.tls {
            if tls.cert_path.is_empty() || tls.key_path.is_empty() {
                return Err(ConfigError::Validation(
                    "TLS requires both cert_path and key_path".to_string(),
                ));
            }
        }

        if self.upstream.servers.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        self.upstream_addrs()?;

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }

        self.sinkhole_ipv4()?;
        self.sinkhole_ipv6()?;

        for client in &self.identity.clients {
            ClientIdentity::validate_subnet(&client.subnet).map_err(ConfigError::Validation)?;
            UserId::validate(&client.user_id).map_err(ConfigError::Validation)?;
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "Database max_connections cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_ip(&self) -> Result<IpAddr, ConfigError> {
        self.server.bind_address.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Invalid bind address '{}'",
                self.server.bind_address
            ))
        })
    }

    /// Listen address of the classic DNS server (UDP and TCP).
    pub fn dns_addr(&self) -> Result<SocketAddr, ConfigError> {
        Ok(SocketAddr::new(self.bind_ip()?, self.server.dns_port))
    }

    /// Listen address of the DoH and management server.
    pub fn web_addr(&self) -> Result<SocketAddr, ConfigError> {
        Ok(SocketAddr::new(self.bind_ip()?, self.server.web_port))
    }

    pub fn upstream_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.upstream
            .servers
            .iter()
            .map(|server| {
                server.parse::<SocketAddr>().map_err(|e| {
                    ConfigError::Validation(format!("Invalid upstream server '{}': {}", server, e))
                })
            })
            .collect()
    }

    pub fn sinkhole_ipv4(&self) -> Result<Ipv4Addr, ConfigError> {
        self.policy.sinkhole_ipv4.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid sinkhole_ipv4 '{}': {}",
                self.policy.sinkhole_ipv4, e
            ))
        })
    }

    pub fn sinkhole_ipv6(&self) -> Result<Ipv6Addr, ConfigError> {
        self.policy.sinkhole_ipv6.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid sinkhole_ipv6 '{}': {}",
                self.policy.sinkhole_ipv6, e
            ))
        })
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub web_port: Option<u16>,
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub log_level: Option<String>,
}
