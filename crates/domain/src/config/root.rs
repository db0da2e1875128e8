use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::proxy::ProxyConfig;
use super::server::ServerConfig;
use super::telemetry::TelemetryConfig;
use super::upstream::UpstreamConfig;
use crate::client_region::RegionMatcher;
use crate::upstream_server::UpstreamServer;

/// Main configuration structure for Hoopoe
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (address, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Rule evaluation configuration
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Upstream servers and forwarding policy
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Per-upstream request counters
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. hoopoe.toml in current directory
    /// 3. /etc/hoopoe/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.normalize_upstreams();
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(address) = overrides.address {
            self.server.address = address;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.scan_all {
            self.proxy.scan_all = true;
        }
        if overrides.enable_stats {
            self.telemetry.enabled = true;
        }
    }

    /// Normalize upstream configuration
    ///
    /// If no server list is defined but a remote address exists, forward to
    /// that single server.
    pub fn normalize_upstreams(&mut self) {
        if !self.upstream.servers.is_empty() {
            return;
        }
        if let Some(remote) = self.upstream.remote_address.as_deref() {
            let address = if remote.contains(':') && !remote.starts_with('[') {
                format!("[{}]:{}", remote, self.upstream.remote_port)
            } else {
                format!("{}:{}", remote, self.upstream.remote_port)
            };
            self.upstream.servers.push(UpstreamServer::new(address));
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.upstream.servers.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        for server in &self.upstream.servers {
            if server.address.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Upstream server address cannot be empty".to_string(),
                ));
            }
        }

        if self.upstream.timeout()?.is_zero() {
            return Err(ConfigError::Validation(
                "Upstream timeout must be greater than zero".to_string(),
            ));
        }
        if self.upstream.exchange_timeout()?.is_zero() {
            return Err(ConfigError::Validation(
                "Upstream exchange timeout must be greater than zero".to_string(),
            ));
        }

        for (index, rule) in self.proxy.rules.iter().enumerate() {
            if rule.pattern.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Rule #{} ({}) has an empty pattern",
                    index, rule.rule_type
                )));
            }
        }

        RegionMatcher::new(&self.proxy.client_regions).map_err(ConfigError::Validation)?;

        if self.telemetry.enabled && self.telemetry.report_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "Telemetry report interval cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("hoopoe.toml").exists() {
            Some("hoopoe.toml".to_string())
        } else if std::path::Path::new("/etc/hoopoe/config.toml").exists() {
            Some("/etc/hoopoe/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub address: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub scan_all: bool,
    pub enable_stats: bool,
}
