use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

use super::duration::parse_duration;
use super::errors::ConfigError;
use crate::upstream_server::UpstreamServer;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Single upstream used when `servers` is empty.
    #[serde(default)]
    pub remote_address: Option<String>,

    #[serde(default = "default_remote_port")]
    pub remote_port: u16,

    /// Budget for one candidate query across all attempts.
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Cap for a single exchange with one server.
    #[serde(default = "default_exchange_timeout")]
    pub exchange_timeout: String,

    #[serde(default)]
    pub load_balancing: LoadBalancing,

    #[serde(default)]
    pub servers: Vec<UpstreamServer>,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.timeout)
    }

    pub fn exchange_timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.exchange_timeout)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            remote_address: Some("8.8.8.8".to_string()),
            remote_port: default_remote_port(),
            timeout: default_timeout(),
            exchange_timeout: default_exchange_timeout(),
            load_balancing: LoadBalancing::ByOrder,
            servers: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadBalancing {
    /// Servers tried in configured order.
    #[default]
    ByOrder,

    /// Servers picked from a rotating index shared by all requests.
    RoundRobin,
}

impl LoadBalancing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ByOrder => "ByOrder",
            Self::RoundRobin => "RoundRobin",
        }
    }

    /// Anything other than a round-robin spelling selects ordered forwarding.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "roundrobin" | "round_robin" | "round-robin" | "rr" => Self::RoundRobin,
            _ => Self::ByOrder,
        }
    }
}

impl Serialize for LoadBalancing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LoadBalancing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_name(&raw))
    }
}

fn default_remote_port() -> u16 {
    53
}

fn default_timeout() -> String {
    "2s".to_string()
}

fn default_exchange_timeout() -> String {
    "2s".to_string()
}
