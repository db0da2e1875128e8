//! Hoopoe Domain Layer
pub mod client_region;
pub mod config;
pub mod dns_query;
pub mod errors;
pub mod record_type;
pub mod request_metadata;
pub mod rule;
pub mod upstream_server;

pub use client_region::{ClientRegion, RegionMatcher};
pub use config::{
    parse_duration, CliOverrides, Config, ConfigError, LoadBalancing, LoggingConfig,
    ProxyConfig, ProxyRuleConfig, ServerConfig, TelemetryConfig, UpstreamConfig,
};
pub use dns_query::DnsQuery;
pub use errors::DomainError;
pub use record_type::RecordType;
pub use request_metadata::RequestMetadata;
pub use rule::{QueryDecision, RuleType};
pub use upstream_server::{UpstreamServer, ALL_GROUP_NAME, REGION_ANNOTATION};
