pub mod duration;
pub mod errors;
pub mod logging;
pub mod proxy;
pub mod root;
pub mod server;
pub mod telemetry;
pub mod upstream;

pub use duration::parse_duration;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use proxy::{ProxyConfig, ProxyRuleConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use telemetry::TelemetryConfig;
pub use upstream::{LoadBalancing, UpstreamConfig};
