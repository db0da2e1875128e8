mod rule_evaluator;
mod upstream_forwarder;
mod upstream_telemetry;

pub use rule_evaluator::{RuleEvaluator, RuleVerdict};
pub use upstream_forwarder::UpstreamForwarder;
pub use upstream_telemetry::{
    NoopTelemetry, TelemetrySample, UpstreamTelemetry, REQUEST_COUNT_METRIC, REQUEST_FAILED_METRIC,
};

// Re-export for convenience
pub use hoopoe_domain::DnsQuery;
