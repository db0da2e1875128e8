use std::sync::Arc;

pub const REQUEST_COUNT_METRIC: &str = "hoopoe.request_count";
pub const REQUEST_FAILED_METRIC: &str = "hoopoe.request_failed";

/// One counter value labelled by upstream address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetrySample {
    pub metric: &'static str,
    pub server: Arc<str>,
    pub count: u64,
}

/// Side channel for per-upstream attempt counters.
pub trait UpstreamTelemetry: Send + Sync {
    fn record_request(&self, server: &str);

    fn record_failure(&self, server: &str);

    fn snapshot(&self) -> Vec<TelemetrySample> {
        Vec::new()
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl UpstreamTelemetry for NoopTelemetry {
    #[inline]
    fn record_request(&self, _server: &str) {}

    #[inline]
    fn record_failure(&self, _server: &str) {}

    fn is_enabled(&self) -> bool {
        false
    }
}
