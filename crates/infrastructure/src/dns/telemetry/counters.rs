use dashmap::DashMap;
use hoopoe_application::ports::{
    TelemetrySample, UpstreamTelemetry, REQUEST_COUNT_METRIC, REQUEST_FAILED_METRIC,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// In-process per-upstream attempt counters.
#[derive(Clone, Default)]
pub struct CounterTelemetry {
    requests: Arc<DashMap<Arc<str>, AtomicU64>>,
    failures: Arc<DashMap<Arc<str>, AtomicU64>>,
}

impl CounterTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_count(&self, server: &str) -> u64 {
        Self::load(&self.requests, server)
    }

    pub fn failure_count(&self, server: &str) -> u64 {
        Self::load(&self.failures, server)
    }

    pub fn total_requests(&self) -> u64 {
        self.requests.iter().map(|e| e.value().load(Ordering::Relaxed)).sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.failures.iter().map(|e| e.value().load(Ordering::Relaxed)).sum()
    }

    fn sorted_samples(&self) -> Vec<TelemetrySample> {
        let mut samples: Vec<TelemetrySample> = Self::samples(REQUEST_COUNT_METRIC, &self.requests)
            .chain(Self::samples(REQUEST_FAILED_METRIC, &self.failures))
            .collect();
        samples.sort_by(|a, b| a.metric.cmp(b.metric).then_with(|| a.server.cmp(&b.server)));
        samples
    }

    fn samples<'a>(
        metric: &'static str,
        map: &'a DashMap<Arc<str>, AtomicU64>,
    ) -> impl Iterator<Item = TelemetrySample> + 'a {
        map.iter().map(move |entry| TelemetrySample {
            metric,
            server: Arc::clone(entry.key()),
            count: entry.value().load(Ordering::Relaxed),
        })
    }

    fn increment(map: &DashMap<Arc<str>, AtomicU64>, server: &str) {
        if let Some(counter) = map.get(server) {
            counter.fetch_add(1, Ordering::Relaxed);
            return;
        }
        map.entry(Arc::from(server))
            .or_default()
            .fetch_add(1, Ordering::Relaxed);
    }

    fn load(map: &DashMap<Arc<str>, AtomicU64>, server: &str) -> u64 {
        map.get(server)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}

impl UpstreamTelemetry for CounterTelemetry {
    fn record_request(&self, server: &str) {
        Self::increment(&self.requests, server);
    }

    fn record_failure(&self, server: &str) {
        Self::increment(&self.failures, server);
    }

    /// Current values, sorted by metric then server.
    fn snapshot(&self) -> Vec<TelemetrySample> {
        self.sorted_samples()
    }
}
