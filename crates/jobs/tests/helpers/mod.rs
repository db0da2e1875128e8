#![allow(dead_code)]
use hoopoe_application::ports::{TelemetrySample, UpstreamTelemetry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Telemetry that counts how often it was snapshotted.
#[derive(Default)]
pub struct CountingTelemetry {
    snapshots: AtomicUsize,
}

impl CountingTelemetry {
    pub fn snapshots(&self) -> usize {
        self.snapshots.load(Ordering::SeqCst)
    }
}

impl UpstreamTelemetry for CountingTelemetry {
    fn record_request(&self, _server: &str) {}

    fn record_failure(&self, _server: &str) {}

    fn snapshot(&self) -> Vec<TelemetrySample> {
        self.snapshots.fetch_add(1, Ordering::SeqCst);
        vec![TelemetrySample {
            metric: "hoopoe.request_count",
            server: Arc::from("10.0.0.1:53"),
            count: 1,
        }]
    }
}
