use hoopoe_application::ports::UpstreamTelemetry;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

const DEFAULT_REPORT_INTERVAL_SECS: u64 = 60;

/// Periodically logs the per-upstream request counters.
///
/// The first tick is consumed immediately so nothing is reported before any
/// traffic had a chance to arrive.
pub struct TelemetryReportJob {
    telemetry: Arc<dyn UpstreamTelemetry>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl TelemetryReportJob {
    pub fn new(telemetry: Arc<dyn UpstreamTelemetry>) -> Self {
        Self {
            telemetry,
            interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Log one line per counter. Returns how many lines were written.
    pub fn report(&self) -> usize {
        let samples = self.telemetry.snapshot();
        for sample in &samples {
            info!(
                metric = sample.metric,
                server = %sample.server,
                count = sample.count,
                "Upstream telemetry"
            );
        }
        samples.len()
    }

    pub async fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(
            interval_secs = self.interval_secs,
            "Starting telemetry report job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("TelemetryReportJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.report();
                    }
                }
            }
        })
    }
}
