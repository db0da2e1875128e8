use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Seconds between counter snapshots written to the log.
    #[serde(default = "default_report_interval_secs")]
    pub report_interval_secs: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            report_interval_secs: default_report_interval_secs(),
        }
    }
}

fn default_report_interval_secs() -> u64 {
    60
}
