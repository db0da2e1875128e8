pub mod telemetry_report;

pub use telemetry_report::TelemetryReportJob;
