mod counters;

pub use counters::CounterTelemetry;
