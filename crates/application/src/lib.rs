//! Hoopoe Application Layer
pub mod engine_query;
pub mod ports;
pub mod use_cases;

pub use engine_query::EngineQuery;
