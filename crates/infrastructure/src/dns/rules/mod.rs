pub mod compiler;
pub mod engine;

pub use compiler::{compile_rules, ProxyRule};
pub use engine::RuleEngine;
