//! Hoopoe infrastructure: rule engine, upstream forwarding and UDP plumbing.
pub mod dns;
