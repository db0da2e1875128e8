pub mod forwarding;
pub mod load_balancer;
pub mod rules;
pub mod server;
pub mod telemetry;
pub mod transport;

pub use forwarding::{MessageBuilder, ResponseRewriter};
pub use load_balancer::{IndexRoundRobin, RegionMap, ServersView, UpstreamsManager};
pub use rules::{ProxyRule, RuleEngine};
pub use server::DnsServerHandler;
pub use telemetry::CounterTelemetry;
pub use transport::{DnsExchange, UdpExchange};
