pub mod udp;

use async_trait::async_trait;
use hickory_proto::op::Message;
use hoopoe_domain::DomainError;
use std::time::Duration;

pub use udp::UdpExchange;

/// One request/response round trip with an upstream server.
#[async_trait]
pub trait DnsExchange: Send + Sync {
    /// Send `request` to `server` (`host:port`) and wait at most `timeout`
    /// for its response.
    async fn exchange(
        &self,
        request: &Message,
        server: &str,
        timeout: Duration,
    ) -> Result<Message, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
