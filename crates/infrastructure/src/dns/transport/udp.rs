//! DNS over UDP (RFC 1035 §4.2.1).
//!
//! Messages are sent as-is, one datagram each way. Truncated responses are
//! returned unchanged; there is no TCP retry.

use super::DnsExchange;
use crate::dns::forwarding::MessageBuilder;
use async_trait::async_trait;
use hickory_proto::op::Message;
use hoopoe_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

#[derive(Debug, Default, Clone, Copy)]
pub struct UdpExchange;

impl UdpExchange {
    pub fn new() -> Self {
        Self
    }

    async fn resolve(server: &str) -> Result<SocketAddr, DomainError> {
        if let Ok(addr) = server.parse::<SocketAddr>() {
            return Ok(addr);
        }

        tokio::net::lookup_host(server)
            .await
            .map_err(|e| DomainError::InvalidUpstreamAddress(format!("{}: {}", server, e)))?
            .next()
            .ok_or_else(|| {
                DomainError::InvalidUpstreamAddress(format!("{}: no address found", server))
            })
    }

    fn bind_addr(server_addr: &SocketAddr) -> SocketAddr {
        let ip = if server_addr.is_ipv4() {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            IpAddr::V6(Ipv6Addr::UNSPECIFIED)
        };
        SocketAddr::new(ip, 0)
    }
}

#[async_trait]
impl DnsExchange for UdpExchange {
    async fn exchange(
        &self,
        request: &Message,
        server: &str,
        timeout: Duration,
    ) -> Result<Message, DomainError> {
        let deadline = Instant::now() + timeout;
        let timed_out = || DomainError::TransportTimeout {
            server: server.to_string(),
        };
        let io_error = |e: std::io::Error| DomainError::TransportError {
            server: server.to_string(),
            message: e.to_string(),
        };

        let server_addr = tokio::time::timeout_at(deadline, Self::resolve(server))
            .await
            .map_err(|_| timed_out())??;
        let bytes = MessageBuilder::serialize(request)?;

        // Bind to ephemeral port (0 = OS assigns)
        let socket = UdpSocket::bind(Self::bind_addr(&server_addr))
            .await
            .map_err(io_error)?;
        socket.connect(server_addr).await.map_err(io_error)?;

        let bytes_sent = tokio::time::timeout_at(deadline, socket.send(&bytes))
            .await
            .map_err(|_| timed_out())?
            .map_err(io_error)?;
        debug!(server = %server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        loop {
            let bytes_received = tokio::time::timeout_at(deadline, socket.recv(&mut recv_buf))
                .await
                .map_err(|_| timed_out())?
                .map_err(io_error)?;

            let response = match MessageBuilder::parse(&recv_buf[..bytes_received]) {
                Ok(response) => response,
                Err(e) => {
                    warn!(
                        server = %server_addr,
                        bytes_received,
                        error = %e,
                        "Discarding unparseable UDP datagram"
                    );
                    continue;
                }
            };
            if response.id() == request.id() {
                debug!(server = %server_addr, bytes_received, "UDP response received");
                return Ok(response);
            }

            // Late answer to an earlier query on a reused port.
            warn!(
                server = %server_addr,
                expected_id = request.id(),
                received_id = response.id(),
                "Discarding UDP response with mismatched id"
            );
        }
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
