use hoopoe_infrastructure::dns::DnsServerHandler;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const MAX_DATAGRAM_SIZE: usize = 4096;

/// Serve DNS over UDP on `bind_addr` until `shutdown` fires.
///
/// Every datagram is handled on its own task so a slow upstream never
/// blocks the receive loop.
pub async fn start_dns_server(
    bind_addr: String,
    handler: Arc<DnsServerHandler>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = Arc::new(UdpSocket::bind(socket_addr).await?);

    info!(bind_address = %socket.local_addr()?, "DNS server ready");

    let mut recv_buf = vec![0u8; MAX_DATAGRAM_SIZE];

    loop {
        let (len, from) = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("DNS server shutting down");
                return Ok(());
            }
            result = socket.recv_from(&mut recv_buf) => match result {
                Ok(received) => received,
                Err(e) => {
                    warn!(error = %e, "Failed to receive datagram");
                    continue;
                }
            },
        };

        let query: Arc<[u8]> = Arc::from(&recv_buf[..len]);
        let handler = Arc::clone(&handler);
        let socket = Arc::clone(&socket);

        tokio::spawn(async move {
            let Some(response) = handler.handle_datagram(&query, from).await else {
                return;
            };
            if let Err(e) = socket.send_to(&response, from).await {
                debug!(client = %from, error = %e, "Failed to send response");
            }
        });
    }
}
