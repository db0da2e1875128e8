#![allow(dead_code)]
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Reply with a single A record for the question name.
    Answer(Ipv4Addr),
    /// Reply NOERROR with an empty answer section.
    NoAnswer,
    /// Never reply.
    Silent,
    /// Send an unparseable datagram, then answer like `Answer`.
    GarbageThenAnswer(Ipv4Addr),
}

/// Upstream resolver on a real loopback UDP socket.
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let received = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&received);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let MockBehavior::GarbageThenAnswer(_) = behavior {
                                let _ = socket.send_to(&[0xde, 0xad, 0xbe], peer).await;
                            }
                            if let Some(response) = Self::build_mock_response(&buf[..len], behavior) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    fn build_mock_response(query: &[u8], behavior: MockBehavior) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }
        let answer = match behavior {
            MockBehavior::Silent => return None,
            MockBehavior::Answer(ip) | MockBehavior::GarbageThenAnswer(ip) => Some(ip),
            MockBehavior::NoAnswer => None,
        };

        let mut response = Vec::with_capacity(512);

        // ID
        response.extend_from_slice(&query[0..2]);
        // QR=1, RD=1, RA=1, NOERROR
        response.push(0x81);
        response.push(0x80);
        // QDCOUNT
        response.extend_from_slice(&query[4..6]);
        // ANCOUNT
        response.extend_from_slice(&[0x00, u8::from(answer.is_some())]);
        // NSCOUNT, ARCOUNT
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        let question_end = Self::question_end(query)?;
        response.extend_from_slice(&query[12..question_end]);

        if let Some(ip) = answer {
            response.extend_from_slice(&[
                0xc0, 0x0c, // pointer to question name
                0x00, 0x01, // A
                0x00, 0x01, // IN
                0x00, 0x00, 0x00, 0x3c, // TTL 60
                0x00, 0x04,
            ]);
            response.extend_from_slice(&ip.octets());
        }

        Some(response)
    }

    /// Offset just past the first question (name, type and class).
    fn question_end(query: &[u8]) -> Option<usize> {
        let mut pos = 12;
        loop {
            let len = *query.get(pos)? as usize;
            pos += 1;
            if len == 0 {
                break;
            }
            pos += len;
        }
        let end = pos + 4;
        (end <= query.len()).then_some(end)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
