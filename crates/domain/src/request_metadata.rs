use std::net::IpAddr;
use std::sync::Arc;

/// Per-request context consumed by upstream server selection.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    pub region: Arc<str>,
    pub client_ip: Option<IpAddr>,
}

impl RequestMetadata {
    pub fn new(region: impl Into<Arc<str>>) -> Self {
        Self {
            region: region.into(),
            client_ip: None,
        }
    }

    pub fn with_client_ip(mut self, client_ip: IpAddr) -> Self {
        self.client_ip = Some(client_ip);
        self
    }
}

impl Default for RequestMetadata {
    fn default() -> Self {
        Self::new("")
    }
}
