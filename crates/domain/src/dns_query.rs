use super::RecordType;
use std::sync::Arc;

/// A single question forwarded upstream: either the client's original
/// question or one produced by a rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }

    pub fn with_domain(&self, domain: impl Into<Arc<str>>) -> Self {
        Self {
            domain: domain.into(),
            record_type: self.record_type,
        }
    }
}
