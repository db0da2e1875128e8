use hoopoe_domain::{DnsQuery, QueryDecision};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleVerdict {
    pub queries: Vec<DnsQuery>,
    pub result: QueryDecision,
}

impl RuleVerdict {
    pub fn allowed(queries: Vec<DnsQuery>) -> Self {
        Self {
            queries,
            result: QueryDecision::Allowed,
        }
    }

    pub fn denied(queries: Vec<DnsQuery>) -> Self {
        Self {
            queries,
            result: QueryDecision::Denied,
        }
    }
}

pub trait RuleEvaluator: Send + Sync {
    /// Decide whether `query` is forwarded and produce its candidate queries.
    ///
    /// Never fails: every pattern was compiled at startup.
    fn evaluate(&self, query: &DnsQuery, scan_all: bool) -> RuleVerdict;
}
