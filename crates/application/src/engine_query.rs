use hickory_proto::op::Message;
use hoopoe_domain::{DnsQuery, QueryDecision};

/// Per-request state shared by the rule engine and the upstream manager.
///
/// `queries[0]` is the primary candidate; later entries are fallbacks tried
/// only when every earlier candidate failed upstream. `message` is the
/// client's request on the way in and the winning upstream response on the
/// way out.
#[derive(Debug, Clone)]
pub struct EngineQuery {
    pub queries: Vec<DnsQuery>,
    pub result: QueryDecision,
    pub message: Message,
}

impl EngineQuery {
    pub fn new(queries: Vec<DnsQuery>, result: QueryDecision, message: Message) -> Self {
        Self {
            queries,
            result,
            message,
        }
    }

    pub fn primary(&self) -> Option<&DnsQuery> {
        self.queries.first()
    }

    pub fn is_allowed(&self) -> bool {
        self.result.is_allowed()
    }
}
