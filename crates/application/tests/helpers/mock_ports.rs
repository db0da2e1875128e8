#![allow(dead_code)]

use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType as HickoryRecordType};
use hoopoe_application::ports::{RuleEvaluator, RuleVerdict, UpstreamForwarder};
use hoopoe_application::EngineQuery;
use hoopoe_domain::{DnsQuery, DomainError, QueryDecision, RequestMetadata};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Mutex;

pub fn build_request(id: u16, domain: &str, record_type: HickoryRecordType) -> Message {
    let mut query = Query::new();
    query.set_name(Name::from_str(domain).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(hickory_proto::rr::DNSClass::IN);

    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(query);
    message
}

/// Denies listed names, rewrites listed names, allows everything else.
#[derive(Default)]
pub struct MockRuleEvaluator {
    denied: Mutex<HashSet<String>>,
    rewrites: Mutex<Vec<(String, Vec<String>)>>,
    seen_scan_all: Mutex<Vec<bool>>,
}

impl MockRuleEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deny(&self, domain: &str) {
        self.denied.lock().unwrap().insert(domain.to_string());
    }

    pub fn rewrite(&self, domain: &str, candidates: &[&str]) {
        self.rewrites.lock().unwrap().push((
            domain.to_string(),
            candidates.iter().map(|c| c.to_string()).collect(),
        ));
    }

    pub fn scan_all_flags(&self) -> Vec<bool> {
        self.seen_scan_all.lock().unwrap().clone()
    }
}

impl RuleEvaluator for MockRuleEvaluator {
    fn evaluate(&self, query: &DnsQuery, scan_all: bool) -> RuleVerdict {
        self.seen_scan_all.lock().unwrap().push(scan_all);

        let candidates = self
            .rewrites
            .lock()
            .unwrap()
            .iter()
            .find(|(domain, _)| domain.as_str() == &*query.domain)
            .map(|(_, names)| names.iter().map(|n| query.with_domain(n.as_str())).collect())
            .unwrap_or_else(|| vec![query.clone()]);

        if self.denied.lock().unwrap().contains(&*query.domain) {
            RuleVerdict::denied(candidates)
        } else {
            RuleVerdict::allowed(candidates)
        }
    }
}

/// Records every forwarded query and answers with a clone of the request.
#[derive(Default)]
pub struct MockUpstreamForwarder {
    calls: Mutex<Vec<(Vec<DnsQuery>, RequestMetadata)>>,
    should_fail: Mutex<bool>,
}

impl MockUpstreamForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn calls(&self) -> Vec<(Vec<DnsQuery>, RequestMetadata)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UpstreamForwarder for MockUpstreamForwarder {
    async fn apply(
        &self,
        query: EngineQuery,
        metadata: &RequestMetadata,
    ) -> Result<EngineQuery, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.queries.clone(), metadata.clone()));

        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::UpstreamUnavailable);
        }

        let mut response = query.message.clone();
        response.set_message_type(MessageType::Response);
        Ok(EngineQuery::new(query.queries, QueryDecision::Allowed, response))
    }
}
