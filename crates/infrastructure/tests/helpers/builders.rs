#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use hoopoe_application::use_cases::HandleDnsQueryUseCase;
use hoopoe_application::EngineQuery;
use hoopoe_domain::{DnsQuery, LoadBalancing, ProxyRuleConfig, QueryDecision, UpstreamServer};
use hoopoe_infrastructure::dns::{DnsExchange, RuleEngine, UpstreamsManager};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub fn build_request(id: u16, domain: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(Name::from_str(domain).unwrap(), record_type));
    message
}

pub fn engine_query(domains: &[&str]) -> EngineQuery {
    let queries = domains
        .iter()
        .map(|d| DnsQuery::new(*d, hoopoe_domain::RecordType::A))
        .collect();
    EngineQuery::new(
        queries,
        QueryDecision::Allowed,
        build_request(77, domains.first().copied().unwrap_or("example.com."), RecordType::A),
    )
}

pub fn servers(addresses: &[&str]) -> Vec<UpstreamServer> {
    addresses.iter().map(|a| UpstreamServer::new(*a)).collect()
}

pub fn manager(
    servers: Vec<UpstreamServer>,
    load_balancing: LoadBalancing,
    timeout: Duration,
    exchange: Arc<dyn DnsExchange>,
) -> UpstreamsManager {
    UpstreamsManager::new(servers, load_balancing, timeout, exchange).unwrap()
}

pub fn use_case(
    rules: &[ProxyRuleConfig],
    scan_all: bool,
    upstream: UpstreamsManager,
) -> Arc<HandleDnsQueryUseCase> {
    let engine = RuleEngine::from_config(rules).unwrap();
    Arc::new(HandleDnsQueryUseCase::new(Arc::new(engine), Arc::new(upstream)).with_scan_all(scan_all))
}
