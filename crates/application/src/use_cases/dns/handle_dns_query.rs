use crate::ports::{RuleEvaluator, UpstreamForwarder};
use crate::EngineQuery;
use hickory_proto::op::Message;
use hoopoe_domain::{DnsQuery, DomainError, RecordType, RegionMatcher, RequestMetadata};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum QueryOutcome {
    /// Upstream answered; the query carries the upstream response.
    Answered(EngineQuery),
    /// Rules denied the query; nothing is sent back to the client.
    Dropped,
}

pub struct HandleDnsQueryUseCase {
    rules: Arc<dyn RuleEvaluator>,
    upstream: Arc<dyn UpstreamForwarder>,
    regions: Arc<RegionMatcher>,
    scan_all: bool,
}

impl HandleDnsQueryUseCase {
    pub fn new(rules: Arc<dyn RuleEvaluator>, upstream: Arc<dyn UpstreamForwarder>) -> Self {
        Self {
            rules,
            upstream,
            regions: Arc::new(RegionMatcher::default()),
            scan_all: false,
        }
    }

    pub fn with_scan_all(mut self, scan_all: bool) -> Self {
        self.scan_all = scan_all;
        self
    }

    pub fn with_client_regions(mut self, regions: Arc<RegionMatcher>) -> Self {
        self.regions = regions;
        self
    }

    /// Run the rule engine over the request's single question.
    pub fn evaluate(&self, request: &Message) -> Result<EngineQuery, DomainError> {
        let original = Self::single_question(request)?;
        let verdict = self.rules.evaluate(&original, self.scan_all);

        Ok(EngineQuery::new(verdict.queries, verdict.result, request.clone()))
    }

    pub fn metadata_for(&self, client_ip: IpAddr) -> RequestMetadata {
        let region = self.regions.region_for_ip(client_ip).unwrap_or_else(|| Arc::from(""));
        RequestMetadata::new(region).with_client_ip(client_ip)
    }

    pub async fn execute(
        &self,
        request: &Message,
        client_ip: IpAddr,
    ) -> Result<QueryOutcome, DomainError> {
        let start = Instant::now();
        let engine_query = self.evaluate(request)?;

        let Some(primary) = engine_query.primary().cloned() else {
            return Err(DomainError::EmptyEngineQuery);
        };

        if !engine_query.is_allowed() {
            info!(
                domain = %primary.domain,
                record_type = %primary.record_type,
                client = %client_ip,
                "Query denied by proxy rules"
            );
            return Ok(QueryOutcome::Dropped);
        }

        let metadata = self.metadata_for(client_ip);
        debug!(
            domain = %primary.domain,
            candidates = engine_query.queries.len(),
            region = %metadata.region,
            "Forwarding query upstream"
        );

        match self.upstream.apply(engine_query, &metadata).await {
            Ok(answered) => {
                debug!(
                    domain = %primary.domain,
                    answers = answered.message.answers().len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream answered"
                );
                Ok(QueryOutcome::Answered(answered))
            }
            Err(e) => {
                warn!(
                    domain = %primary.domain,
                    client = %client_ip,
                    error = %e,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream forwarding failed"
                );
                Err(e)
            }
        }
    }

    fn single_question(request: &Message) -> Result<DnsQuery, DomainError> {
        match request.queries() {
            [query] => Ok(DnsQuery::new(
                query.name().to_utf8(),
                RecordType::from_u16(u16::from(query.query_type())),
            )),
            [] => Err(DomainError::InvalidDnsRequest(
                "request carries no question".to_string(),
            )),
            queries => Err(DomainError::InvalidDnsRequest(format!(
                "expected a single question, got {}",
                queries.len()
            ))),
        }
    }
}
