use super::region_map::RegionMap;
use super::round_robin::IndexRoundRobin;
use crate::dns::forwarding::MessageBuilder;
use crate::dns::transport::DnsExchange;
use async_trait::async_trait;
use hickory_proto::op::Message;
use hoopoe_application::ports::{NoopTelemetry, UpstreamForwarder, UpstreamTelemetry};
use hoopoe_application::EngineQuery;
use hoopoe_domain::{
    DnsQuery, DomainError, LoadBalancing, QueryDecision, RequestMetadata, UpstreamConfig,
    UpstreamServer,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Forwards allowed queries to the configured upstream servers.
///
/// Each candidate query gets its own `timeout` budget. Within that budget
/// servers are tried one after another, following the load-balancing
/// policy, until one returns a response with at least one answer record.
pub struct UpstreamsManager {
    region_map: RegionMap,
    load_balancing: LoadBalancing,
    round_robin: Arc<IndexRoundRobin>,
    timeout: Duration,
    exchange_timeout: Duration,
    exchange: Arc<dyn DnsExchange>,
    telemetry: Arc<dyn UpstreamTelemetry>,
}

impl UpstreamsManager {
    pub fn new(
        servers: Vec<UpstreamServer>,
        load_balancing: LoadBalancing,
        timeout: Duration,
        exchange: Arc<dyn DnsExchange>,
    ) -> Result<Self, DomainError> {
        if servers.is_empty() {
            return Err(DomainError::NoUpstreamServers);
        }

        let servers: Vec<Arc<UpstreamServer>> = servers.into_iter().map(Arc::new).collect();
        let round_robin = Arc::new(IndexRoundRobin::new(servers.len()));

        Ok(Self {
            region_map: RegionMap::new(&servers),
            load_balancing,
            round_robin,
            timeout,
            exchange_timeout: timeout,
            exchange,
            telemetry: Arc::new(NoopTelemetry),
        })
    }

    pub fn from_config(
        config: &UpstreamConfig,
        exchange: Arc<dyn DnsExchange>,
    ) -> Result<Self, DomainError> {
        let timeout = config
            .timeout()
            .map_err(|e| DomainError::ConfigError(e.to_string()))?;
        let exchange_timeout = config
            .exchange_timeout()
            .map_err(|e| DomainError::ConfigError(e.to_string()))?;

        Ok(Self::new(
            config.servers.clone(),
            config.load_balancing,
            timeout,
            exchange,
        )?
        .with_exchange_timeout(exchange_timeout))
    }

    /// Upper bound for a single exchange. The remaining request budget
    /// still applies when it is shorter.
    pub fn with_exchange_timeout(mut self, exchange_timeout: Duration) -> Self {
        self.exchange_timeout = exchange_timeout;
        self
    }

    pub fn with_telemetry(mut self, telemetry: Arc<dyn UpstreamTelemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    pub fn with_round_robin(mut self, round_robin: Arc<IndexRoundRobin>) -> Self {
        self.round_robin = round_robin;
        self
    }

    pub fn region_map(&self) -> &RegionMap {
        &self.region_map
    }

    pub fn load_balancing(&self) -> LoadBalancing {
        self.load_balancing
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Servers eligible for a request from `metadata.region`.
    pub fn select_servers(&self, metadata: &RequestMetadata) -> &[Arc<UpstreamServer>] {
        self.region_map.select(&metadata.region)
    }

    fn next_server<'a>(
        &self,
        servers: &'a [Arc<UpstreamServer>],
        iteration: usize,
    ) -> &'a Arc<UpstreamServer> {
        let index = match self.load_balancing {
            LoadBalancing::ByOrder => iteration % servers.len(),
            LoadBalancing::RoundRobin => self.round_robin.limited_get(servers.len()),
        };
        &servers[index]
    }

    /// Send `request` to `servers` until one answers or the budget runs out.
    pub async fn forward(
        &self,
        request: &Message,
        servers: &[Arc<UpstreamServer>],
    ) -> Option<Message> {
        if servers.is_empty() {
            return None;
        }

        let deadline = Instant::now() + self.timeout;
        let mut iteration = 0usize;

        loop {
            let now = Instant::now();
            if now >= deadline {
                debug!(attempts = iteration, "Upstream timeout budget exhausted");
                return None;
            }

            let server = self.next_server(servers, iteration);
            iteration += 1;
            let attempt_timeout = self.exchange_timeout.min(deadline - now);

            let result = self
                .exchange
                .exchange(request, &server.address, attempt_timeout)
                .await;
            self.telemetry.record_request(&server.address);

            match result {
                Ok(response) if !response.answers().is_empty() => {
                    debug!(
                        server = %server.address,
                        answers = response.answers().len(),
                        attempt = iteration,
                        "Upstream answered"
                    );
                    return Some(response);
                }
                Ok(response) => {
                    debug!(
                        server = %server.address,
                        rcode = ?response.response_code(),
                        "Upstream response carried no answer"
                    );
                }
                Err(e) => {
                    self.telemetry.record_failure(&server.address);
                    warn!(
                        server = %server.address,
                        protocol = self.exchange.protocol_name(),
                        error = %e,
                        "Upstream exchange failed"
                    );
                    tokio::task::yield_now().await;
                }
            }
        }
    }

    async fn forward_candidate(
        &self,
        original: &Message,
        candidate: &DnsQuery,
        servers: &[Arc<UpstreamServer>],
    ) -> Option<Message> {
        let request = match MessageBuilder::build_upstream(original, candidate) {
            Ok(request) => request,
            Err(e) => {
                warn!(domain = %candidate.domain, error = %e, "Skipping candidate");
                return None;
            }
        };

        debug!(
            domain = %candidate.domain,
            record_type = %candidate.record_type,
            servers = servers.len(),
            strategy = self.load_balancing.as_str(),
            "Forwarding candidate"
        );
        self.forward(&request, servers).await
    }
}

#[async_trait]
impl UpstreamForwarder for UpstreamsManager {
    async fn apply(
        &self,
        query: EngineQuery,
        metadata: &RequestMetadata,
    ) -> Result<EngineQuery, DomainError> {
        if query.queries.is_empty() {
            return Err(DomainError::EmptyEngineQuery);
        }

        let servers = self.select_servers(metadata);

        for candidate in &query.queries {
            if let Some(response) = self
                .forward_candidate(&query.message, candidate, servers)
                .await
            {
                return Ok(EngineQuery::new(
                    query.queries,
                    QueryDecision::Allowed,
                    response,
                ));
            }
        }

        Err(DomainError::UpstreamUnavailable)
    }
}
