use hoopoe_application::ports::{NoopTelemetry, UpstreamTelemetry};
use hoopoe_application::use_cases::HandleDnsQueryUseCase;
use hoopoe_domain::{Config, RegionMatcher};
use hoopoe_infrastructure::dns::{
    CounterTelemetry, DnsServerHandler, RuleEngine, UdpExchange, UpstreamsManager,
};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler: Arc<DnsServerHandler>,
    pub telemetry: Arc<dyn UpstreamTelemetry>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let telemetry = Self::build_telemetry(config);

        let rules = RuleEngine::from_config(&config.proxy.rules)?;
        info!(rules = rules.rule_count(), "Proxy rules compiled");

        let exchange = Arc::new(UdpExchange::new());
        let upstream = UpstreamsManager::from_config(&config.upstream, exchange)?
            .with_telemetry(Arc::clone(&telemetry));
        info!(
            servers = upstream.region_map().all().len(),
            regional = upstream.region_map().has_regions(),
            regions = ?upstream.region_map().regions().collect::<Vec<_>>(),
            strategy = upstream.load_balancing().as_str(),
            "Upstream manager ready"
        );

        let regions = RegionMatcher::new(&config.proxy.client_regions).map_err(anyhow::Error::msg)?;
        if !regions.is_empty() {
            info!(
                subnets = config.proxy.client_regions.len(),
                "Client region subnets loaded"
            );
        }

        let use_case = HandleDnsQueryUseCase::new(Arc::new(rules), Arc::new(upstream))
            .with_scan_all(config.proxy.scan_all)
            .with_client_regions(Arc::new(regions));

        let handler = DnsServerHandler::new(Arc::new(use_case))
            .with_servfail_on_failure(config.proxy.servfail_on_failure);

        Ok(Self {
            handler: Arc::new(handler),
            telemetry,
        })
    }

    fn build_telemetry(config: &Config) -> Arc<dyn UpstreamTelemetry> {
        if config.telemetry.enabled {
            Arc::new(CounterTelemetry::new())
        } else {
            Arc::new(NoopTelemetry)
        }
    }
}
