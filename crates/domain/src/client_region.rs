use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;

/// Maps a client subnet to the upstream region its queries should use.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientRegion {
    pub subnet: String,
    pub region: String,
}

impl ClientRegion {
    pub fn new(subnet: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            subnet: subnet.into(),
            region: region.into(),
        }
    }

    pub fn validate_cidr(cidr: &str) -> Result<(), String> {
        if cidr.is_empty() {
            return Err("CIDR cannot be empty".to_string());
        }

        if !cidr.contains('/') {
            return Err("CIDR must include prefix (e.g., 192.168.1.0/24)".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RegionMatcher {
    subnets: Vec<(ipnetwork::IpNetwork, Arc<str>)>,
}

impl RegionMatcher {
    pub fn new(regions: &[ClientRegion]) -> Result<Self, String> {
        let mut networks = Vec::with_capacity(regions.len());

        for entry in regions {
            ClientRegion::validate_cidr(&entry.subnet)?;
            let network: ipnetwork::IpNetwork = entry
                .subnet
                .parse()
                .map_err(|e| format!("Invalid CIDR {}: {}", entry.subnet, e))?;
            networks.push((network, Arc::from(entry.region.as_str())));
        }

        Ok(Self { subnets: networks })
    }

    /// Longest-prefix match of `ip` against the configured subnets.
    pub fn region_for_ip(&self, ip: IpAddr) -> Option<Arc<str>> {
        let mut best_match: Option<(u8, &Arc<str>)> = None;

        for (network, region) in &self.subnets {
            if network.contains(ip) {
                let prefix = network.prefix();

                match best_match {
                    None => best_match = Some((prefix, region)),
                    Some((existing_prefix, _)) if prefix > existing_prefix => {
                        best_match = Some((prefix, region));
                    }
                    _ => {}
                }
            }
        }

        best_match.map(|(_, region)| Arc::clone(region))
    }

    pub fn is_empty(&self) -> bool {
        self.subnets.is_empty()
    }
}
