use hoopoe_domain::{UpstreamServer, ALL_GROUP_NAME};
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered servers eligible for one request.
pub type ServersView = Vec<Arc<UpstreamServer>>;

/// Upstream servers grouped by their `region` annotation.
///
/// Every server also belongs to the reserved [`ALL_GROUP_NAME`] group, in
/// configuration order. Built once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RegionMap {
    groups: HashMap<Arc<str>, ServersView>,
}

impl RegionMap {
    pub fn new(servers: &[Arc<UpstreamServer>]) -> Self {
        let mut groups: HashMap<Arc<str>, ServersView> = HashMap::new();

        for server in servers {
            if let Some(region) = server.region() {
                groups
                    .entry(Arc::from(region))
                    .or_default()
                    .push(Arc::clone(server));
            }
        }
        groups.insert(Arc::from(ALL_GROUP_NAME), servers.to_vec());

        Self { groups }
    }

    pub fn get(&self, region: &str) -> Option<&ServersView> {
        self.groups.get(region)
    }

    pub fn all(&self) -> &[Arc<UpstreamServer>] {
        self.groups
            .get(ALL_GROUP_NAME)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Servers for `region`, or the `"all"` group when the region is empty or
    /// unknown.
    pub fn select(&self, region: &str) -> &[Arc<UpstreamServer>] {
        if region.is_empty() {
            return self.all();
        }
        match self.get(region) {
            Some(servers) => servers,
            None => self.all(),
        }
    }

    /// True when at least one server carries a region annotation.
    pub fn has_regions(&self) -> bool {
        self.groups.len() > 1
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.groups
            .keys()
            .map(|k| &**k)
            .filter(|k| *k != ALL_GROUP_NAME)
    }
}
