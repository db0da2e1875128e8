use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Annotation key grouping servers by region.
pub const REGION_ANNOTATION: &str = "region";

/// Reserved group holding every configured server.
pub const ALL_GROUP_NAME: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpstreamServer {
    /// `host:port` of the upstream resolver.
    pub address: String,

    #[serde(default)]
    pub annotations: HashMap<String, String>,
}

impl UpstreamServer {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            annotations: HashMap::new(),
        }
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn with_region(self, region: impl Into<String>) -> Self {
        self.with_annotation(REGION_ANNOTATION, region)
    }

    pub fn region(&self) -> Option<&str> {
        self.annotations.get(REGION_ANNOTATION).map(String::as_str)
    }
}
