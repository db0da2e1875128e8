use serde::{Deserialize, Serialize};

use crate::client_region::ClientRegion;
use crate::rule::RuleType;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyRuleConfig {
    #[serde(rename = "type")]
    pub rule_type: RuleType,

    /// Regular expression matched against the query name. Matching ignores
    /// case unless the pattern starts with `(?-i)`.
    pub pattern: String,

    /// Replacement for `Rewrite` rules; ignored by every other rule type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_pattern: Option<String>,
}

impl ProxyRuleConfig {
    pub fn new(rule_type: RuleType, pattern: impl Into<String>) -> Self {
        Self {
            rule_type,
            pattern: pattern.into(),
            new_pattern: None,
        }
    }

    pub fn rewrite(pattern: impl Into<String>, new_pattern: impl Into<String>) -> Self {
        Self {
            rule_type: RuleType::Rewrite,
            pattern: pattern.into(),
            new_pattern: Some(new_pattern.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProxyConfig {
    /// Apply every matching rewrite rule instead of stopping at the first.
    #[serde(default)]
    pub scan_all: bool,

    /// Answer SERVFAIL when no upstream produced an answer instead of
    /// letting the client time out.
    #[serde(default)]
    pub servfail_on_failure: bool,

    #[serde(default)]
    pub rules: Vec<ProxyRuleConfig>,

    #[serde(default)]
    pub client_regions: Vec<ClientRegion>,
}
