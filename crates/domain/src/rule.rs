use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    /// Forward unmodified, bypassing every other rule.
    Pass,
    /// Whitelist entry; once any exists, unmatched names are dropped.
    Allow,
    /// Drop matching names, even when an Allow rule matched.
    Deny,
    /// Substitute the pattern with the rule's replacement.
    Rewrite,
}

impl RuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Allow => "Allow",
            Self::Deny => "Deny",
            Self::Rewrite => "Rewrite",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pass" | "p" => Ok(Self::Pass),
            "allow" | "a" => Ok(Self::Allow),
            "deny" | "d" => Ok(Self::Deny),
            "rewrite" | "rw" => Ok(Self::Rewrite),
            other => Err(format!("Unknown rule type: {}", other)),
        }
    }
}

impl Serialize for RuleType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryDecision {
    Allowed,
    Denied,
}

impl QueryDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}
