use hoopoe_domain::{DomainError, ProxyRuleConfig, RuleType};
use regex::{Regex, RegexBuilder};

/// A proxy rule with its patterns compiled.
#[derive(Debug, Clone)]
pub struct ProxyRule {
    pub rule_type: RuleType,
    pub pattern: Regex,
    /// Replacement for `Rewrite` rules. Compiled once so a malformed value is
    /// rejected at startup; its source text is the substitution template.
    pub new_pattern: Option<Regex>,
}

impl ProxyRule {
    pub fn compile(config: &ProxyRuleConfig) -> Result<Self, DomainError> {
        let pattern = build_regex(&config.pattern)?;

        let new_pattern = match (config.rule_type, config.new_pattern.as_deref()) {
            (RuleType::Rewrite, None) | (RuleType::Rewrite, Some("")) => {
                return Err(DomainError::InvalidRule(format!(
                    "rewrite rule '{}' has no new_pattern",
                    config.pattern
                )));
            }
            (RuleType::Rewrite, Some(replacement)) => Some(build_regex(replacement)?),
            _ => None,
        };

        Ok(Self {
            rule_type: config.rule_type,
            pattern,
            new_pattern,
        })
    }

    #[inline]
    pub fn is_match(&self, domain: &str) -> bool {
        self.pattern.is_match(domain)
    }

    /// Substitute every match of `pattern` in `domain`. `None` unless this
    /// is a rewrite rule whose pattern matches.
    pub fn rewrite(&self, domain: &str) -> Option<String> {
        let replacement = self.new_pattern.as_ref()?;
        if !self.pattern.is_match(domain) {
            return None;
        }
        Some(
            self.pattern
                .replace_all(domain, replacement.as_str())
                .into_owned(),
        )
    }
}

pub fn compile_rules(configs: &[ProxyRuleConfig]) -> Result<Vec<ProxyRule>, DomainError> {
    configs.iter().map(ProxyRule::compile).collect()
}

/// Patterns ignore case by default since DNS names do. An inline `(?-i)`
/// turns that off for the rest of the pattern.
fn build_regex(pattern: &str) -> Result<Regex, DomainError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| DomainError::InvalidRule(format!("invalid pattern '{}': {}", pattern, e)))
}
