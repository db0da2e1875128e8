use super::compiler::{compile_rules, ProxyRule};
use hoopoe_application::ports::{RuleEvaluator, RuleVerdict};
use hoopoe_domain::{DnsQuery, DomainError, ProxyRuleConfig, RuleType};
use tracing::debug;

/// Ordered proxy rules evaluated against a query name.
///
/// Evaluation order:
/// 1. a matching `Pass` rule forwards the original query untouched;
/// 2. `Rewrite` rules produce the candidate list (first match only, or every
///    match with `scan_all`), falling back to the original query;
/// 3. with any `Allow` rule present, a candidate matching none is denied;
/// 4. a `Deny` rule matching a candidate denies it.
///
/// A denied primary candidate denies the whole query. Denied fallbacks are
/// removed from the list and never reach an upstream.
pub struct RuleEngine {
    rules: Vec<ProxyRule>,
    has_allow_rules: bool,
}

impl RuleEngine {
    pub fn new(rules: Vec<ProxyRule>) -> Self {
        let has_allow_rules = rules.iter().any(|r| r.rule_type == RuleType::Allow);
        Self {
            rules,
            has_allow_rules,
        }
    }

    pub fn from_config(configs: &[ProxyRuleConfig]) -> Result<Self, DomainError> {
        Ok(Self::new(compile_rules(configs)?))
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    fn rules_of(&self, rule_type: RuleType) -> impl Iterator<Item = &ProxyRule> {
        self.rules.iter().filter(move |r| r.rule_type == rule_type)
    }

    fn is_passed(&self, domain: &str) -> bool {
        self.rules_of(RuleType::Pass).any(|r| r.is_match(domain))
    }

    fn candidates(&self, query: &DnsQuery, scan_all: bool) -> Vec<DnsQuery> {
        let mut candidates = Vec::new();

        for rule in self.rules_of(RuleType::Rewrite) {
            if let Some(rewritten) = rule.rewrite(&query.domain) {
                debug!(
                    from = %query.domain,
                    to = %rewritten,
                    pattern = rule.pattern.as_str(),
                    "Rewrite rule matched"
                );
                candidates.push(query.with_domain(rewritten));
                if !scan_all {
                    break;
                }
            }
        }

        if candidates.is_empty() {
            candidates.push(query.clone());
        }
        candidates
    }

    fn is_denied(&self, domain: &str) -> bool {
        if self.has_allow_rules && !self.rules_of(RuleType::Allow).any(|r| r.is_match(domain)) {
            debug!(domain = %domain, "No allow rule matched");
            return true;
        }

        if self.rules_of(RuleType::Deny).any(|r| r.is_match(domain)) {
            debug!(domain = %domain, "Deny rule matched");
            return true;
        }

        false
    }
}

impl RuleEvaluator for RuleEngine {
    fn evaluate(&self, query: &DnsQuery, scan_all: bool) -> RuleVerdict {
        if self.is_passed(&query.domain) {
            debug!(domain = %query.domain, "Pass rule matched");
            return RuleVerdict::allowed(vec![query.clone()]);
        }

        let mut allowed = Vec::new();
        for (index, candidate) in self.candidates(query, scan_all).into_iter().enumerate() {
            if !self.is_denied(&candidate.domain) {
                allowed.push(candidate);
            } else if index == 0 {
                return RuleVerdict::denied(vec![candidate]);
            } else {
                debug!(domain = %candidate.domain, "Dropping denied fallback candidate");
            }
        }

        RuleVerdict::allowed(allowed)
    }
}
