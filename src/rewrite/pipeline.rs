//! Ordered rule evaluation.
//!
//! # Responsibilities
//! - Compile rule configuration into rule instances
//! - Run rules in registration order against a request
//! - Stop at the first rule that ends the response
//!
//! # Design Decisions
//! - Immutable after construction; reloads build a new pipeline
//! - Registration order is file order, there is no priority field

use crate::config::RuleConfig;
use crate::observability::metrics;
use crate::rewrite::{
    Disposition, HostnameRedirector, RewriteRequest, RewriteRule, RuleOptions,
    SubdomainRedirector, TopLevelDomainRedirector,
};

/// An ordered list of rewrite rules.
#[derive(Debug, Default)]
pub struct RewritePipeline {
    rules: Vec<Box<dyn RewriteRule>>,
}

impl RewritePipeline {
    pub fn new(rules: Vec<Box<dyn RewriteRule>>) -> Self {
        Self { rules }
    }

    /// Build the pipeline from validated rule configuration.
    ///
    /// Unvalidated status codes outside 100..=999 become 301 (see
    /// `RuleConfig::status`).
    pub fn from_config(configs: &[RuleConfig]) -> Self {
        let rules = configs.iter().map(build_rule).collect::<Vec<_>>();
        tracing::info!(rules = rules.len(), "Rewrite pipeline compiled");
        Self { rules }
    }

    /// Append a rule after the existing ones.
    pub fn push(&mut self, rule: impl RewriteRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule in order until one redirects.
    pub fn evaluate(&self, request: &RewriteRequest) -> Disposition {
        for rule in &self.rules {
            let disposition = rule.apply(request);
            if let Disposition::EndWithRedirect { status, location } = &disposition {
                tracing::debug!(
                    rule = rule.name(),
                    host = %request.host,
                    status = status.as_u16(),
                    location = %location,
                    "Rule ended request with redirect"
                );
                metrics::record_rule_match(rule.name(), status.as_u16());
                return disposition;
            }
        }
        Disposition::Continue
    }
}

fn build_rule(config: &RuleConfig) -> Box<dyn RewriteRule> {
    let options = RuleOptions::default()
        .with_status(config.status())
        .with_exclude_localhost(config.exclude_localhost());

    match config {
        RuleConfig::Subdomain(c) => {
            Box::new(SubdomainRedirector::with_options(c.subdomain.clone(), options))
        }
        RuleConfig::TopLevelDomain(c) => Box::new(
            TopLevelDomainRedirector::new(c.source_tlds.clone(), c.target_tld.clone())
                .with_subdomain(c.subdomain.clone())
                .with_options(options),
        ),
        RuleConfig::Hostname(c) => Box::new(
            HostnameRedirector::new(c.source_hosts.clone(), c.target_hostname.clone())
                .with_subdomain(c.subdomain.clone())
                .with_options(options),
        ),
    }
}
