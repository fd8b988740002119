//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (bind address parses, status codes are redirects)
//! - Reject rules that would build meaningless destination hosts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RedirectConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::{RedirectConfig, RuleConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),
    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
    #[error("unsupported scheme '{0}' (expected http or https)")]
    Scheme(String),
    #[error("path base '{0}' must start with '/'")]
    PathBase(String),
    #[error("request timeout must be greater than zero")]
    Timeout,
    #[error("rule #{index} ({kind}): status code {code} is not a redirect")]
    StatusCode {
        index: usize,
        kind: &'static str,
        code: u16,
    },
    #[error("rule #{index} ({kind}): {field} must not be empty")]
    EmptyField {
        index: usize,
        kind: &'static str,
        field: &'static str,
    },
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &RedirectConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if !matches!(config.listener.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::Scheme(config.listener.scheme.clone()));
    }

    let path_base = &config.listener.path_base;
    if !path_base.is_empty() && !path_base.starts_with('/') {
        errors.push(ValidationError::PathBase(path_base.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Timeout);
    }

    for (index, rule) in config.rules.iter().enumerate() {
        validate_rule(index, rule, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_rule(index: usize, rule: &RuleConfig, errors: &mut Vec<ValidationError>) {
    let kind = rule.kind();

    let code = rule.status_code();
    if !(300..400).contains(&code) {
        errors.push(ValidationError::StatusCode { index, kind, code });
    }

    let mut require = |field: &'static str, value: &str| {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyField { index, kind, field });
        }
    };

    match rule {
        RuleConfig::Subdomain(c) => require("subdomain", &c.subdomain),
        RuleConfig::TopLevelDomain(c) => {
            require("target_tld", &c.target_tld);
            // Every source TLD must be non-blank.
            if c.source_tlds.is_empty() || c.source_tlds.iter().any(|t| t.trim().is_empty()) {
                require("source_tlds", "");
            }
        }
        RuleConfig::Hostname(c) => require("target_hostname", &c.target_hostname),
    }
}
