//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the redirect
//! server. All types derive Serde traits for deserialization from config files.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Root configuration for the redirect server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RedirectConfig {
    /// Listener configuration (bind address, scheme, path base).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Handler reached by requests no rule redirects.
    pub fallback: FallbackConfig,

    /// Rewrite rules, evaluated in file order.
    pub rules: Vec<RuleConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Scheme reported in redirects when the request URI has none.
    pub scheme: String,

    /// Prefix the site is mounted under, kept in front of the path.
    pub path_base: String,

    /// Take the scheme from `X-Forwarded-Proto` when present.
    pub trust_forwarded_proto: bool,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            scheme: "http".to_string(),
            path_base: String::new(),
            trust_forwarded_proto: false,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// What to answer when no rule redirects.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FallbackConfig {
    /// Body returned with 200 OK. When unset the server answers 404.
    pub body: Option<String>,
}

/// A single rewrite rule, tagged by `type`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    Subdomain(SubdomainRuleConfig),
    TopLevelDomain(TopLevelDomainRuleConfig),
    Hostname(HostnameRuleConfig),
}

impl RuleConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            RuleConfig::Subdomain(_) => "subdomain",
            RuleConfig::TopLevelDomain(_) => "top_level_domain",
            RuleConfig::Hostname(_) => "hostname",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            RuleConfig::Subdomain(c) => c.status_code,
            RuleConfig::TopLevelDomain(c) => c.status_code,
            RuleConfig::Hostname(c) => c.status_code,
        }
    }

    /// The configured status.
    ///
    /// Codes outside 100..=999 fall back to 301 with a warning. Run
    /// `validate_config` first to reject them (and non-3xx codes) instead.
    pub fn status(&self) -> StatusCode {
        let code = self.status_code();
        StatusCode::from_u16(code).unwrap_or_else(|_| {
            tracing::warn!(
                rule = self.kind(),
                status_code = code,
                "Invalid status code, redirecting with 301"
            );
            StatusCode::MOVED_PERMANENTLY
        })
    }

    pub fn exclude_localhost(&self) -> bool {
        match self {
            RuleConfig::Subdomain(c) => c.exclude_localhost,
            RuleConfig::TopLevelDomain(c) => c.exclude_localhost,
            RuleConfig::Hostname(c) => c.exclude_localhost,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubdomainRuleConfig {
    /// Label required at the start of the host (e.g. "www").
    pub subdomain: String,

    #[serde(default = "default_status_code")]
    pub status_code: u16,

    #[serde(default = "default_exclude_localhost")]
    pub exclude_localhost: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TopLevelDomainRuleConfig {
    /// Suffixes to replace, tried in order (e.g. [".com", ".net"]).
    pub source_tlds: Vec<String>,

    /// Replacement suffix (e.g. ".eu").
    pub target_tld: String,

    /// Optional subdomain to enforce on the destination.
    #[serde(default)]
    pub subdomain: String,

    #[serde(default = "default_status_code")]
    pub status_code: u16,

    #[serde(default = "default_exclude_localhost")]
    pub exclude_localhost: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostnameRuleConfig {
    /// Hosts this rule is meant for. Not used when deciding to redirect.
    #[serde(default)]
    pub source_hosts: Vec<String>,

    /// Canonical destination hostname.
    pub target_hostname: String,

    /// Optional subdomain prefixed to the destination.
    #[serde(default)]
    pub subdomain: String,

    #[serde(default = "default_status_code")]
    pub status_code: u16,

    #[serde(default = "default_exclude_localhost")]
    pub exclude_localhost: bool,
}

fn default_status_code() -> u16 {
    301
}

fn default_exclude_localhost() -> bool {
    true
}
