//! Redirect to a host carrying a required subdomain.
//!
//! `example.com/a?q=1` becomes `www.example.com/a?q=1`; the port, path base,
//! path and query are carried over untouched.

use crate::rewrite::host::{is_localhost, starts_with_ignore_case};
use crate::rewrite::{Disposition, RewriteRequest, RewriteRule, RuleOptions};

/// Redirects requests whose hostname lacks the configured subdomain prefix.
#[derive(Debug, Clone)]
pub struct SubdomainRedirector {
    subdomain: String,
    options: RuleOptions,
}

impl SubdomainRedirector {
    pub fn new(subdomain: impl Into<String>) -> Self {
        Self::with_options(subdomain, RuleOptions::default())
    }

    pub fn with_options(subdomain: impl Into<String>, options: RuleOptions) -> Self {
        Self {
            subdomain: subdomain.into(),
            options,
        }
    }

    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }
}

impl RewriteRule for SubdomainRedirector {
    fn name(&self) -> &'static str {
        "subdomain"
    }

    fn apply(&self, request: &RewriteRequest) -> Disposition {
        let host = &request.host;

        if starts_with_ignore_case(host.hostname(), &self.subdomain) {
            return Disposition::Continue;
        }

        if self.options.exclude_localhost && is_localhost(host) {
            return Disposition::Continue;
        }

        let new_host = format!("{}.{}", self.subdomain, host.value());
        Disposition::redirect(self.options.status, request.url_with_host(&new_host))
    }
}
