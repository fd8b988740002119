//! Redirect to a canonical hostname.
//!
//! # Design Decisions
//! - Only equality with the target host gates the redirect; the configured
//!   source hosts are informational and never consulted
//! - Equality is against the full host string, so `example.com:8080` does
//!   not equal a target of `example.com`
//! - The request port is preserved on the destination host, even when it is
//!   the scheme default, and the target hostname is emitted verbatim
//! - Path and query are percent-encoded by `url::Url`; the authority is not
//!   handed to it

use url::{Position, Url};

use crate::rewrite::host::{eq_ignore_case, is_localhost, non_blank};
use crate::rewrite::{Disposition, HostString, RewriteRequest, RewriteRule, RuleOptions};

/// Redirects every host other than the target hostname to the target.
#[derive(Debug, Clone)]
pub struct HostnameRedirector {
    source_hosts: Vec<String>,
    target_hostname: String,
    subdomain: String,
    options: RuleOptions,
}

impl HostnameRedirector {
    pub fn new(source_hosts: Vec<String>, target_hostname: impl Into<String>) -> Self {
        Self {
            source_hosts,
            target_hostname: target_hostname.into(),
            subdomain: String::new(),
            options: RuleOptions::default(),
        }
    }

    /// Prefix the destination hostname with `subdomain`.
    pub fn with_subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = subdomain.into();
        self
    }

    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source_hosts(&self) -> &[String] {
        &self.source_hosts
    }

    pub fn target_hostname(&self) -> &str {
        &self.target_hostname
    }

    fn destination_host(&self, request_host: &HostString) -> HostString {
        let hostname = match non_blank(&self.subdomain) {
            Some(subdomain) => format!("{}.{}", subdomain, self.target_hostname),
            None => self.target_hostname.clone(),
        };
        HostString::from_parts(&hostname, request_host.port())
    }
}

impl RewriteRule for HostnameRedirector {
    fn name(&self) -> &'static str {
        "hostname"
    }

    fn apply(&self, request: &RewriteRequest) -> Disposition {
        if eq_ignore_case(request.host.value(), &self.target_hostname) {
            return Disposition::Continue;
        }

        if self.options.exclude_localhost && is_localhost(&request.host) {
            return Disposition::Continue;
        }

        let host = self.destination_host(&request.host);
        Disposition::redirect(self.options.status, build_absolute(request, &host))
    }
}

/// Neutral origin used only to percent-encode path and query.
const ENCODING_BASE: &str = "http://localhost/";

/// Assemble an absolute URL for `request` on `host`.
///
/// Scheme and host are copied as given; path base, path and query are
/// percent-encoded.
fn build_absolute(request: &RewriteRequest, host: &HostString) -> String {
    match encode_path_and_query(request) {
        Some(tail) => format!("{}://{}{}", request.scheme, host.value(), tail),
        None => request.url_with_host(host.value()),
    }
}

/// `/path?query` with URL percent-encoding applied. An empty path becomes `/`.
fn encode_path_and_query(request: &RewriteRequest) -> Option<String> {
    let mut url = match Url::parse(ENCODING_BASE) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(error = %e, "Cannot encode path, concatenating parts");
            return None;
        }
    };

    let path = format!("{}{}", request.path_base, request.path);
    url.set_path(if path.is_empty() { "/" } else { &path });

    let query = request.query.strip_prefix('?').unwrap_or(&request.query);
    url.set_query(if query.is_empty() { None } else { Some(query) });

    Some(url[Position::BeforePath..].to_string())
}
