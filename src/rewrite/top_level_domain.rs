//! Redirect to a canonical top-level domain.
//!
//! # Design Decisions
//! - The target check and source match are case-insensitive suffix tests
//! - The replacement itself is a case-sensitive, substring-wide replace of the
//!   first matching source TLD (`example.com.com` becomes `example.eu.eu`)
//! - The request port is not carried over to the destination

use crate::rewrite::host::{
    ends_with_ignore_case, is_localhost, non_blank, starts_with_ignore_case,
};
use crate::rewrite::{Disposition, RewriteRequest, RewriteRule, RuleOptions};

/// Redirects hosts on any of the source TLDs to the target TLD.
#[derive(Debug, Clone)]
pub struct TopLevelDomainRedirector {
    source_tlds: Vec<String>,
    target_tld: String,
    subdomain: String,
    options: RuleOptions,
}

impl TopLevelDomainRedirector {
    pub fn new(source_tlds: Vec<String>, target_tld: impl Into<String>) -> Self {
        Self {
            source_tlds,
            target_tld: target_tld.into(),
            subdomain: String::new(),
            options: RuleOptions::default(),
        }
    }

    /// Also require the destination host to start with `subdomain`.
    pub fn with_subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.subdomain = subdomain.into();
        self
    }

    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn source_tlds(&self) -> &[String] {
        &self.source_tlds
    }

    pub fn target_tld(&self) -> &str {
        &self.target_tld
    }

    fn rewrite_hostname(&self, hostname: &str) -> String {
        self.source_tlds
            .iter()
            .find(|tld| ends_with_ignore_case(hostname, tld))
            .map(|tld| hostname.replace(tld.as_str(), &self.target_tld))
            .unwrap_or_else(|| hostname.to_string())
    }
}

impl RewriteRule for TopLevelDomainRedirector {
    fn name(&self) -> &'static str {
        "top_level_domain"
    }

    fn apply(&self, request: &RewriteRequest) -> Disposition {
        let hostname = request.host.hostname();

        if ends_with_ignore_case(hostname, &self.target_tld) {
            return Disposition::Continue;
        }

        if self.options.exclude_localhost && is_localhost(&request.host) {
            return Disposition::Continue;
        }

        let mut new_host = self.rewrite_hostname(hostname);

        if let Some(subdomain) = non_blank(&self.subdomain) {
            if !starts_with_ignore_case(hostname, subdomain) {
                new_host = format!("{}.{}", subdomain, new_host);
            }
        }

        Disposition::redirect(self.options.status, request.url_with_host(&new_host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn tlds(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn request(host: &str) -> RewriteRequest {
        RewriteRequest::new("https", host, "/a", "?q=1")
    }

    #[test]
    fn test_replaces_tld() {
        let rule = TopLevelDomainRedirector::new(tlds(&[".com", ".net"]), ".eu");
        assert_eq!(
            rule.apply(&request("example.com")),
            Disposition::redirect(StatusCode::MOVED_PERMANENTLY, "https://example.eu/a?q=1")
        );
        assert_eq!(
            rule.apply(&request("example.net")).location(),
            Some("https://example.eu/a?q=1")
        );
    }

    #[test]
    fn test_target_tld_continues() {
        let rule = TopLevelDomainRedirector::new(tlds(&[".com"]), ".eu");
        assert!(rule.apply(&request("example.eu")).is_continue());
        assert!(rule.apply(&request("EXAMPLE.EU:8080")).is_continue());
    }

    #[test]
    fn test_subdomain_added_when_missing() {
        let rule = TopLevelDomainRedirector::new(tlds(&[".com"]), ".eu").with_subdomain("shop");
        assert_eq!(
            rule.apply(&request("example.com")).location(),
            Some("https://shop.example.eu/a?q=1")
        );
    }

    #[test]
    fn test_subdomain_not_duplicated() {
        let rule = TopLevelDomainRedirector::new(tlds(&[".com"]), ".eu").with_subdomain("shop");
        assert_eq!(
            rule.apply(&request("shop.example.com")).location(),
            Some("https://shop.example.eu/a?q=1")
        );
    }

    #[test]
    fn test_blank_subdomain_ignored() {
        let rule = TopLevelDomainRedirector::new(tlds(&[".com"]), ".eu").with_subdomain("  ");
        assert_eq!(
            rule.apply(&request("example.com")).location(),
            Some("https://example.eu/a?q=1")
        );
    }

    #[test]
    fn test_port_is_dropped() {
        let rule = TopLevelDomainRedirector::new(tlds(&[".com"]), ".eu");
        assert_eq!(
            rule.apply(&request("example.com:8080")).location(),
            Some("https://example.eu/a?q=1")
        );
    }

    #[test]
    fn test_replace_is_substring_wide() {
        let rule = TopLevelDomainRedirector::new(tlds(&[".com"]), ".eu");
        assert_eq!(
            rule.apply(&request("my.company.com")).location(),
            Some("https://my.eupany.eu/a?q=1")
        );
    }

    #[test]
    fn test_replace_is_case_sensitive() {
        // Matched case-insensitively, but ".com" does not occur in ".COM".
        let rule = TopLevelDomainRedirector::new(tlds(&[".com"]), ".eu");
        assert_eq!(
            rule.apply(&request("EXAMPLE.COM")).location(),
            Some("https://EXAMPLE.COM/a?q=1")
        );
    }

    #[test]
    fn test_first_matching_tld_wins() {
        let rule = TopLevelDomainRedirector::new(tlds(&[".co.uk", ".uk"]), ".eu");
        assert_eq!(
            rule.apply(&request("example.co.uk")).location(),
            Some("https://example.eu/a?q=1")
        );
    }

    #[test]
    fn test_unknown_tld_still_redirects() {
        let rule = TopLevelDomainRedirector::new(tlds(&[".com"]), ".eu");
        assert_eq!(
            rule.apply(&request("example.org")).location(),
            Some("https://example.org/a?q=1")
        );
    }

    #[test]
    fn test_localhost_excluded() {
        let rule = TopLevelDomainRedirector::new(tlds(&[".com"]), ".eu");
        assert!(rule.apply(&request("localhost:5000")).is_continue());
    }

    #[test]
    fn test_idempotent() {
        let rule =
            TopLevelDomainRedirector::new(tlds(&[".com", ".net"]), ".eu").with_subdomain("www");
        let first = rule.apply(&request("example.net"));
        assert_eq!(first.location(), Some("https://www.example.eu/a?q=1"));
        assert!(rule.apply(&request("www.example.eu")).is_continue());
    }
}
