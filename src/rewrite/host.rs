//! Host header representation and case-insensitive comparisons.
//!
//! # Design Decisions
//! - The raw host value is preserved verbatim; hostname and port are views into it
//! - Hostname comparison is case-insensitive (per HTTP spec)
//! - An unparsable port is treated as absent rather than rejected

use std::fmt;

/// The request host: hostname plus optional port, as sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostString {
    value: String,
}

impl HostString {
    /// Wrap a raw `Host` value such as `example.com:8080`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Build a host from a hostname and an optional port.
    pub fn from_parts(hostname: &str, port: Option<u16>) -> Self {
        match port {
            Some(port) => Self::new(format!("{}:{}", hostname, port)),
            None => Self::new(hostname),
        }
    }

    /// The full host string, port included.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    /// The hostname without the port. IPv6 literals keep their brackets.
    pub fn hostname(&self) -> &str {
        self.split().0
    }

    /// The explicit port, if one was given and it parses.
    pub fn port(&self) -> Option<u16> {
        self.split().1
    }

    fn split(&self) -> (&str, Option<u16>) {
        let value = self.value.as_str();

        if value.starts_with('[') {
            return match value.find(']') {
                Some(end) => {
                    let port = value[end + 1..]
                        .strip_prefix(':')
                        .and_then(|p| p.parse().ok());
                    (&value[..=end], port)
                }
                None => (value, None),
            };
        }

        match value.split_once(':') {
            Some((hostname, port)) => (hostname, port.parse().ok()),
            None => (value, None),
        }
    }
}

impl fmt::Display for HostString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for HostString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub(crate) fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value.to_lowercase().starts_with(&prefix.to_lowercase())
}

pub(crate) fn ends_with_ignore_case(value: &str, suffix: &str) -> bool {
    value.to_lowercase().ends_with(&suffix.to_lowercase())
}

pub(crate) fn is_localhost(host: &HostString) -> bool {
    eq_ignore_case(host.hostname(), "localhost")
}

/// `None` for an empty or whitespace-only subdomain.
pub(crate) fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
