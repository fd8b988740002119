//! Read-only view of a request as seen by rewrite rules.
//!
//! # Responsibilities
//! - Extract scheme, host, path base, path and query from an HTTP request
//! - Reassemble those parts into an absolute URL
//!
//! # Design Decisions
//! - Host comes from the `Host` header, falling back to the URI authority
//! - The query string keeps its leading `?` so concatenation is lossless
//! - Path base is stripped only when the path actually starts with it

use axum::http::{header, Request};

use crate::rewrite::HostString;

/// How the scheme and path base of incoming requests are determined.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Scheme used when the request URI is not absolute.
    pub default_scheme: String,

    /// Prefix the application is mounted under (e.g. `/app`).
    pub path_base: String,

    /// Honour `X-Forwarded-Proto` from a fronting proxy.
    pub trust_forwarded_proto: bool,
}

/// The parts of a request that rewrite rules inspect.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RewriteRequest {
    pub scheme: String,
    pub host: HostString,
    pub path_base: String,
    pub path: String,
    /// Empty, or `?` followed by the raw query.
    pub query: String,
}

impl RewriteRequest {
    /// Build a request view from its already-split parts.
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<HostString>,
        path: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            path_base: String::new(),
            path: path.into(),
            query: query.into(),
        }
    }

    pub fn with_path_base(mut self, path_base: impl Into<String>) -> Self {
        self.path_base = path_base.into();
        self
    }

    /// Extract the rewrite view from an HTTP request.
    ///
    /// Returns `None` when the request carries no host at all.
    pub fn from_http<B>(req: &Request<B>, ctx: &RequestContext) -> Option<Self> {
        let host = req
            .headers()
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .or_else(|| req.uri().authority().map(|a| a.as_str().to_string()))
            .filter(|h| !h.is_empty())?;

        let forwarded_proto = if ctx.trust_forwarded_proto {
            req.headers()
                .get("x-forwarded-proto")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_ascii_lowercase())
                .filter(|v| !v.is_empty())
        } else {
            None
        };

        let scheme = req
            .uri()
            .scheme_str()
            .map(str::to_string)
            .or(forwarded_proto)
            .unwrap_or_else(|| ctx.default_scheme.clone());

        let full_path = req.uri().path();
        let (path_base, path) = split_path_base(full_path, &ctx.path_base);

        let query = req
            .uri()
            .query()
            .map(|q| format!("?{}", q))
            .unwrap_or_default();

        Some(Self {
            scheme,
            host: HostString::new(host),
            path_base: path_base.to_string(),
            path: path.to_string(),
            query,
        })
    }

    /// `scheme://host` + path base + path + query, by plain concatenation.
    pub fn url_with_host(&self, host: &str) -> String {
        format!(
            "{}://{}{}{}{}",
            self.scheme, host, self.path_base, self.path, self.query
        )
    }
}

/// Split `path` into (`base`, remainder) when it lies under `base`.
fn split_path_base<'a>(path: &'a str, base: &str) -> (&'a str, &'a str) {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return ("", path);
    }

    match path.strip_prefix(base) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => (&path[..base.len()], rest),
        _ => ("", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn ctx() -> RequestContext {
        RequestContext {
            default_scheme: "http".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_http_host_header() {
        let req = Request::builder()
            .uri("/a/b?q=1&r=2")
            .header("Host", "example.com:8080")
            .body(Body::empty())
            .unwrap();

        let view = RewriteRequest::from_http(&req, &ctx()).unwrap();
        assert_eq!(view.scheme, "http");
        assert_eq!(view.host.value(), "example.com:8080");
        assert_eq!(view.path_base, "");
        assert_eq!(view.path, "/a/b");
        assert_eq!(view.query, "?q=1&r=2");
    }

    #[test]
    fn test_from_http_absolute_uri() {
        let req = Request::builder()
            .uri("https://example.com/a")
            .body(Body::empty())
            .unwrap();

        let view = RewriteRequest::from_http(&req, &ctx()).unwrap();
        assert_eq!(view.scheme, "https");
        assert_eq!(view.host.value(), "example.com");
        assert_eq!(view.query, "");
    }

    #[test]
    fn test_from_http_without_host() {
        let req = Request::builder().uri("/a").body(Body::empty()).unwrap();
        assert!(RewriteRequest::from_http(&req, &ctx()).is_none());
    }

    #[test]
    fn test_forwarded_proto() {
        let req = Request::builder()
            .uri("/")
            .header("Host", "example.com")
            .header("X-Forwarded-Proto", "HTTPS, http")
            .body(Body::empty())
            .unwrap();

        let view = RewriteRequest::from_http(&req, &ctx()).unwrap();
        assert_eq!(view.scheme, "http");

        let trusting = RequestContext {
            trust_forwarded_proto: true,
            ..ctx()
        };
        let view = RewriteRequest::from_http(&req, &trusting).unwrap();
        assert_eq!(view.scheme, "https");
    }

    #[test]
    fn test_path_base() {
        let req = Request::builder()
            .uri("/app/orders?id=7")
            .header("Host", "example.com")
            .body(Body::empty())
            .unwrap();
        let ctx = RequestContext {
            path_base: "/app".to_string(),
            ..ctx()
        };

        let view = RewriteRequest::from_http(&req, &ctx).unwrap();
        assert_eq!(view.path_base, "/app");
        assert_eq!(view.path, "/orders");
        assert_eq!(view.url_with_host("www.example.com"), "http://www.example.com/app/orders?id=7");
    }

    #[test]
    fn test_path_base_requires_segment_boundary() {
        assert_eq!(split_path_base("/application", "/app"), ("", "/application"));
        assert_eq!(split_path_base("/app", "/app/"), ("/app", ""));
        assert_eq!(split_path_base("/x", ""), ("", "/x"));
    }
}
