//! Host-based URL redirect rules for an axum/tower request pipeline.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rewrite;

pub use config::schema::RedirectConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use rewrite::{
    Disposition, HostnameRedirector, RewritePipeline, RewriteRequest, RewriteRule,
    SubdomainRedirector, TopLevelDomainRedirector,
};
