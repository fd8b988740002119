//! The rewrite rule contract.
//!
//! # Responsibilities
//! - Define the outcome of evaluating one rule (`Disposition`)
//! - Define the trait every redirect rule implements
//! - Hold the options shared by all rules (status code, localhost exclusion)
//!
//! # Design Decisions
//! - Rules are immutable after construction (thread-safe without locks)
//! - `apply` is synchronous and pure: no I/O, no allocation beyond the location

use axum::http::StatusCode;

use crate::rewrite::RewriteRequest;

/// Outcome of evaluating one rule against one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Proceed to the next rule or handler without modification.
    Continue,
    /// Stop processing and answer with `status` and a `Location` header.
    EndWithRedirect { status: StatusCode, location: String },
}

impl Disposition {
    pub fn redirect(status: StatusCode, location: impl Into<String>) -> Self {
        Disposition::EndWithRedirect {
            status,
            location: location.into(),
        }
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, Disposition::Continue)
    }

    /// The redirect target, if this disposition ends the response.
    pub fn location(&self) -> Option<&str> {
        match self {
            Disposition::Continue => None,
            Disposition::EndWithRedirect { location, .. } => Some(location),
        }
    }
}

/// A URL rewrite rule evaluated by the pipeline.
pub trait RewriteRule: Send + Sync + std::fmt::Debug {
    /// Short identifier used in logs and metrics labels.
    fn name(&self) -> &'static str;

    /// Decide whether the request must be redirected.
    fn apply(&self, request: &RewriteRequest) -> Disposition;
}

/// Options common to every redirect rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOptions {
    /// Status sent with the redirect (default: 301 Moved Permanently).
    pub status: StatusCode,

    /// Never redirect requests addressed to `localhost`.
    pub exclude_localhost: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            status: StatusCode::MOVED_PERMANENTLY,
            exclude_localhost: true,
        }
    }
}

impl RuleOptions {
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_exclude_localhost(mut self, exclude_localhost: bool) -> Self {
        self.exclude_localhost = exclude_localhost;
        self
    }
}
