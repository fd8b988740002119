//! Rewrite middleware.
//! Runs the rewrite pipeline in front of every handler.

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::RedirectConfig;
use crate::observability::metrics;
use crate::rewrite::{Disposition, RequestContext, RewritePipeline, RewriteRequest};

/// Compiled rules plus the request interpretation they run against.
#[derive(Debug, Default)]
pub struct Rewriter {
    pub pipeline: RewritePipeline,
    pub context: RequestContext,
}

impl Rewriter {
    pub fn from_config(config: &RedirectConfig) -> Self {
        Self {
            pipeline: RewritePipeline::from_config(&config.rules),
            context: RequestContext {
                default_scheme: config.listener.scheme.clone(),
                path_base: config.listener.path_base.clone(),
                trust_forwarded_proto: config.listener.trust_forwarded_proto,
            },
        }
    }

    /// Evaluate the pipeline for an HTTP request.
    ///
    /// Requests without any host information always continue.
    pub fn evaluate<B>(&self, req: &Request<B>) -> Disposition {
        match RewriteRequest::from_http(req, &self.context) {
            Some(request) => self.pipeline.evaluate(&request),
            None => {
                tracing::debug!(uri = %req.uri(), "Request has no host, skipping rewrite rules");
                Disposition::Continue
            }
        }
    }
}

/// Shared, hot-swappable rewriter handed to the middleware.
pub type SharedRewriter = Arc<ArcSwap<Rewriter>>;

pub async fn rewrite_middleware(
    State(rewriter): State<SharedRewriter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let disposition = rewriter.load().evaluate(&req);

    match disposition {
        Disposition::Continue => {
            metrics::record_request("continue");
            next.run(req).await
        }
        Disposition::EndWithRedirect { status, location } => {
            match redirect_response(status, &location) {
                Some(response) => {
                    metrics::record_request("redirect");
                    response
                }
                None => {
                    tracing::warn!(
                        location = %location,
                        "Redirect location is not a valid header value, continuing"
                    );
                    metrics::record_request("invalid_location");
                    next.run(req).await
                }
            }
        }
    }
}

/// Empty-bodied response with `status` and a `Location` header.
pub fn redirect_response(status: StatusCode, location: &str) -> Option<Response> {
    let location = HeaderValue::from_str(location).ok()?;
    Some((status, [(header::LOCATION, location)]).into_response())
}
