//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the fallback handler
//! - Wire up middleware (rewrite rules, timeout, tracing)
//! - Bind server to listener
//! - Swap in recompiled rules when the configuration changes

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RedirectConfig;
use crate::http::middleware::{rewrite_middleware, Rewriter, SharedRewriter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub fallback_body: Option<Arc<str>>,
}

/// HTTP server running the rewrite pipeline.
pub struct HttpServer {
    router: Router,
    config: RedirectConfig,
    rewriter: SharedRewriter,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RedirectConfig) -> Self {
        let rewriter: SharedRewriter =
            Arc::new(ArcSwap::from_pointee(Rewriter::from_config(&config)));

        let state = AppState {
            fallback_body: config.fallback.body.as_deref().map(Arc::from),
        };

        let router = Self::build_router(&config, state, rewriter.clone());
        Self {
            router,
            config,
            rewriter,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RedirectConfig, state: AppState, rewriter: SharedRewriter) -> Router {
        Router::new()
            .route("/{*path}", any(fallback_handler))
            .route("/", any(fallback_handler))
            .with_state(state)
            .layer(middleware::from_fn_with_state(rewriter, rewrite_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Configurations received on `config_updates` replace the active rules;
    /// in-flight requests finish against the rules they started with.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<RedirectConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            rules = self.config.rules.len(),
            "HTTP server starting"
        );

        let rewriter = self.rewriter.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                rewriter.store(Arc::new(Rewriter::from_config(&config)));
                tracing::info!(rules = config.rules.len(), "Rewrite rules reloaded");
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RedirectConfig {
        &self.config
    }

    /// Handle to the active rules, for swapping them outside a config reload.
    pub fn rewriter(&self) -> SharedRewriter {
        self.rewriter.clone()
    }
}

/// Reached only when no rule redirected the request.
async fn fallback_handler(State(state): State<AppState>) -> Response {
    match state.fallback_body {
        Some(body) => (StatusCode::OK, body.to_string()).into_response(),
        None => (StatusCode::NOT_FOUND, "No redirect rule matched").into_response(),
    }
}
