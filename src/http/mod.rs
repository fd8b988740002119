//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing, timeout)
//!     → middleware.rs (extract RewriteRequest, run pipeline)
//!         → EndWithRedirect: status + Location, handler skipped
//!         → Continue: fallback handler
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;

pub use middleware::{redirect_response, rewrite_middleware, Rewriter, SharedRewriter};
pub use server::HttpServer;
