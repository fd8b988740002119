//! URL rewrite subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (scheme, host, path, query)
//!     → request.rs (extract RewriteRequest)
//!     → pipeline.rs (run rules in registration order)
//!         → subdomain.rs / top_level_domain.rs / hostname.rs
//!     → Return: Continue or EndWithRedirect(status, location)
//!
//! Pipeline Compilation (at startup and on reload):
//!     RuleConfig[]
//!     → Build one rule per entry, in file order
//!     → Freeze as immutable RewritePipeline
//! ```
//!
//! # Design Decisions
//! - Rules are stateless after construction; one instance serves all requests
//! - Host comparisons are case-insensitive, TLD replacement is not
//! - First redirect wins; later rules are not evaluated

pub mod host;
pub mod hostname;
pub mod pipeline;
pub mod request;
pub mod rule;
pub mod subdomain;
pub mod top_level_domain;

pub use host::HostString;
pub use hostname::HostnameRedirector;
pub use pipeline::RewritePipeline;
pub use request::{RequestContext, RewriteRequest};
pub use rule::{Disposition, RewriteRule, RuleOptions};
pub use subdomain::SubdomainRedirector;
pub use top_level_domain::TopLevelDomainRedirector;
