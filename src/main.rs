//! Host redirect server.
//!
//! Runs a set of host-based redirect rules in front of a minimal fallback
//! handler.
//!
//! ```text
//!     Client Request        ┌──────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http server ─▶ rewrite pipeline            │
//!                           │                   │ subdomain                │
//!                           │                   │ top_level_domain         │
//!                           │                   │ hostname                 │
//!                           │                   ▼                          │
//!     301 + Location  ◀─────┼─── EndWithRedirect    Continue ─▶ fallback   │
//!                           └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use host_redirect::lifecycle::startup::{self, StartupOptions};

#[derive(Parser)]
#[command(name = "host-redirect")]
#[command(about = "Redirect requests to a canonical subdomain, TLD or hostname", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload rules when the configuration file changes
    #[arg(short, long, requires = "config")]
    watch: bool,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    startup::run(StartupOptions {
        config_path: cli.config,
        watch: cli.watch,
        bind_address: cli.bind,
    })
    .await?;

    Ok(())
}
