//! HTTP server command
//!
//! Opens the guest database, ensures the schema and serves the guest API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use guestctl_server::db::{create_pool, ensure_schema};
use guestctl_server::http::{run_server, ServerConfig};
use guestctl_server::{EventSchedule, GuestRegistry};

use super::resolve_db_path;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "GUESTCTL_BIND", default_value = "127.0.0.1:6789")]
    pub bind: SocketAddr,

    /// Event date and time, YYYY-MM-DD HH:MM:SS (tokens expire one day later)
    #[arg(long, env = "EVENT_DATE")]
    pub event_date: EventSchedule,

    /// Path to the SQLite guest database (default: ~/.guestctl/guests.db)
    #[arg(long, env = "GUESTS_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_path = resolve_db_path(args.db_path)?;
    tracing::info!("Opening guest database at {}", db_path.display());

    let pool = create_pool(&db_path)
        .await
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    ensure_schema(&pool)
        .await
        .context("Failed to initialize guest schema")?;

    let registry = GuestRegistry::new(pool, args.event_date);
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.timeout),
    };

    // Blocks until shutdown
    run_server(registry, config).await.context("Server error")?;

    Ok(())
}
