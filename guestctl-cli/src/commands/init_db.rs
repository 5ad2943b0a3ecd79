//! Create the guest database and schema without starting the server

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use guestctl_server::db::{create_pool, ensure_schema};

use super::resolve_db_path;

#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Path to the SQLite guest database (default: ~/.guestctl/guests.db)
    #[arg(long, env = "GUESTS_DB_PATH")]
    pub db_path: Option<PathBuf>,
}

pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let db_path = resolve_db_path(args.db_path)?;

    let pool = create_pool(&db_path)
        .await
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    ensure_schema(&pool)
        .await
        .context("Failed to initialize guest schema")?;
    pool.close().await;

    println!("Guest database ready at {}", db_path.display());
    Ok(())
}
