pub mod init_db;
pub mod serve;

use std::path::PathBuf;

use anyhow::{Context, Result};

pub use init_db::{run_init_db, InitDbArgs};
pub use serve::{run_serve, ServeArgs};

/// Explicit path, or ~/.guestctl/guests.db
pub(crate) fn resolve_db_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => {
            let home = dirs::home_dir().context("Could not determine home directory")?;
            Ok(home.join(".guestctl").join("guests.db"))
        }
    }
}
