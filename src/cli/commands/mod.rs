pub mod backup;
pub mod config;
pub mod day;
pub mod db;
pub mod del;
pub mod employee;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod punch;
pub mod report;
pub mod status;

use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use std::path::Path;

/// Open the configured database, bringing its schema up to date.
/// A missing database file is an error: `init` creates it.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    if !Path::new(&cfg.database).exists() {
        return Err(AppError::Other(format!(
            "Database not found: {} (run `punchclock init` first)",
            cfg.database
        )));
    }

    let pool = DbPool::new(&cfg.database)?;
    run_pending_migrations(&pool.conn)?;
    Ok(pool)
}
