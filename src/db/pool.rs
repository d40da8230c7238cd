//! SQLite connection pool wrapper (lightweight for CLI usage).

use crate::core::calculator::aggregate::PunchStore;
use crate::db::queries::load_punches_in_range;
use crate::errors::AppResult;
use crate::models::period::DateRange;
use crate::models::punch::PunchEvent;
use crate::ui::messages::warning;
use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }
}

impl PunchStore for DbPool {
    fn punches(&self, subject_id: &str, range: DateRange) -> AppResult<Vec<PunchEvent>> {
        let loaded = load_punches_in_range(&self.conn, subject_id, range)?;

        if loaded.quarantined > 0 {
            warning(format!(
                "{} stored punch(es) of {} have an unknown kind and were ignored.",
                loaded.quarantined, subject_id
            ));
        }

        Ok(loaded.punches)
    }
}
