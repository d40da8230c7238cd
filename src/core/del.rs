use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_punch, delete_punches_by_date, load_punch, load_punches_by_date, require_employee,
};
use crate::errors::{AppError, AppResult};
use crate::models::punch::PunchEvent;
use chrono::NaiveDate;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete a single punch by id and return it.
    pub fn punch(pool: &mut DbPool, id: i64) -> AppResult<PunchEvent> {
        let ev = load_punch(&pool.conn, id)?.ok_or(AppError::PunchNotFound(id))?;
        delete_punch(&pool.conn, id)?;

        let _ = ttlog(
            &pool.conn,
            "del",
            &ev.subject_id,
            &format!("Deleted punch #{} ({} at {})", id, ev.kind, ev.timestamp),
        );

        Ok(ev)
    }

    /// Number of punches `employee_id` has on `date`, failing when there are none.
    pub fn count_for_date(pool: &DbPool, employee_id: &str, date: NaiveDate) -> AppResult<usize> {
        require_employee(&pool.conn, employee_id)?;

        let loaded = load_punches_by_date(&pool.conn, employee_id, date)?;
        let n = loaded.punches.len() + loaded.quarantined;
        if n == 0 {
            return Err(AppError::NoPunchesForDate(format!("{} on {}", employee_id, date)));
        }
        Ok(n)
    }

    /// Delete every punch of `employee_id` on `date`.
    pub fn day(pool: &mut DbPool, employee_id: &str, date: NaiveDate) -> AppResult<usize> {
        Self::count_for_date(pool, employee_id, date)?;

        let n = delete_punches_by_date(&pool.conn, employee_id, date)?;

        let _ = ttlog(
            &pool.conn,
            "del",
            employee_id,
            &format!("Deleted {} punch(es) on {}", n, date),
        );

        Ok(n)
    }
}
