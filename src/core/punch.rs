use crate::core::logic::Core;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_punch, require_employee};
use crate::errors::{AppError, AppResult};
use crate::models::clock_state::ClockState;
use crate::models::punch::PunchEvent;
use crate::models::punch_kind::PunchKind;
use chrono::{DateTime, FixedOffset};

/// High-level business logic for the `punch` command.
pub struct PunchLogic;

impl PunchLogic {
    /// Record `kind` for `employee_id` at `at`; `now` is stored as the creation time.
    ///
    /// The state reached by the punches of that day up to `at` must allow
    /// `kind`, unless `force` is set.
    pub fn apply(
        pool: &mut DbPool,
        employee_id: &str,
        kind: PunchKind,
        at: DateTime<FixedOffset>,
        now: DateTime<FixedOffset>,
        force: bool,
    ) -> AppResult<(PunchEvent, ClockState)> {
        require_employee(&pool.conn, employee_id)?;

        let state = Core::clock_state(&*pool, employee_id, at)?;
        if !force && !state.allows(kind) {
            return Err(AppError::InvalidTransition {
                kind: kind.to_string(),
                state: state.to_string(),
            });
        }

        let mut ev = PunchEvent::new(employee_id, kind, at, now);
        ev.id = insert_punch(&pool.conn, &ev)?;

        if let Err(e) = ttlog(
            &pool.conn,
            "punch",
            employee_id,
            &format!(
                "{} at {}{}",
                kind,
                ev.timestamp,
                if force { " (forced)" } else { "" }
            ),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        Ok((ev, ClockState::after(kind)))
    }
}
