use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::punch::PunchLogic;
use crate::errors::{AppError, AppResult};
use crate::models::punch_kind::PunchKind;
use crate::ui::messages::success;
use crate::utils::colors::{color_for_clock_state, colorize};
use crate::utils::time::parse_punch_at;
use chrono::{DateTime, FixedOffset};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<FixedOffset>) -> AppResult<()> {
    if let Commands::Punch {
        employee,
        kind,
        at,
        force,
    } = cmd
    {
        let kind = PunchKind::pk_from_str(kind).ok_or_else(|| AppError::InvalidPunchKind(kind.clone()))?;

        let at = match at {
            Some(s) => parse_punch_at(s, now)?,
            None => now,
        };

        let mut pool = open_pool(cfg)?;
        let (ev, state) = PunchLogic::apply(&mut pool, employee, kind, at, now, *force)?;

        success(format!(
            "{} recorded for {} at {} (#{})",
            kind.label(),
            employee,
            ev.timestamp,
            ev.id
        ));
        println!(
            "   State: {}",
            colorize(state.as_str(), color_for_clock_state(state))
        );
    }

    Ok(())
}
