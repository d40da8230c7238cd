use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::expected::{DayPolicy, FlatPolicy};
use crate::core::logic::Core;
use crate::db::queries::require_employee;
use crate::errors::AppResult;
use crate::ui::messages::skipped_warning;
use crate::utils::colors::{CYAN, RESET, color_for_clock_state, color_for_status, colorize};
use crate::utils::{hours2decimal, hours2readable};
use chrono::{DateTime, FixedOffset};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<FixedOffset>) -> AppResult<()> {
    if let Commands::Status { employee } = cmd {
        let pool = open_pool(cfg)?;
        let emp = require_employee(&pool.conn, employee)?;
        let policy = FlatPolicy::from_config(cfg)?;

        let state = Core::clock_state(&pool, &emp.id, now)?;
        let today = Core::build_day(&pool, &emp.id, now.date_naive(), Some(now), &policy)?;
        skipped_warning(today.skipped, &emp.id);

        let next: Vec<&str> = state.allowed().iter().map(|k| k.to_db_str()).collect();
        let expected = policy.expected_hours(&emp.id, today.date);

        println!("👤 {} ({})", emp.name, emp.id);
        println!(
            "{}State   :{} {}",
            CYAN,
            RESET,
            colorize(state.as_str(), color_for_clock_state(state))
        );
        println!(
            "{}Today   :{} {} ({} h) of {} h expected",
            CYAN,
            RESET,
            hours2readable(today.total_worked_hours, false),
            hours2decimal(today.total_worked_hours),
            hours2decimal(expected)
        );
        println!(
            "{}Status  :{} {}",
            CYAN,
            RESET,
            colorize(today.status.as_str(), color_for_status(today.status))
        );
        println!("{}Next    :{} {}", CYAN, RESET, next.join(" | "));
    }

    Ok(())
}
