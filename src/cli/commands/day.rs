use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::expected::{DayPolicy, FlatPolicy};
use crate::core::calculator::reducer::duration_to_hours;
use crate::core::logic::Core;
use crate::db::queries::{load_punches_by_date, require_employee};
use crate::errors::{AppError, AppResult};
use crate::models::interval::Interval;
use crate::ui::messages::{header, skipped_warning, warning};
use crate::utils::colors::{CYAN, GREY, RESET, color_for_status, colorize};
use crate::utils::date::{parse_date, weekday_short};
use crate::utils::table::{Column, Table};
use crate::utils::{hours2decimal, hours2readable};
use chrono::{DateTime, FixedOffset};

fn print_intervals(label: &str, intervals: &[Interval]) {
    println!("{}{}:{}", CYAN, label, RESET);
    if intervals.is_empty() {
        println!("  {}none{}", GREY, RESET);
        return;
    }
    for i in intervals {
        println!(
            "  {}  ({})",
            i.span_str(),
            hours2readable(duration_to_hours(i.duration()), false)
        );
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<FixedOffset>) -> AppResult<()> {
    if let Commands::Day {
        employee,
        date,
        details,
    } = cmd
    {
        let day = match date {
            Some(s) => parse_date(s).ok_or_else(|| AppError::InvalidDate(s.clone()))?,
            None => now.date_naive(),
        };

        let pool = open_pool(cfg)?;
        let emp = require_employee(&pool.conn, employee)?;
        let policy = FlatPolicy::from_config(cfg)?;

        let record = Core::build_day(&pool, &emp.id, day, Some(now), &policy)?;

        header(format!(
            "{} ({}) · {} ({})",
            day,
            weekday_short(day),
            emp.name,
            emp.id
        ));

        print_intervals("Work", &record.intervals);
        print_intervals("Breaks", &record.breaks);

        println!();
        println!(
            "{}Worked  :{} {} ({} h)",
            CYAN,
            RESET,
            hours2readable(record.total_worked_hours, false),
            hours2decimal(record.total_worked_hours)
        );
        println!(
            "{}Expected:{} {} h{}",
            CYAN,
            RESET,
            hours2decimal(policy.expected_hours(&emp.id, day)),
            if policy.is_rest_day(&emp.id, day) {
                " (rest day)"
            } else {
                ""
            }
        );
        println!(
            "{}Status  :{} {}",
            CYAN,
            RESET,
            colorize(record.status.as_str(), color_for_status(record.status))
        );
        if day == now.date_naive() && !record.has_clock_out && record.total_worked_hours > 0.0 {
            println!("{}(still open: counted up to {}){}", GREY, now.format("%H:%M"), RESET);
        }

        skipped_warning(record.skipped, &format!("{} on {}", emp.id, day));

        if *details {
            let loaded = load_punches_by_date(&pool.conn, &emp.id, day)?;

            println!();
            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("TIMESTAMP"),
                Column::left("KIND"),
                Column::left("SOURCE"),
            ])
            .with_separator(cfg.separator());

            for p in &loaded.punches {
                table.add_row(vec![
                    p.id.to_string(),
                    p.timestamp.clone(),
                    p.kind.to_db_str().to_string(),
                    p.source.clone(),
                ]);
            }
            print!("{}", table.render());

            if loaded.quarantined > 0 {
                warning(format!(
                    "{} stored punch(es) with an unknown kind not shown.",
                    loaded.quarantined
                ));
            }
        }
    }

    Ok(())
}
