use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::expected::FlatPolicy;
use crate::core::logic::Core;
use crate::db::queries::{load_punches_in_range, require_employee};
use crate::errors::AppResult;
use crate::models::day_record::DayRecord;
use crate::ui::messages::{header, info, skipped_warning, warning};
use crate::utils::colors::{CYAN, RESET, color_for_status, colorize, colorize_optional};
use crate::utils::date::{resolve_period, weekday_short};
use crate::utils::hours2decimal;
use crate::utils::table::{Column, Table};
use chrono::{DateTime, FixedOffset};

fn hm_or_dash(t: Option<DateTime<FixedOffset>>) -> String {
    colorize_optional(
        &t.map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string()),
    )
}

fn day_row(r: &DayRecord) -> Vec<String> {
    let first_break = r.breaks.first();
    vec![
        r.date.to_string(),
        weekday_short(r.date).to_string(),
        hm_or_dash(r.first_in().map(|i| i.start)),
        hm_or_dash(first_break.map(|b| b.start)),
        hm_or_dash(first_break.map(|b| b.end)),
        hm_or_dash(r.last_out().map(|i| i.end)),
        hours2decimal(r.total_worked_hours),
        colorize(r.status.as_str(), color_for_status(r.status)),
    ]
}

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<FixedOffset>) -> AppResult<()> {
    if let Commands::List {
        employee,
        period,
        events,
    } = cmd
    {
        let range = resolve_period(period, now.date_naive())?;

        let pool = open_pool(cfg)?;
        let emp = require_employee(&pool.conn, employee)?;

        header(format!(
            "{} ({}) · {} → {}",
            emp.name,
            emp.id,
            range.start(),
            range.end()
        ));

        if *events {
            let loaded = load_punches_in_range(&pool.conn, &emp.id, range)?;
            if loaded.punches.is_empty() {
                info("No punches in this period.");
            } else {
                let mut table = Table::new(vec![
                    Column::right("ID"),
                    Column::left("DATE"),
                    Column::left("TIME"),
                    Column::left("KIND"),
                    Column::left("SOURCE"),
                ])
                .with_separator(cfg.separator());

                for p in &loaded.punches {
                    table.add_row(vec![
                        p.id.to_string(),
                        p.calendar_day()
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| p.timestamp.clone()),
                        p.time_str(),
                        p.kind.to_db_str().to_string(),
                        p.source.clone(),
                    ]);
                }
                print!("{}", table.render());
            }
            if loaded.quarantined > 0 {
                warning(format!(
                    "{} stored punch(es) with an unknown kind not shown.",
                    loaded.quarantined
                ));
            }
            return Ok(());
        }

        let policy = FlatPolicy::from_config(cfg)?;
        let records = Core::build_days(&pool, &emp.id, range, Some(now), &policy)?;
        let summary = Core::period_summary(&emp.id, range, &records)?;

        let mut table = Table::new(vec![
            Column::left("DATE"),
            Column::left("DAY"),
            Column::left("IN"),
            Column::left("BREAK"),
            Column::left("RESUME"),
            Column::left("OUT"),
            Column::right("HOURS"),
            Column::left("STATUS"),
        ])
        .with_separator(cfg.separator());

        for r in &records {
            table.add_row(day_row(r));
        }
        print!("{}", table.render());

        println!();
        println!(
            "{}Total:{} {} h | {}Days worked:{} {} | {}Average:{} {} h/day",
            CYAN,
            RESET,
            hours2decimal(summary.total_hours),
            CYAN,
            RESET,
            summary.days_worked,
            CYAN,
            RESET,
            hours2decimal(summary.average_hours_per_day)
        );

        skipped_warning(records.iter().map(|r| r.skipped).sum(), &emp.id);
    }

    Ok(())
}
