use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::aggregate::SummaryFilter;
use crate::core::calculator::expected::FlatPolicy;
use crate::core::logic::{Bands, Core};
use crate::db::queries::{list_employees, require_employee};
use crate::errors::AppResult;
use crate::models::employee::Role;
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, RESET, color_for_band, colorize, colorize_optional};
use crate::utils::date::resolve_period;
use crate::utils::hours2decimal;
use crate::utils::table::{Column, Table};
use chrono::{DateTime, FixedOffset};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<FixedOffset>) -> AppResult<()> {
    if let Commands::Report {
        period,
        employee,
        min_hours,
        max_hours,
        all_roles,
    } = cmd
    {
        let range = resolve_period(period, now.date_naive())?;

        let pool = open_pool(cfg)?;
        let policy = FlatPolicy::from_config(cfg)?;

        let employees = match employee {
            Some(id) => vec![require_employee(&pool.conn, id)?],
            None if *all_roles => list_employees(&pool.conn, None)?,
            None => list_employees(&pool.conn, Some(Role::Employee))?,
        };

        let filter = SummaryFilter {
            subject_id: employee.clone(),
            min_hours: *min_hours,
            max_hours: *max_hours,
        };
        let bands = Bands {
            high: cfg.high_hours_threshold,
            regular: cfg.regular_hours_threshold,
        };

        let report = Core::report(&pool, &employees, range, Some(now), &policy, &filter, bands)?;

        header(format!("Hours report · {} → {}", range.start(), range.end()));

        if report.rows.is_empty() {
            info("No employees match the selected filters.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::left("ID"),
            Column::left("NAME"),
            Column::left("DEPARTMENT"),
            Column::right("TOTAL"),
            Column::right("DAYS"),
            Column::right("AVG/DAY"),
            Column::left("BAND"),
        ])
        .with_separator(cfg.separator());

        for row in &report.rows {
            table.add_row(vec![
                row.employee.id.clone(),
                row.employee.name.clone(),
                colorize_optional(row.employee.department_str()),
                hours2decimal(row.summary.total_hours),
                row.summary.days_worked.to_string(),
                hours2decimal(row.summary.average_hours_per_day),
                colorize(row.band.as_str(), color_for_band(row.band)),
            ]);
        }
        print!("{}", table.render());

        let r = &report.rollup;
        println!();
        println!(
            "{}Employees:{} {} | {}Total:{} {} h | {}Days worked:{} {} | {}Average:{} {} h/employee",
            CYAN,
            RESET,
            r.subjects,
            CYAN,
            RESET,
            hours2decimal(r.total_hours),
            CYAN,
            RESET,
            r.total_days_worked,
            CYAN,
            RESET,
            hours2decimal(r.average_hours_per_subject)
        );
    }

    Ok(())
}
