use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::parse_date;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTALS
    //
    let employees: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
    let punches: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM punches", [], |row| row.get(0))?;

    println!(
        "{}• Employees:{} {}{}{}",
        CYAN, RESET, GREEN, employees, RESET
    );
    println!(
        "{}• Total punches:{} {}{}{}",
        CYAN, RESET, GREEN, punches, RESET
    );

    //
    // 3) DATE RANGE
    //
    let first_day: Option<String> = pool
        .conn
        .query_row(
            "SELECT substr(timestamp, 1, 10) FROM punches ORDER BY timestamp ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let last_day: Option<String> = pool
        .conn
        .query_row(
            "SELECT substr(timestamp, 1, 10) FROM punches ORDER BY timestamp DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    let fmt_first = first_day
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_day
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE PUNCHES/DAY
    //
    if let (Some(d1), Some(d2)) = (
        first_day.as_deref().and_then(parse_date),
        last_day.as_deref().and_then(parse_date),
    ) {
        let days = (d2 - d1).num_days() + 1;
        let avg = punches as f64 / days.max(1) as f64;
        println!("{}• Average punches/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
