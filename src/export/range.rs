use crate::errors::AppResult;
use crate::models::period::DateRange;
use crate::utils::date::{last_day_of_month, month_name, parse_date, resolve_period};
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;

/// Resolve `--range`.
///
/// - `None`  → current month
/// - `all`   → first to last day with punches (`None` when there are none)
/// - anything else → [`crate::utils::date::parse_period`]
pub(crate) fn resolve_range(
    conn: &Connection,
    range: &Option<String>,
    today: NaiveDate,
) -> AppResult<Option<DateRange>> {
    match range {
        Some(r) if r.trim().eq_ignore_ascii_case("all") => stored_bounds(conn),
        _ => resolve_period(range, today).map(Some),
    }
}

fn stored_bounds(conn: &Connection) -> AppResult<Option<DateRange>> {
    let (first, last): (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(substr(timestamp, 1, 10)), MAX(substr(timestamp, 1, 10)) FROM punches",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    match (first.as_deref().and_then(parse_date), last.as_deref().and_then(parse_date)) {
        (Some(f), Some(l)) => Ok(Some(DateRange::new(f, l)?)),
        _ => Ok(None),
    }
}

/// Human title for the exported period.
pub(crate) fn range_title(range: &DateRange) -> String {
    let (s, e) = (range.start(), range.end());

    if s == e {
        return s.format("%Y-%m-%d").to_string();
    }

    if s.day() == 1 && last_day_of_month(s.year(), s.month()) == Some(e) {
        let month = month_name(s.month());
        return format!("{} {}", month, s.year());
    }

    format!("{} to {}", s.format("%Y-%m-%d"), e.format("%Y-%m-%d"))
}
