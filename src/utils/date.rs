use crate::errors::{AppError, AppResult};
use crate::models::period::DateRange;
use chrono::{Datelike, NaiveDate, Weekday};

/// Resolve a single period token into its first and last day.
///
/// - `YYYY-MM-DD` → that day
/// - `YYYY-MM`    → the whole month
/// - `YYYY`       → the whole year
pub fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let p = p.trim();

    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if p.len() == 7
        && let Ok(first) = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
    {
        let last = last_day_of_month(first.year(), first.month())
            .ok_or_else(|| AppError::InvalidPeriod(p.to_string()))?;
        return Ok((first, last));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        let first = NaiveDate::from_ymd_opt(year, 1, 1);
        let last = NaiveDate::from_ymd_opt(year, 12, 31);
        if let (Some(f), Some(l)) = (first, last) {
            return Ok((f, l));
        }
    }

    Err(AppError::InvalidPeriod(p.to_string()))
}

/// Parse a period expression into an inclusive range.
///
/// Accepts a single token (see [`period_bounds`]) or `START:END` where both
/// sides use the same format, e.g. `2025-09:2025-11`.
pub fn parse_period(p: &str) -> AppResult<DateRange> {
    if let Some((start_raw, end_raw)) = p.split_once(':') {
        let (start_raw, end_raw) = (start_raw.trim(), end_raw.trim());

        if start_raw.len() != end_raw.len() {
            return Err(AppError::InvalidPeriod(format!(
                "{p}: start and end must have the same format"
            )));
        }

        let (start, _) = period_bounds(start_raw)?;
        let (_, end) = period_bounds(end_raw)?;
        return DateRange::new(start, end);
    }

    let (start, end) = period_bounds(p)?;
    DateRange::new(start, end)
}

/// `None` → current month.
pub fn resolve_period(period: &Option<String>, today: NaiveDate) -> AppResult<DateRange> {
    match period {
        Some(p) => parse_period(p),
        None => current_month(today),
    }
}

pub fn current_month(today: NaiveDate) -> AppResult<DateRange> {
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .ok_or_else(|| AppError::InvalidDate(today.to_string()))?;
    let last = last_day_of_month(today.year(), today.month())
        .ok_or_else(|| AppError::InvalidDate(today.to_string()))?;
    DateRange::new(first, last)
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Weekday names as found in the config file (`sat`, `Saturday`, `SUN`, ...).
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    s.trim().parse::<Weekday>().ok()
}

pub fn weekday_short(d: NaiveDate) -> &'static str {
    match d.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

pub fn month_name(m: u32) -> &'static str {
    match m {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}
