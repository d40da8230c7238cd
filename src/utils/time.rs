//! Time utilities: parsing punch timestamps, HH:MM and work durations.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Parse a stored punch timestamp.
///
/// Accepts RFC 3339 (`2025-09-01T08:00:00+02:00`, `2025-09-01T06:00:00Z`) and the
/// naive forms `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM[:SS]`, which are read as UTC.
pub fn parse_instant(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let naive_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    for fmt in naive_formats.iter() {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&ndt).fixed_offset());
        }
    }

    None
}

/// Like [`parse_instant`], but for user input where a bad value is an error.
pub fn parse_instant_arg(s: &str) -> AppResult<DateTime<FixedOffset>> {
    parse_instant(s).ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Resolve the `--at` value of a punch relative to `now`.
///
/// - RFC 3339 → as given
/// - `HH:MM` → that time on `now`'s date, in `now`'s offset
/// - `YYYY-MM-DD HH:MM[:SS]` → in `now`'s offset
pub fn parse_punch_at(s: &str, now: DateTime<FixedOffset>) -> AppResult<DateTime<FixedOffset>> {
    let s = s.trim();
    let err = || AppError::InvalidTimestamp(s.to_string());

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt);
    }

    let offset = *now.offset();

    if let Some(t) = parse_time(s) {
        let ndt = now.date_naive().and_time(t);
        return offset.from_local_datetime(&ndt).single().ok_or_else(err);
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return offset.from_local_datetime(&ndt).single().ok_or_else(err);
        }
    }

    Err(err())
}

/// Parse a work duration into minutes.
///
/// Supported: `8h`, `7h30m`, `7h 30m`, `450m`, `7:30`, `7.5` (hours).
pub fn parse_duration_to_minutes(s: &str) -> AppResult<i64> {
    let raw = s.trim().to_lowercase();
    let err = || AppError::InvalidDuration(s.to_string());

    if raw.is_empty() {
        return Err(err());
    }

    // HH:MM
    if let Some((h, m)) = raw.split_once(':') {
        let h: i64 = h.trim().parse().map_err(|_| err())?;
        let m: i64 = m.trim().parse().map_err(|_| err())?;
        if !(0..60).contains(&m) || h < 0 {
            return Err(err());
        }
        return Ok(h * 60 + m);
    }

    // 7h30m / 8h / 450m
    if raw.contains('h') || raw.ends_with('m') {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let (h_part, rest) = match compact.split_once('h') {
            Some((h, rest)) => (Some(h), rest),
            None => (None, compact.as_str()),
        };

        let mut total = 0;
        if let Some(h) = h_part {
            total += h.parse::<i64>().map_err(|_| err())? * 60;
        }
        let m_str = rest.trim_end_matches('m');
        if !m_str.is_empty() {
            total += m_str.parse::<i64>().map_err(|_| err())?;
        }
        return Ok(total);
    }

    // Decimal hours
    let hours: f64 = raw.parse().map_err(|_| err())?;
    if !hours.is_finite() || hours < 0.0 {
        return Err(err());
    }
    Ok((hours * 60.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(parse_duration_to_minutes("8h").unwrap(), 480);
        assert_eq!(parse_duration_to_minutes("7h 30m").unwrap(), 450);
        assert_eq!(parse_duration_to_minutes("450m").unwrap(), 450);
        assert_eq!(parse_duration_to_minutes("7:30").unwrap(), 450);
        assert_eq!(parse_duration_to_minutes("7.5").unwrap(), 450);
        assert!(parse_duration_to_minutes("7:75").is_err());
        assert!(parse_duration_to_minutes("").is_err());
    }

    #[test]
    fn punch_at_uses_now_offset_for_naive_input() {
        let now = DateTime::parse_from_rfc3339("2025-09-01T18:00:00+02:00").unwrap();

        let t = parse_punch_at("08:15", now).unwrap();
        assert_eq!(t.to_rfc3339(), "2025-09-01T08:15:00+02:00");

        let t = parse_punch_at("2025-08-29 17:00", now).unwrap();
        assert_eq!(t.to_rfc3339(), "2025-08-29T17:00:00+02:00");

        let t = parse_punch_at("2025-09-01T06:00:00Z", now).unwrap();
        assert_eq!(t.offset().local_minus_utc(), 0);

        assert!(parse_punch_at("yesterday", now).is_err());
    }
}
