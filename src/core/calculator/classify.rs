use crate::models::day_record::{DayRecord, DayStatus};

/// Classify a day from its worked hours and whether a clock-out happened.
///
/// - `Absent`: no time worked
/// - `Complete`: clocked out and reached `expected_daily_hours`
/// - `Incomplete`: anything in between (still open, or short)
pub fn classify_day(record: &DayRecord, expected_daily_hours: f64) -> DayStatus {
    status_for(record.total_worked_hours, record.has_clock_out, expected_daily_hours)
}

pub fn status_for(hours: f64, has_clock_out: bool, expected_daily_hours: f64) -> DayStatus {
    if hours.is_nan() || hours <= 0.0 {
        return DayStatus::Absent;
    }

    if has_clock_out && hours >= expected_daily_hours {
        DayStatus::Complete
    } else {
        DayStatus::Incomplete
    }
}

/// Rest-day override coming from the day policy.
///
/// A rest day counts as `Complete` without any work. A rest day with an
/// unfinished shift (hours but no clock-out) keeps its computed status.
pub fn apply_rest_day(status: DayStatus, record: &DayRecord, is_rest_day: bool) -> DayStatus {
    if !is_rest_day {
        return status;
    }

    if record.total_worked_hours > 0.0 && !record.has_clock_out {
        status
    } else {
        DayStatus::Complete
    }
}
