use super::interval::Interval;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Attendance outcome of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Complete,
    Incomplete,
    Absent,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Complete => "complete",
            DayStatus::Incomplete => "incomplete",
            DayStatus::Absent => "absent",
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One subject's derived view of one calendar day. Never stored.
#[derive(Debug, Clone, Serialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub subject_id: String,
    pub total_worked_hours: f64,
    pub intervals: Vec<Interval>,
    pub breaks: Vec<Interval>,
    pub has_clock_out: bool,
    pub status: DayStatus,
    /// Punches dropped because their timestamp could not be parsed.
    pub skipped: usize,
}

impl DayRecord {
    pub fn first_in(&self) -> Option<&Interval> {
        self.intervals.first()
    }

    /// Last work interval, only when the day was closed by a clock-out.
    pub fn last_out(&self) -> Option<&Interval> {
        self.intervals.last().filter(|_| self.has_clock_out)
    }
}
