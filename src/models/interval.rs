use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use serde::Serialize;

/// A closed time span `[start, end]` derived by the reducer.
/// Invariant: `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl Interval {
    /// Build an interval, clamping `end` to `start` if the caller passes
    /// an end that lies before the start.
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whole minutes between start and end; leftover seconds are dropped.
    pub fn minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Length of the part shared with `other` (zero when disjoint).
    pub fn overlap(&self, other: &Interval) -> Duration {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end > start {
            end - start
        } else {
            Duration::zero()
        }
    }

    /// Clip the interval to the calendar day `date` (in the interval's own offset).
    /// Returns `None` when nothing of the interval falls on that day.
    pub fn clip_to_day(&self, date: NaiveDate) -> Option<Interval> {
        let tz = *self.start.offset();
        let day_start = tz
            .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
            .single()?;
        let day_end = tz
            .from_local_datetime(&date.succ_opt()?.and_hms_opt(0, 0, 0)?)
            .single()?;

        let start = self.start.max(day_start);
        let end = self.end.min(day_end);

        if end < start || (end == start && self.start != self.end) {
            return None;
        }
        Some(Interval { start, end })
    }

    pub fn span_str(&self) -> String {
        format!(
            "{}–{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Sum of the lengths of `intervals`, each counted in whole minutes.
pub fn total_duration(intervals: &[Interval]) -> Duration {
    Duration::minutes(intervals.iter().map(Interval::minutes).sum())
}
