//! Aggregation: per-day records, period summaries and cross-subject rollups.
//!
//! Every day of a range is visited, whether or not it has punches, so that
//! absences show up as zero-hour days instead of silently disappearing.

use crate::core::calculator::classify::{apply_rest_day, classify_day};
use crate::core::calculator::expected::DayPolicy;
use crate::core::calculator::reducer::{Reduction, reduce};
use crate::errors::AppResult;
use crate::models::day_record::{DayRecord, DayStatus};
use crate::models::period::DateRange;
use crate::models::punch::PunchEvent;
use crate::models::summary::{PeriodSummary, Rollup};
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::collections::BTreeMap;

/// Source of punches for one subject over a date window.
/// No ordering guarantee is required from implementations.
pub trait PunchStore {
    fn punches(&self, subject_id: &str, range: DateRange) -> AppResult<Vec<PunchEvent>>;
}

/// In-memory store: filters by subject and calendar day.
impl PunchStore for [PunchEvent] {
    fn punches(&self, subject_id: &str, range: DateRange) -> AppResult<Vec<PunchEvent>> {
        Ok(self
            .iter()
            .filter(|p| p.subject_id == subject_id)
            .filter(|p| p.calendar_day().is_some_and(|d| range.contains(d)))
            .cloned()
            .collect())
    }
}

/// Build the record for one day from that day's punches.
///
/// The day is an open period only when it is the calendar day of `as_of`.
pub fn day_record(
    subject_id: &str,
    date: NaiveDate,
    events: &[PunchEvent],
    as_of: Option<DateTime<FixedOffset>>,
    policy: &dyn DayPolicy,
) -> AppResult<DayRecord> {
    let open_period = as_of.is_some_and(|now| now.date_naive() == date);
    let raw = reduce(events, as_of, open_period)?;

    let clipped = Reduction {
        work: raw.work.iter().filter_map(|i| i.clip_to_day(date)).collect(),
        breaks: raw.breaks.iter().filter_map(|i| i.clip_to_day(date)).collect(),
        skipped: raw.skipped,
        has_clock_out: raw.has_clock_out,
    };

    let mut record = DayRecord {
        date,
        subject_id: subject_id.to_string(),
        total_worked_hours: clipped.net_hours(),
        intervals: clipped.work,
        breaks: clipped.breaks,
        has_clock_out: clipped.has_clock_out,
        status: DayStatus::Absent,
        skipped: clipped.skipped,
    };

    let status = classify_day(&record, policy.expected_hours(subject_id, date));
    record.status = apply_rest_day(status, &record, policy.is_rest_day(subject_id, date));

    Ok(record)
}

/// One record per calendar day of `range`, ascending.
pub fn day_records<S: PunchStore + ?Sized>(
    store: &S,
    subject_id: &str,
    range: DateRange,
    as_of: Option<DateTime<FixedOffset>>,
    policy: &dyn DayPolicy,
) -> AppResult<Vec<DayRecord>> {
    let punches = store.punches(subject_id, range)?;

    let mut by_day: BTreeMap<NaiveDate, Vec<PunchEvent>> = BTreeMap::new();
    for p in punches {
        if let Some(day) = p.calendar_day()
            && range.contains(day)
        {
            by_day.entry(day).or_default().push(p);
        }
    }

    range
        .days()
        .map(|day| {
            let events = by_day.get(&day).map(Vec::as_slice).unwrap_or(&[]);
            day_record(subject_id, day, events, as_of, policy)
        })
        .collect()
}

/// Worked hours keyed by date.
pub fn per_day_hours(records: &[DayRecord]) -> BTreeMap<NaiveDate, f64> {
    records
        .iter()
        .map(|r| (r.date, r.total_worked_hours))
        .collect()
}

/// Summarize one subject over the inclusive range `[start, end]`.
///
/// Days missing from `per_day` count as zero. Non-finite or negative values
/// are treated as zero as well.
pub fn summarize(
    subject_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    per_day: &BTreeMap<NaiveDate, f64>,
) -> AppResult<PeriodSummary> {
    let range = DateRange::new(start, end)?;

    let mut total_hours = 0.0;
    let mut days_worked = 0u32;

    for day in range.days() {
        let h = per_day.get(&day).copied().unwrap_or(0.0);
        if h.is_finite() && h > 0.0 {
            total_hours += h;
            days_worked += 1;
        }
    }

    let average_hours_per_day = if days_worked > 0 {
        total_hours / days_worked as f64
    } else {
        0.0
    };

    Ok(PeriodSummary {
        subject_id: subject_id.to_string(),
        total_hours,
        days_worked,
        average_hours_per_day,
    })
}

/// One summary per subject, in the order given.
pub fn summarize_all<S: PunchStore + ?Sized>(
    store: &S,
    subjects: &[String],
    start: NaiveDate,
    end: NaiveDate,
    as_of: Option<DateTime<FixedOffset>>,
    policy: &dyn DayPolicy,
) -> AppResult<Vec<PeriodSummary>> {
    let range = DateRange::new(start, end)?;

    subjects
        .iter()
        .map(|subject| {
            let records = day_records(store, subject, range, as_of, policy)?;
            summarize(subject, start, end, &per_day_hours(&records))
        })
        .collect()
}

/// Totals across a set of summaries.
pub fn rollup(summaries: &[PeriodSummary]) -> Rollup {
    let total_hours: f64 = summaries.iter().map(|s| s.total_hours).sum();
    let total_days_worked: u32 = summaries.iter().map(|s| s.days_worked).sum();

    let average_hours_per_subject = if summaries.is_empty() {
        0.0
    } else {
        total_hours / summaries.len() as f64
    };

    Rollup {
        subjects: summaries.len(),
        total_hours,
        total_days_worked,
        average_hours_per_subject,
    }
}

/// Report filters: single subject and/or a total-hours window.
#[derive(Debug, Clone, Default)]
pub struct SummaryFilter {
    pub subject_id: Option<String>,
    pub min_hours: Option<f64>,
    pub max_hours: Option<f64>,
}

impl SummaryFilter {
    pub fn matches(&self, s: &PeriodSummary) -> bool {
        if let Some(id) = &self.subject_id
            && &s.subject_id != id
        {
            return false;
        }
        if let Some(min) = self.min_hours
            && s.total_hours < min
        {
            return false;
        }
        if let Some(max) = self.max_hours
            && s.total_hours > max
        {
            return false;
        }
        true
    }

    pub fn apply(&self, summaries: Vec<PeriodSummary>) -> Vec<PeriodSummary> {
        summaries.into_iter().filter(|s| self.matches(s)).collect()
    }
}
