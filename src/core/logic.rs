use crate::core::calculator::aggregate::{
    PunchStore, SummaryFilter, day_record, day_records, per_day_hours, rollup, summarize,
    summarize_all,
};
use crate::core::calculator::expected::DayPolicy;
use crate::errors::AppResult;
use crate::models::clock_state::ClockState;
use crate::models::day_record::DayRecord;
use crate::models::employee::Employee;
use crate::models::period::DateRange;
use crate::models::summary::{HoursBand, PeriodSummary, Rollup};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

/// One line of a report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub employee: Employee,
    pub summary: PeriodSummary,
    pub band: HoursBand,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub range: DateRange,
    pub rows: Vec<ReportRow>,
    pub rollup: Rollup,
}

/// Band thresholds, in total hours over the period.
#[derive(Debug, Clone, Copy)]
pub struct Bands {
    pub high: f64,
    pub regular: f64,
}

/// Entry point used by the commands: glues a store and a policy to the engine.
pub struct Core;

impl Core {
    pub fn build_day<S: PunchStore + ?Sized>(
        store: &S,
        subject_id: &str,
        date: NaiveDate,
        as_of: Option<DateTime<FixedOffset>>,
        policy: &dyn DayPolicy,
    ) -> AppResult<DayRecord> {
        let events = store.punches(subject_id, DateRange::single(date))?;
        day_record(subject_id, date, &events, as_of, policy)
    }

    pub fn build_days<S: PunchStore + ?Sized>(
        store: &S,
        subject_id: &str,
        range: DateRange,
        as_of: Option<DateTime<FixedOffset>>,
        policy: &dyn DayPolicy,
    ) -> AppResult<Vec<DayRecord>> {
        day_records(store, subject_id, range, as_of, policy)
    }

    pub fn period_summary(
        subject_id: &str,
        range: DateRange,
        records: &[DayRecord],
    ) -> AppResult<PeriodSummary> {
        summarize(subject_id, range.start(), range.end(), &per_day_hours(records))
    }

    /// State of `subject_id` at `as_of`, from the punches of that day up to `as_of`.
    pub fn clock_state<S: PunchStore + ?Sized>(
        store: &S,
        subject_id: &str,
        as_of: DateTime<FixedOffset>,
    ) -> AppResult<ClockState> {
        let punches: Vec<_> = store
            .punches(subject_id, DateRange::single(as_of.date_naive()))?
            .into_iter()
            .filter(|p| p.instant().is_some_and(|t| t <= as_of))
            .collect();

        Ok(ClockState::from_punches(&punches))
    }

    /// Summaries for `employees` (in the given order) that pass `filter`,
    /// with their band and the rollup of the retained rows.
    pub fn report<S: PunchStore + ?Sized>(
        store: &S,
        employees: &[Employee],
        range: DateRange,
        as_of: Option<DateTime<FixedOffset>>,
        policy: &dyn DayPolicy,
        filter: &SummaryFilter,
        bands: Bands,
    ) -> AppResult<Report> {
        let subjects: Vec<String> = employees.iter().map(|e| e.id.clone()).collect();
        let summaries = summarize_all(store, &subjects, range.start(), range.end(), as_of, policy)?;

        let rows: Vec<ReportRow> = employees
            .iter()
            .zip(summaries)
            .filter(|(_, s)| filter.matches(s))
            .map(|(e, s)| ReportRow {
                employee: e.clone(),
                band: HoursBand::classify(s.total_hours, bands.high, bands.regular),
                summary: s,
            })
            .collect();

        let kept: Vec<PeriodSummary> = rows.iter().map(|r| r.summary.clone()).collect();

        Ok(Report {
            range,
            rollup: rollup(&kept),
            rows,
        })
    }
}
