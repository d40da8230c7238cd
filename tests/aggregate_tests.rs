use chrono::{DateTime, FixedOffset, NaiveDate, Weekday};
use punchclock::core::calculator::aggregate::{
    SummaryFilter, day_record, day_records, rollup, summarize, summarize_all,
};
use punchclock::core::calculator::classify::status_for;
use punchclock::core::calculator::expected::{DayPolicy, FlatPolicy};
use punchclock::errors::AppError;
use punchclock::models::clock_state::ClockState;
use punchclock::models::day_record::DayStatus;
use punchclock::models::punch::PunchEvent;
use punchclock::models::punch_kind::PunchKind;
use punchclock::models::summary::HoursBand;
use std::collections::BTreeMap;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn at(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("valid rfc3339")
}

fn p(id: i64, subject: &str, kind: PunchKind, ts: &str) -> PunchEvent {
    PunchEvent::raw(id, subject, kind, ts)
}

fn policy() -> FlatPolicy {
    FlatPolicy::new(8.0, vec![Weekday::Sat, Weekday::Sun])
}

/// E1: 8h on Mon 2025-09-01, 6h on Wed 2025-09-03. E2: 4h on Tue 2025-09-02.
fn store() -> Vec<PunchEvent> {
    vec![
        p(1, "E1", PunchKind::ClockIn, "2025-09-01T08:00:00+00:00"),
        p(2, "E1", PunchKind::BreakStart, "2025-09-01T12:00:00+00:00"),
        p(3, "E1", PunchKind::BreakEnd, "2025-09-01T13:00:00+00:00"),
        p(4, "E1", PunchKind::ClockOut, "2025-09-01T17:00:00+00:00"),
        p(5, "E1", PunchKind::ClockIn, "2025-09-03T09:00:00+00:00"),
        p(6, "E1", PunchKind::ClockOut, "2025-09-03T15:00:00+00:00"),
        p(7, "E2", PunchKind::ClockIn, "2025-09-02T08:00:00+00:00"),
        p(8, "E2", PunchKind::ClockOut, "2025-09-02T12:00:00+00:00"),
    ]
}

#[test]
fn test_summarize_counts_only_days_with_hours() {
    let mut per_day = BTreeMap::new();
    per_day.insert(d("2025-09-01"), 8.0);
    per_day.insert(d("2025-09-02"), 0.0);
    per_day.insert(d("2025-09-03"), 6.0);

    let s = summarize("E1", d("2025-09-01"), d("2025-09-03"), &per_day).unwrap();

    assert_eq!(s.subject_id, "E1");
    assert_eq!(s.total_hours, 14.0);
    assert_eq!(s.days_worked, 2);
    assert_eq!(s.average_hours_per_day, 7.0);
}

#[test]
fn test_summarize_missing_days_are_zero_and_average_is_guarded() {
    let s = summarize("E1", d("2025-09-01"), d("2025-09-30"), &BTreeMap::new()).unwrap();

    assert_eq!(s.total_hours, 0.0);
    assert_eq!(s.days_worked, 0);
    assert_eq!(s.average_hours_per_day, 0.0);
}

#[test]
fn test_summarize_ignores_days_outside_range() {
    let mut per_day = BTreeMap::new();
    per_day.insert(d("2025-08-31"), 8.0);
    per_day.insert(d("2025-09-01"), 5.0);

    let s = summarize("E1", d("2025-09-01"), d("2025-09-01"), &per_day).unwrap();
    assert_eq!(s.total_hours, 5.0);
    assert_eq!(s.days_worked, 1);
}

#[test]
fn test_summarize_rejects_inverted_range() {
    let err = summarize("E1", d("2025-09-10"), d("2025-09-01"), &BTreeMap::new()).unwrap_err();
    assert!(matches!(err, AppError::InvalidRange { .. }));
}

#[test]
fn test_classification() {
    assert_eq!(status_for(6.0, true, 8.0), DayStatus::Incomplete);
    assert_eq!(status_for(0.0, false, 8.0), DayStatus::Absent);
    assert_eq!(status_for(8.0, true, 8.0), DayStatus::Complete);
    assert_eq!(status_for(9.0, false, 8.0), DayStatus::Incomplete);
}

#[test]
fn test_day_record_regular_day() {
    let punches = store();
    let rec = day_record("E1", d("2025-09-01"), &punches[..4], None, &policy()).unwrap();

    assert_eq!(rec.total_worked_hours, 8.0);
    assert_eq!(rec.intervals.len(), 2);
    assert_eq!(rec.breaks.len(), 1);
    assert!(rec.has_clock_out);
    assert_eq!(rec.status, DayStatus::Complete);
    assert_eq!(rec.first_in().unwrap().start, at("2025-09-01T08:00:00+00:00"));
    assert_eq!(rec.last_out().unwrap().end, at("2025-09-01T17:00:00+00:00"));
}

#[test]
fn test_day_record_open_day_uses_as_of() {
    let punches = vec![p(1, "E1", PunchKind::ClockIn, "2025-09-01T08:00:00+00:00")];
    let now = at("2025-09-01T10:30:00+00:00");

    let rec = day_record("E1", d("2025-09-01"), &punches, Some(now), &policy()).unwrap();

    assert_eq!(rec.total_worked_hours, 2.5);
    assert!(!rec.has_clock_out);
    assert_eq!(rec.status, DayStatus::Incomplete);
    // the shift is still running: an interval but no clock-out
    assert_eq!(rec.intervals.len(), 1);
    assert!(rec.last_out().is_none());
}

#[test]
fn test_day_record_past_day_without_clock_out_is_closed() {
    let punches = vec![p(1, "E1", PunchKind::ClockIn, "2025-09-01T08:00:00+00:00")];
    let now = at("2025-09-05T10:00:00+00:00");

    let rec = day_record("E1", d("2025-09-01"), &punches, Some(now), &policy()).unwrap();

    assert_eq!(rec.total_worked_hours, 0.0);
    assert_eq!(rec.status, DayStatus::Absent);
}

#[test]
fn test_rest_day_counts_as_complete() {
    // 2025-09-06 is a Saturday
    let rec = day_record("E1", d("2025-09-06"), &[], None, &policy()).unwrap();
    assert_eq!(rec.status, DayStatus::Complete);
    assert_eq!(rec.total_worked_hours, 0.0);
    assert_eq!(policy().expected_hours("E1", d("2025-09-06")), 0.0);

    let punches = vec![
        p(1, "E1", PunchKind::ClockIn, "2025-09-06T09:00:00+00:00"),
        p(2, "E1", PunchKind::ClockOut, "2025-09-06T11:00:00+00:00"),
    ];
    let rec = day_record("E1", d("2025-09-06"), &punches, None, &policy()).unwrap();
    assert_eq!(rec.status, DayStatus::Complete);
    assert_eq!(rec.total_worked_hours, 2.0);
}

#[test]
fn test_day_records_cover_every_day_of_range() {
    let punches = store();
    let range = punchclock::models::period::DateRange::new(d("2025-09-01"), d("2025-09-07")).unwrap();

    let records = day_records(punches.as_slice(), "E1", range, None, &policy()).unwrap();

    assert_eq!(records.len(), 7);
    let hours: Vec<f64> = records.iter().map(|r| r.total_worked_hours).collect();
    assert_eq!(hours, vec![8.0, 0.0, 6.0, 0.0, 0.0, 0.0, 0.0]);

    assert_eq!(records[1].status, DayStatus::Absent);
    assert_eq!(records[2].status, DayStatus::Incomplete);
    assert_eq!(records[5].status, DayStatus::Complete);
}

#[test]
fn test_summarize_all_keeps_subject_order() {
    let punches = store();
    let subjects = vec!["E2".to_string(), "NOBODY".to_string(), "E1".to_string()];

    let out = summarize_all(
        punches.as_slice(),
        &subjects,
        d("2025-09-01"),
        d("2025-09-30"),
        None,
        &policy(),
    )
    .unwrap();

    let ids: Vec<&str> = out.iter().map(|s| s.subject_id.as_str()).collect();
    assert_eq!(ids, vec!["E2", "NOBODY", "E1"]);

    assert_eq!(out[0].total_hours, 4.0);
    assert_eq!(out[1].total_hours, 0.0);
    assert_eq!(out[1].days_worked, 0);
    assert_eq!(out[2].total_hours, 14.0);
    assert_eq!(out[2].average_hours_per_day, 7.0);
}

#[test]
fn test_summarize_all_empty_subjects() {
    let punches = store();
    let out = summarize_all(
        punches.as_slice(),
        &[],
        d("2025-09-01"),
        d("2025-09-30"),
        None,
        &policy(),
    )
    .unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_summarize_all_rejects_inverted_range() {
    let punches = store();
    let err = summarize_all(
        punches.as_slice(),
        &["E1".to_string()],
        d("2025-09-30"),
        d("2025-09-01"),
        None,
        &policy(),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidRange { .. }));
}

#[test]
fn test_filter_and_rollup() {
    let punches = store();
    let subjects = vec!["E1".to_string(), "E2".to_string()];
    let all = summarize_all(
        punches.as_slice(),
        &subjects,
        d("2025-09-01"),
        d("2025-09-30"),
        None,
        &policy(),
    )
    .unwrap();

    let r = rollup(&all);
    assert_eq!(r.subjects, 2);
    assert_eq!(r.total_hours, 18.0);
    assert_eq!(r.total_days_worked, 3);
    assert_eq!(r.average_hours_per_subject, 9.0);

    let busy = SummaryFilter {
        min_hours: Some(10.0),
        ..Default::default()
    }
    .apply(all.clone());
    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0].subject_id, "E1");

    let only_e2 = SummaryFilter {
        subject_id: Some("E2".to_string()),
        ..Default::default()
    }
    .apply(all);
    assert_eq!(only_e2.len(), 1);
    assert_eq!(only_e2[0].total_hours, 4.0);

    assert_eq!(rollup(&[]).average_hours_per_subject, 0.0);
}

#[test]
fn test_hours_band() {
    assert_eq!(HoursBand::classify(170.0, 160.0, 120.0), HoursBand::High);
    assert_eq!(HoursBand::classify(160.0, 160.0, 120.0), HoursBand::High);
    assert_eq!(HoursBand::classify(130.0, 160.0, 120.0), HoursBand::Regular);
    assert_eq!(HoursBand::classify(20.0, 160.0, 120.0), HoursBand::Low);
}

#[test]
fn test_clock_state_follows_latest_punch() {
    let punches = store();

    assert_eq!(ClockState::from_punches(&[]), ClockState::NotStarted);
    assert_eq!(ClockState::from_punches(&punches[..1]), ClockState::Working);
    assert_eq!(ClockState::from_punches(&punches[..2]), ClockState::OnBreak);
    assert_eq!(ClockState::from_punches(&punches[..4]), ClockState::Finished);

    assert!(ClockState::NotStarted.allows(PunchKind::ClockIn));
    assert!(!ClockState::NotStarted.allows(PunchKind::ClockOut));
    assert!(ClockState::OnBreak.allows(PunchKind::BreakEnd));
    assert!(!ClockState::OnBreak.allows(PunchKind::ClockOut));
}
