//! Interval reducer: turns a punch sequence into disjoint work and break intervals.
//!
//! The scan is a small state machine over two optional open starts (work and
//! break). Malformed sequences are tolerated: a second clock-in closes the
//! first shift, a second break-start restarts the break, stray clock-outs and
//! break-ends are ignored.

use crate::errors::{AppError, AppResult};
use crate::models::interval::{Interval, total_duration};
use crate::models::punch::PunchEvent;
use crate::models::punch_kind::PunchKind;
use chrono::{DateTime, Duration, FixedOffset};

/// Output of [`reduce`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reduction {
    pub work: Vec<Interval>,
    pub breaks: Vec<Interval>,
    /// Punches dropped because their timestamp could not be parsed.
    pub skipped: usize,
    /// At least one (parseable) clock-out was seen.
    pub has_clock_out: bool,
}

impl Reduction {
    /// Work time minus break time that overlaps it, never negative.
    /// Every interval and overlap is counted in whole minutes.
    pub fn net_duration(&self) -> Duration {
        let work = total_duration(&self.work);
        let overlap: i64 = self
            .breaks
            .iter()
            .flat_map(|b| self.work.iter().map(move |w| w.overlap(b).num_minutes()))
            .sum();

        (work - Duration::minutes(overlap)).max(Duration::zero())
    }

    /// Net worked time in fractional hours, from whole minutes.
    pub fn net_hours(&self) -> f64 {
        duration_to_hours(self.net_duration())
    }

    pub fn break_duration(&self) -> Duration {
        total_duration(&self.breaks)
    }
}

pub fn duration_to_hours(d: Duration) -> f64 {
    d.num_minutes() as f64 / 60.0
}

#[derive(Default)]
struct ScanState {
    open_work: Option<DateTime<FixedOffset>>,
    open_break: Option<DateTime<FixedOffset>>,
    work: Vec<Interval>,
    breaks: Vec<Interval>,
}

impl ScanState {
    fn close_work(&mut self, at: DateTime<FixedOffset>) {
        if let Some(start) = self.open_work.take() {
            self.work.push(Interval::new(start, at));
        }
    }

    fn close_break(&mut self, at: DateTime<FixedOffset>) {
        if let Some(start) = self.open_break.take() {
            self.breaks.push(Interval::new(start, at));
        }
    }

    fn apply(&mut self, kind: PunchKind, at: DateTime<FixedOffset>) {
        match kind {
            PunchKind::ClockIn => {
                self.close_work(at);
                self.close_break(at);
                self.open_work = Some(at);
            }
            PunchKind::ClockOut => {
                self.close_break(at);
                self.close_work(at);
            }
            PunchKind::BreakStart => {
                if self.open_work.is_some() {
                    self.close_work(at);
                    self.open_break = Some(at);
                } else if self.open_break.is_some() {
                    // duplicate break-start: last writer wins
                    self.close_break(at);
                    self.open_break = Some(at);
                }
            }
            PunchKind::BreakEnd => {
                if self.open_break.is_some() {
                    self.close_break(at);
                    self.open_work = Some(at);
                }
            }
        }
    }
}

/// Reduce a punch sequence to work and break intervals.
///
/// - `events` may arrive in any order; they are stably sorted by instant.
/// - `open_period` marks a day that is still in progress: dangling work or
///   break is closed at `as_of`. For a closed period dangling state is dropped.
/// - `open_period == true` without `as_of` is rejected with [`AppError::MissingAsOf`].
pub fn reduce(
    events: &[PunchEvent],
    as_of: Option<DateTime<FixedOffset>>,
    open_period: bool,
) -> AppResult<Reduction> {
    if open_period && as_of.is_none() {
        return Err(AppError::MissingAsOf);
    }

    let mut skipped = 0;
    let mut timed: Vec<(DateTime<FixedOffset>, PunchKind)> = Vec::with_capacity(events.len());

    for ev in events {
        match ev.instant() {
            Some(t) => timed.push((t, ev.kind)),
            None => skipped += 1,
        }
    }

    // stable: equal instants keep their input order
    timed.sort_by_key(|(t, _)| *t);

    let has_clock_out = timed.iter().any(|(_, k)| k.is_clock_out());

    let mut state = ScanState::default();
    for (at, kind) in &timed {
        state.apply(*kind, *at);
    }

    if open_period && let Some(now) = as_of {
        state.close_work(now);
        state.close_break(now);
    }

    Ok(Reduction {
        work: state.work,
        breaks: state.breaks,
        skipped,
        has_clock_out,
    })
}
