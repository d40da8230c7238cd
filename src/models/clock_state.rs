use super::punch::PunchEvent;
use super::punch_kind::PunchKind;
use serde::Serialize;
use std::fmt;

/// Where an employee stands right now, derived from the latest punch of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClockState {
    NotStarted,
    Working,
    OnBreak,
    Finished,
}

impl ClockState {
    /// Latest parseable punch wins; punches with broken timestamps are ignored.
    pub fn from_punches(punches: &[PunchEvent]) -> Self {
        let last = punches
            .iter()
            .enumerate()
            .filter_map(|(pos, p)| p.instant().map(|t| (t, pos, p.kind)))
            .max_by_key(|(t, pos, _)| (*t, *pos));

        match last {
            None => ClockState::NotStarted,
            Some((_, _, kind)) => Self::after(kind),
        }
    }

    pub fn after(kind: PunchKind) -> Self {
        match kind {
            PunchKind::ClockIn | PunchKind::BreakEnd => ClockState::Working,
            PunchKind::BreakStart => ClockState::OnBreak,
            PunchKind::ClockOut => ClockState::Finished,
        }
    }

    /// Punch kinds that make sense as the next action.
    pub fn allowed(&self) -> &'static [PunchKind] {
        match self {
            ClockState::NotStarted | ClockState::Finished => &[PunchKind::ClockIn],
            ClockState::Working => &[PunchKind::BreakStart, PunchKind::ClockOut],
            ClockState::OnBreak => &[PunchKind::BreakEnd],
        }
    }

    pub fn allows(&self, kind: PunchKind) -> bool {
        self.allowed().contains(&kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClockState::NotStarted => "not started",
            ClockState::Working => "working",
            ClockState::OnBreak => "on break",
            ClockState::Finished => "finished",
        }
    }
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
