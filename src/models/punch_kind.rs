use serde::Serialize;
use std::fmt;

/// The four punch actions an employee can record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PunchKind {
    ClockIn,
    ClockOut,
    BreakStart,
    BreakEnd,
}

impl PunchKind {
    /// Parse user input. Accepts the DB form plus a few short aliases
    /// (`in`, `out`, `break`, `resume`).
    pub fn pk_from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "clock-in" | "clockin" | "in" => Some(Self::ClockIn),
            "clock-out" | "clockout" | "out" => Some(Self::ClockOut),
            "break-start" | "breakstart" | "break" => Some(Self::BreakStart),
            "break-end" | "breakend" | "resume" => Some(Self::BreakEnd),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PunchKind::ClockIn => "clock-in",
            PunchKind::ClockOut => "clock-out",
            PunchKind::BreakStart => "break-start",
            PunchKind::BreakEnd => "break-end",
        }
    }

    /// Convert DB string → enum. Strict: unknown values are rejected.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "clock-in" => Some(PunchKind::ClockIn),
            "clock-out" => Some(PunchKind::ClockOut),
            "break-start" => Some(PunchKind::BreakStart),
            "break-end" => Some(PunchKind::BreakEnd),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PunchKind::ClockIn => "Clock in",
            PunchKind::ClockOut => "Clock out",
            PunchKind::BreakStart => "Break start",
            PunchKind::BreakEnd => "Break end",
        }
    }

    pub fn is_clock_out(&self) -> bool {
        matches!(self, PunchKind::ClockOut)
    }
}

impl fmt::Display for PunchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
