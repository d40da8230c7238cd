use super::punch_kind::PunchKind;
use crate::utils::time::parse_instant;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PunchEvent {
    pub id: i64,                // ⇔ punches.id
    pub subject_id: String,     // ⇔ punches.employee_id
    pub kind: PunchKind,        // ⇔ punches.kind ('clock-in' | 'clock-out' | 'break-start' | 'break-end')
    pub timestamp: String,      // ⇔ punches.timestamp (TEXT, RFC 3339)
    pub source: String,         // ⇔ punches.source (TEXT, default 'cli')
    pub created_at: String,     // ⇔ punches.created_at (TEXT, RFC 3339)
}

impl PunchEvent {
    /// Build a punch the way the CLI records it.
    /// - `id = 0` (assigned by SQLite on insert)
    /// - `source = "cli"`
    /// - `created_at = recorded_at` in RFC 3339
    pub fn new(
        subject_id: &str,
        kind: PunchKind,
        at: DateTime<FixedOffset>,
        recorded_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: 0,
            subject_id: subject_id.to_string(),
            kind,
            timestamp: at.to_rfc3339(),
            source: "cli".to_string(),
            created_at: recorded_at.to_rfc3339(),
        }
    }

    /// Bare constructor for already-stored or externally produced punches.
    pub fn raw(id: i64, subject_id: &str, kind: PunchKind, timestamp: &str) -> Self {
        Self {
            id,
            subject_id: subject_id.to_string(),
            kind,
            timestamp: timestamp.to_string(),
            source: String::new(),
            created_at: String::new(),
        }
    }

    /// The absolute instant of the punch, `None` when the stored text is unparseable.
    pub fn instant(&self) -> Option<DateTime<FixedOffset>> {
        parse_instant(&self.timestamp)
    }

    /// Calendar day the punch belongs to, in the punch's own offset.
    /// Falls back to the leading `YYYY-MM-DD` of the raw text so that a
    /// malformed punch is still attributed to its day (and counted there).
    pub fn calendar_day(&self) -> Option<NaiveDate> {
        match self.instant() {
            Some(t) => Some(t.date_naive()),
            None => self
                .timestamp
                .get(0..10)
                .and_then(|p| NaiveDate::parse_from_str(p, "%Y-%m-%d").ok()),
        }
    }

    pub fn time_str(&self) -> String {
        self.instant()
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "--:--".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_punch_takes_creation_time_from_caller() {
        let at = DateTime::parse_from_rfc3339("2025-09-01T08:00:00+02:00").unwrap();
        let now = DateTime::parse_from_rfc3339("2025-09-01T18:00:00+00:00").unwrap();

        let ev = PunchEvent::new("E1", PunchKind::ClockIn, at, now);

        assert_eq!(ev.timestamp, "2025-09-01T08:00:00+02:00");
        assert_eq!(ev.created_at, "2025-09-01T18:00:00+00:00");
        assert_eq!(ev.source, "cli");
        assert_eq!(ev.calendar_day(), NaiveDate::from_ymd_opt(2025, 9, 1));
    }
}
