use serde::Serialize;
use std::fmt;

/// Aggregated totals for one subject over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub subject_id: String,
    pub total_hours: f64,
    pub days_worked: u32,
    pub average_hours_per_day: f64,
}

/// Cross-subject totals shown under a report.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Rollup {
    pub subjects: usize,
    pub total_hours: f64,
    pub total_days_worked: u32,
    pub average_hours_per_subject: f64,
}

/// Coarse label for a period total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HoursBand {
    High,
    Regular,
    Low,
}

impl HoursBand {
    pub fn classify(total_hours: f64, high: f64, regular: f64) -> Self {
        if total_hours >= high {
            HoursBand::High
        } else if total_hours >= regular {
            HoursBand::Regular
        } else {
            HoursBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HoursBand::High => "high",
            HoursBand::Regular => "regular",
            HoursBand::Low => "low",
        }
    }
}

impl fmt::Display for HoursBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
