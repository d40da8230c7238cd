//! Expected daily hours and rest days: the policy the aggregator asks about each day.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_weekday;
use crate::utils::time::parse_duration_to_minutes;
use chrono::{Datelike, NaiveDate, Weekday};

/// Supplies the expectation for a subject on a given day.
/// The aggregator treats the numbers as opaque.
pub trait DayPolicy {
    fn expected_hours(&self, subject_id: &str, date: NaiveDate) -> f64;

    fn is_rest_day(&self, _subject_id: &str, _date: NaiveDate) -> bool {
        false
    }
}

/// Same expectation for everyone, every working day.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatPolicy {
    pub expected_hours: f64,
    pub rest_days: Vec<Weekday>,
}

impl FlatPolicy {
    pub fn new(expected_hours: f64, rest_days: Vec<Weekday>) -> Self {
        Self {
            expected_hours,
            rest_days,
        }
    }

    /// Build the policy from `expected_daily_hours` and `rest_days`.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let minutes = parse_duration_to_minutes(&cfg.expected_daily_hours)?;

        let mut rest_days = Vec::with_capacity(cfg.rest_days.len());
        for name in &cfg.rest_days {
            let wd = parse_weekday(name).ok_or_else(|| {
                AppError::Config(format!("Invalid weekday in rest_days: '{}'", name))
            })?;
            rest_days.push(wd);
        }

        Ok(Self::new(minutes as f64 / 60.0, rest_days))
    }
}

impl DayPolicy for FlatPolicy {
    fn expected_hours(&self, _subject_id: &str, date: NaiveDate) -> f64 {
        if self.rest_days.contains(&date.weekday()) {
            0.0
        } else {
            self.expected_hours
        }
    }

    fn is_rest_day(&self, _subject_id: &str, date: NaiveDate) -> bool {
        self.rest_days.contains(&date.weekday())
    }
}
