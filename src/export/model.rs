use crate::core::logic::ReportRow;
use crate::models::day_record::DayRecord;
use crate::utils::date::weekday_short;
use crate::utils::formatting::{hours2decimal, round2};
use serde::Serialize;

/// A flat, serializable export line that can also be rendered as text cells.
pub trait ExportRow: Serialize {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

pub(crate) fn rows_to_table<T: ExportRow>(rows: &[T]) -> Vec<Vec<String>> {
    rows.iter().map(ExportRow::cells).collect()
}

/// One employee's totals over the exported period.
#[derive(Serialize, Clone, Debug)]
pub struct SummaryExport {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub total_hours: f64,
    pub days_worked: u32,
    pub average_hours_per_day: f64,
    pub band: String,
}

impl From<&ReportRow> for SummaryExport {
    fn from(r: &ReportRow) -> Self {
        Self {
            employee_id: r.employee.id.clone(),
            name: r.employee.name.clone(),
            department: r.employee.department.clone().unwrap_or_default(),
            total_hours: round2(r.summary.total_hours),
            days_worked: r.summary.days_worked,
            average_hours_per_day: round2(r.summary.average_hours_per_day),
            band: r.band.to_string(),
        }
    }
}

impl ExportRow for SummaryExport {
    fn headers() -> &'static [&'static str] {
        &[
            "employee_id",
            "name",
            "department",
            "total_hours",
            "days_worked",
            "average_hours_per_day",
            "band",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.employee_id.clone(),
            self.name.clone(),
            self.department.clone(),
            hours2decimal(self.total_hours),
            self.days_worked.to_string(),
            hours2decimal(self.average_hours_per_day),
            self.band.clone(),
        ]
    }
}

/// One calendar day of an employee's timesheet.
#[derive(Serialize, Clone, Debug)]
pub struct TimesheetExport {
    pub date: String,
    pub weekday: String,
    pub first_in: String,
    pub break_start: String,
    pub break_end: String,
    pub last_out: String,
    pub hours: f64,
    pub status: String,
}

impl From<&DayRecord> for TimesheetExport {
    fn from(r: &DayRecord) -> Self {
        let hm = |t: chrono::DateTime<chrono::FixedOffset>| t.format("%H:%M").to_string();
        let first_break = r.breaks.first();

        Self {
            date: r.date.format("%Y-%m-%d").to_string(),
            weekday: weekday_short(r.date).to_string(),
            first_in: r.first_in().map(|i| hm(i.start)).unwrap_or_default(),
            break_start: first_break.map(|b| hm(b.start)).unwrap_or_default(),
            break_end: first_break.map(|b| hm(b.end)).unwrap_or_default(),
            last_out: r.last_out().map(|i| hm(i.end)).unwrap_or_default(),
            hours: round2(r.total_worked_hours),
            status: r.status.to_string(),
        }
    }
}

impl ExportRow for TimesheetExport {
    fn headers() -> &'static [&'static str] {
        &[
            "date",
            "weekday",
            "first_in",
            "break_start",
            "break_end",
            "last_out",
            "hours",
            "status",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.weekday.clone(),
            self.first_in.clone(),
            self.break_start.clone(),
            self.break_end.clone(),
            self.last_out.clone(),
            hours2decimal(self.hours),
            self.status.clone(),
        ]
    }
}
