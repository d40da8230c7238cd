use crate::config::Config;
use crate::core::calculator::aggregate::SummaryFilter;
use crate::core::calculator::expected::FlatPolicy;
use crate::core::logic::{Bands, Core};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{list_employees, require_employee};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::{ensure_writable, output_path};
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{SummaryExport, TimesheetExport};
use crate::export::pdf_export::export_pdf;
use crate::export::range::{range_title, resolve_range};
use crate::export::xlsx::export_xlsx;
use crate::models::employee::Role;
use crate::ui::messages::{skipped_warning, warning};
use crate::utils::formatting::hours2decimal;
use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub file: String,
    /// `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `START:END` or `all`; current month when `None`.
    pub range: Option<String>,
    /// Restrict the summary export to one employee; required for a timesheet.
    pub employee: Option<String>,
    pub timesheet: bool,
    pub force: bool,
    pub as_of: DateTime<FixedOffset>,
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export report summaries, or one employee's timesheet.
    /// Returns the written file, or `None` when there was nothing to export.
    pub fn export(pool: &DbPool, cfg: &Config, req: &ExportRequest) -> AppResult<Option<PathBuf>> {
        if req.timesheet && req.employee.is_none() {
            return Err(AppError::Export(
                "--timesheet requires --employee <ID>".to_string(),
            ));
        }

        let path = output_path(&req.file)?;
        ensure_writable(&path, req.force)?;

        let Some(range) = resolve_range(&pool.conn, &req.range, req.as_of.date_naive())? else {
            warning("No punches stored. Nothing to export.");
            return Ok(None);
        };

        let policy = FlatPolicy::from_config(cfg)?;
        let period = range_title(&range);

        if let Some(id) = req.employee.as_deref().filter(|_| req.timesheet) {
            let emp = require_employee(&pool.conn, id)?;
            let records = Core::build_days(pool, &emp.id, range, Some(req.as_of), &policy)?;
            skipped_warning(records.iter().map(|r| r.skipped).sum(), &emp.id);

            let summary = Core::period_summary(&emp.id, range, &records)?;
            let rows: Vec<TimesheetExport> = records.iter().map(TimesheetExport::from).collect();

            let totals = format!(
                "Total: {} h over {} day(s), average {} h/day",
                hours2decimal(summary.total_hours),
                summary.days_worked,
                hours2decimal(summary.average_hours_per_day)
            );

            match req.format {
                ExportFormat::Csv => export_csv(&rows, &path)?,
                ExportFormat::Json => export_json(&rows, Some(("summary", &summary)), &path)?,
                ExportFormat::Xlsx => {
                    let mut cells = vec![String::new(); 8];
                    cells[0] = "Total".to_string();
                    cells[6] = hours2decimal(summary.total_hours);
                    export_xlsx(&rows, "Timesheet", Some(cells), &path)?
                }
                ExportFormat::Pdf => {
                    let title = format!("Timesheet of {} ({}) - {}", emp.name, emp.id, period);
                    export_pdf(&rows, &path, &title, Some(&totals))?
                }
            }
        } else {
            let employees = match &req.employee {
                Some(id) => vec![require_employee(&pool.conn, id)?],
                None => list_employees(&pool.conn, Some(Role::Employee))?,
            };

            if employees.is_empty() {
                warning("No employees found. Nothing to export.");
                return Ok(None);
            }

            let bands = Bands {
                high: cfg.high_hours_threshold,
                regular: cfg.regular_hours_threshold,
            };
            let report = Core::report(
                pool,
                &employees,
                range,
                Some(req.as_of),
                &policy,
                &SummaryFilter::default(),
                bands,
            )?;

            let rows: Vec<SummaryExport> = report.rows.iter().map(SummaryExport::from).collect();

            match req.format {
                ExportFormat::Csv => export_csv(&rows, &path)?,
                ExportFormat::Json => export_json(&rows, Some(("rollup", &report.rollup)), &path)?,
                ExportFormat::Xlsx => {
                    let mut cells = vec![String::new(); 7];
                    cells[0] = "Total".to_string();
                    cells[3] = hours2decimal(report.rollup.total_hours);
                    cells[4] = report.rollup.total_days_worked.to_string();
                    export_xlsx(&rows, "Report", Some(cells), &path)?
                }
                ExportFormat::Pdf => {
                    let title = format!("Hours report - {}", period);
                    let footer = format!(
                        "{} employee(s), {} h total, {} h average per employee",
                        report.rollup.subjects,
                        hours2decimal(report.rollup.total_hours),
                        hours2decimal(report.rollup.average_hours_per_subject)
                    );
                    export_pdf(&rows, &path, &title, Some(&footer))?
                }
            }
        }

        let _ = ttlog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!(
                "{} {} for {}",
                req.format.as_str(),
                if req.timesheet { "timesheet" } else { "report" },
                period
            ),
        );

        Ok(Some(path))
    }
}
