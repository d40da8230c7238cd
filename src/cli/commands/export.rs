use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest};
use chrono::{DateTime, FixedOffset};

pub fn handle(cmd: &Commands, cfg: &Config, now: DateTime<FixedOffset>) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        employee,
        timesheet,
        force,
    } = cmd
    {
        let pool = open_pool(cfg)?;

        let req = ExportRequest {
            format: *format,
            file: file.clone(),
            range: range.clone(),
            employee: employee.clone(),
            timesheet: *timesheet,
            force: *force,
            as_of: now,
        };

        ExportLogic::export(&pool, cfg, &req)?;
    }

    Ok(())
}
