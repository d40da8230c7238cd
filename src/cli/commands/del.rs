use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{confirm, info, success};
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del {
        punch,
        employee,
        date: date_str,
        yes,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;

        //
        // Single punch by id
        //
        if let Some(id) = punch {
            if !*yes && !confirm(format!("Delete punch #{}? This action is irreversible.", id))? {
                info("Operation cancelled.");
                return Ok(());
            }

            let ev = DeleteLogic::punch(&mut pool, *id)?;
            success(format!(
                "Punch #{} ({} of {} at {}) has been deleted.",
                id, ev.kind, ev.subject_id, ev.timestamp
            ));
            return Ok(());
        }

        //
        // Whole day of one employee
        //
        let (Some(emp), Some(date_str)) = (employee, date_str) else {
            return Err(AppError::Other(
                "Specify either --punch <ID> or <EMPLOYEE> <DATE>".to_string(),
            ));
        };

        let d = date::parse_date(date_str).ok_or_else(|| AppError::InvalidDate(date_str.clone()))?;
        let n = DeleteLogic::count_for_date(&pool, emp, d)?;

        if !*yes
            && !confirm(format!(
                "Delete ALL {} punch(es) of {} on {}? This action is irreversible.",
                n, emp, d
            ))?
        {
            info("Operation cancelled.");
            return Ok(());
        }

        let removed = DeleteLogic::day(&mut pool, emp, d)?;
        success(format!("{} punch(es) of {} on {} have been deleted.", removed, emp, d));
    }

    Ok(())
}
