use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, EmployeeAction, EmployeeArgs};
use crate::config::Config;
use crate::core::employee::{EmployeeFields, EmployeeLogic};
use crate::db::queries::{list_employees, require_employee};
use crate::errors::{AppError, AppResult};
use crate::models::employee::Role;
use crate::ui::messages::{confirm, info, success, warning};
use crate::utils::colors::colorize_optional;
use crate::utils::table::{Column, Table};

impl From<&EmployeeArgs> for EmployeeFields {
    fn from(a: &EmployeeArgs) -> Self {
        Self {
            name: a.name.clone(),
            email: a.email.clone(),
            role: a.role.clone(),
            department: a.department.clone(),
            ctps: a.ctps.clone(),
            admission_date: a.admission_date.clone(),
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Employee { action } = cmd {
        let mut pool = open_pool(cfg)?;

        match action {
            EmployeeAction::Add { id, fields } => {
                let emp = EmployeeLogic::add(&mut pool, id, &EmployeeFields::from(fields))?;
                success(format!(
                    "Employee '{}' ({}) added as {}.",
                    emp.name,
                    emp.id,
                    emp.role.to_db_str()
                ));
            }

            EmployeeAction::Edit { id, fields } => {
                let (emp, changes) = EmployeeLogic::edit(&mut pool, id, &EmployeeFields::from(fields))?;
                if changes.is_empty() {
                    info(format!("Nothing to change for '{}'.", emp.id));
                } else {
                    success(format!("Employee '{}' updated: {}.", emp.id, changes.join(", ")));
                }
            }

            EmployeeAction::List { role } => {
                let role = match role {
                    Some(r) => {
                        Some(Role::from_code(r).ok_or_else(|| AppError::InvalidRole(r.clone()))?)
                    }
                    None => None,
                };

                let employees = list_employees(&pool.conn, role)?;
                if employees.is_empty() {
                    info("No employees found.");
                    return Ok(());
                }

                let mut table = Table::new(vec![
                    Column::left("ID"),
                    Column::left("NAME"),
                    Column::left("ROLE"),
                    Column::left("DEPARTMENT"),
                    Column::left("E-MAIL"),
                    Column::left("ADMISSION"),
                ])
                .with_separator(cfg.separator());

                for e in &employees {
                    table.add_row(vec![
                        e.id.clone(),
                        e.name.clone(),
                        e.role.to_db_str().to_string(),
                        colorize_optional(e.department_str()),
                        colorize_optional(e.email.as_deref().unwrap_or("--")),
                        colorize_optional(
                            &e.admission_date
                                .map(|d| d.to_string())
                                .unwrap_or_else(|| "--".to_string()),
                        ),
                    ]);
                }

                print!("{}", table.render());
            }

            EmployeeAction::Del { id, yes } => {
                let emp = require_employee(&pool.conn, id)?;

                if !*yes
                    && !confirm(format!(
                        "Delete employee '{}' ({}) and ALL of their punches? This action is irreversible.",
                        emp.name, emp.id
                    ))?
                {
                    info("Operation cancelled.");
                    return Ok(());
                }

                let removed = EmployeeLogic::delete(&mut pool, id)?;
                success(format!("Employee '{}' deleted.", id));
                if removed > 0 {
                    warning(format!("{} punch(es) removed with the employee.", removed));
                }
            }
        }
    }

    Ok(())
}
