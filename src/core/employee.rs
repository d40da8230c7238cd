use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_employee, insert_employee, require_employee, update_employee};
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, Role};
use crate::utils::date::parse_date;

/// Optional field values given on the command line.
/// `Some("")` clears an optional field on edit.
#[derive(Debug, Default, Clone)]
pub struct EmployeeFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub ctps: Option<String>,
    pub admission_date: Option<String>,
}

fn optional_text(v: &str) -> Option<String> {
    let v = v.trim();
    if v.is_empty() { None } else { Some(v.to_string()) }
}

fn parse_role(code: &str) -> AppResult<Role> {
    Role::from_code(code).ok_or_else(|| AppError::InvalidRole(code.to_string()))
}

fn parse_admission(v: &str) -> AppResult<Option<chrono::NaiveDate>> {
    if v.trim().is_empty() {
        return Ok(None);
    }
    parse_date(v)
        .map(Some)
        .ok_or_else(|| AppError::InvalidDate(v.to_string()))
}

/// High-level business logic for the `employee` command.
pub struct EmployeeLogic;

impl EmployeeLogic {
    pub fn add(pool: &mut DbPool, id: &str, fields: &EmployeeFields) -> AppResult<Employee> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::Other("Employee id cannot be empty".into()));
        }

        let name = fields
            .name
            .as_deref()
            .and_then(optional_text)
            .ok_or_else(|| AppError::Other("Employee name is required (--name)".into()))?;

        let role = match &fields.role {
            Some(r) => parse_role(r)?,
            None => Role::Employee,
        };

        let mut emp = Employee::new(id, &name, role);
        emp.email = fields.email.as_deref().and_then(optional_text);
        emp.department = fields.department.as_deref().and_then(optional_text);
        emp.ctps = fields.ctps.as_deref().and_then(optional_text);
        if let Some(d) = &fields.admission_date {
            emp.admission_date = parse_admission(d)?;
        }

        insert_employee(&pool.conn, &emp)?;

        if let Err(e) = ttlog(&pool.conn, "add", &emp.id, &format!("Employee '{}' added", emp.name)) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        Ok(emp)
    }

    /// Apply the given fields to an existing employee. Returns the updated
    /// record and the list of changed field names.
    pub fn edit(
        pool: &mut DbPool,
        id: &str,
        fields: &EmployeeFields,
    ) -> AppResult<(Employee, Vec<&'static str>)> {
        let mut emp = require_employee(&pool.conn, id)?;
        let mut changes = Vec::new();

        if let Some(n) = &fields.name {
            let n = optional_text(n)
                .ok_or_else(|| AppError::Other("Employee name cannot be empty".into()))?;
            emp.name = n;
            changes.push("name");
        }
        if let Some(v) = &fields.email {
            emp.email = optional_text(v);
            changes.push("email");
        }
        if let Some(r) = &fields.role {
            emp.role = parse_role(r)?;
            changes.push("role");
        }
        if let Some(v) = &fields.department {
            emp.department = optional_text(v);
            changes.push("department");
        }
        if let Some(v) = &fields.ctps {
            emp.ctps = optional_text(v);
            changes.push("ctps");
        }
        if let Some(v) = &fields.admission_date {
            emp.admission_date = parse_admission(v)?;
            changes.push("admission_date");
        }

        if changes.is_empty() {
            return Ok((emp, changes));
        }

        update_employee(&pool.conn, &emp)?;

        if let Err(e) = ttlog(&pool.conn, "edit", &emp.id, &changes.join(", ")) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        Ok((emp, changes))
    }

    /// Remove an employee and their punches. Returns the punches removed.
    pub fn delete(pool: &mut DbPool, id: &str) -> AppResult<usize> {
        let removed = delete_employee(&pool.conn, id)?;

        if let Err(e) = ttlog(
            &pool.conn,
            "del",
            id,
            &format!("Employee deleted with {} punch(es)", removed),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        Ok(removed)
    }
}
