use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, Role};
use crate::models::period::DateRange;
use crate::models::punch::PunchEvent;
use crate::models::punch_kind::PunchKind;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------------------------------------------------------
// Employees
// ---------------------------------------------------------------------------

pub fn map_employee_row(row: &Row) -> Result<Employee> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str.clone())),
        )
    })?;

    let admission: Option<String> = row.get("admission_date")?;

    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        role,
        department: row.get("department")?,
        ctps: row.get("ctps")?,
        admission_date: admission
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
    })
}

pub fn load_employee(conn: &Connection, id: &str) -> AppResult<Option<Employee>> {
    let mut stmt = conn.prepare("SELECT * FROM employees WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_employee_row).optional()?)
}

/// Like [`load_employee`], but a missing employee is an error.
pub fn require_employee(conn: &Connection, id: &str) -> AppResult<Employee> {
    load_employee(conn, id)?.ok_or_else(|| AppError::EmployeeNotFound(id.to_string()))
}

/// All employees ordered by name; `role = None` returns every role.
pub fn list_employees(conn: &Connection, role: Option<Role>) -> AppResult<Vec<Employee>> {
    let mut out = Vec::new();

    match role {
        Some(r) => {
            let mut stmt =
                conn.prepare("SELECT * FROM employees WHERE role = ?1 ORDER BY name, id")?;
            for e in stmt.query_map([r.to_db_str()], map_employee_row)? {
                out.push(e?);
            }
        }
        None => {
            let mut stmt = conn.prepare("SELECT * FROM employees ORDER BY name, id")?;
            for e in stmt.query_map([], map_employee_row)? {
                out.push(e?);
            }
        }
    }

    Ok(out)
}

pub fn insert_employee(conn: &Connection, emp: &Employee) -> AppResult<()> {
    if load_employee(conn, &emp.id)?.is_some() {
        return Err(AppError::EmployeeExists(emp.id.clone()));
    }

    conn.execute(
        "INSERT INTO employees (id, name, email, role, department, ctps, admission_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            emp.id,
            emp.name,
            emp.email,
            emp.role.to_db_str(),
            emp.department,
            emp.ctps,
            emp.admission_date.map(|d| d.format("%Y-%m-%d").to_string()),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Update every field except the id.
pub fn update_employee(conn: &Connection, emp: &Employee) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE employees
         SET name = ?1, email = ?2, role = ?3,
             department = ?4, ctps = ?5, admission_date = ?6
         WHERE id = ?7",
        params![
            emp.name,
            emp.email,
            emp.role.to_db_str(),
            emp.department,
            emp.ctps,
            emp.admission_date.map(|d| d.format("%Y-%m-%d").to_string()),
            emp.id,
        ],
    )?;

    if n == 0 {
        return Err(AppError::EmployeeNotFound(emp.id.clone()));
    }
    Ok(())
}

/// Delete an employee together with all of their punches.
/// Returns the number of punches removed.
pub fn delete_employee(conn: &Connection, id: &str) -> AppResult<usize> {
    let tx = conn.unchecked_transaction()?;

    let punches = tx.execute("DELETE FROM punches WHERE employee_id = ?1", [id])?;
    let n = tx.execute("DELETE FROM employees WHERE id = ?1", [id])?;

    if n == 0 {
        return Err(AppError::EmployeeNotFound(id.to_string()));
    }

    tx.commit()?;
    Ok(punches)
}

// ---------------------------------------------------------------------------
// Punches
// ---------------------------------------------------------------------------

/// Punches loaded from storage, plus the number of rows whose kind is not
/// one of the four known values.
#[derive(Debug, Default)]
pub struct LoadedPunches {
    pub punches: Vec<PunchEvent>,
    pub quarantined: usize,
}

/// Raw row as stored; `kind` is kept as text until validated.
struct PunchRow {
    id: i64,
    employee_id: String,
    kind: String,
    timestamp: String,
    source: String,
    created_at: String,
}

fn map_punch_row(row: &Row) -> Result<PunchRow> {
    Ok(PunchRow {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        kind: row.get("kind")?,
        timestamp: row.get("timestamp")?,
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}

impl PunchRow {
    fn into_event(self) -> Option<PunchEvent> {
        let kind = PunchKind::from_db_str(&self.kind)?;
        Some(PunchEvent {
            id: self.id,
            subject_id: self.employee_id,
            kind,
            timestamp: self.timestamp,
            source: self.source,
            created_at: self.created_at,
        })
    }
}

fn collect_punches<I>(rows: I) -> Result<LoadedPunches>
where
    I: Iterator<Item = Result<PunchRow>>,
{
    let mut out = LoadedPunches::default();
    for r in rows {
        match r?.into_event() {
            Some(ev) => out.punches.push(ev),
            None => out.quarantined += 1,
        }
    }
    Ok(out)
}

/// Punches of `employee_id` whose calendar day (leading `YYYY-MM-DD` of the
/// stored timestamp) lies within `range`.
pub fn load_punches_in_range(
    conn: &Connection,
    employee_id: &str,
    range: DateRange,
) -> AppResult<LoadedPunches> {
    let mut stmt = conn.prepare(
        "SELECT * FROM punches
         WHERE employee_id = ?1
           AND substr(timestamp, 1, 10) BETWEEN ?2 AND ?3
         ORDER BY timestamp ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            employee_id,
            range.start().format("%Y-%m-%d").to_string(),
            range.end().format("%Y-%m-%d").to_string(),
        ],
        map_punch_row,
    )?;

    Ok(collect_punches(rows)?)
}

pub fn load_punches_by_date(
    conn: &Connection,
    employee_id: &str,
    date: NaiveDate,
) -> AppResult<LoadedPunches> {
    load_punches_in_range(conn, employee_id, DateRange::single(date))
}

pub fn load_punch(conn: &Connection, id: i64) -> AppResult<Option<PunchEvent>> {
    let mut stmt = conn.prepare("SELECT * FROM punches WHERE id = ?1")?;
    let row = stmt.query_row([id], map_punch_row).optional()?;
    Ok(row.and_then(PunchRow::into_event))
}

/// Insert a punch and return the id assigned by SQLite.
pub fn insert_punch(conn: &Connection, ev: &PunchEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO punches (employee_id, kind, timestamp, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            ev.subject_id,
            ev.kind.to_db_str(),
            ev.timestamp,
            ev.source,
            ev.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_punch(conn: &Connection, id: i64) -> AppResult<()> {
    let n = conn.execute("DELETE FROM punches WHERE id = ?1", [id])?;
    if n == 0 {
        return Err(AppError::PunchNotFound(id));
    }
    Ok(())
}

/// Delete every punch of `employee_id` on `date`. Returns the number removed.
pub fn delete_punches_by_date(
    conn: &Connection,
    employee_id: &str,
    date: NaiveDate,
) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM punches
         WHERE employee_id = ?1 AND substr(timestamp, 1, 10) = ?2",
        params![employee_id, date.format("%Y-%m-%d").to_string()],
    )?;
    Ok(n)
}

// ---------------------------------------------------------------------------
// Internal log
// ---------------------------------------------------------------------------

/// One row of the `log` table.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub fn load_log(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, operation, IFNULL(target, ''), message
         FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(LogEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kinds_are_quarantined() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE punches (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                employee_id TEXT NOT NULL,
                kind TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                source TEXT NOT NULL DEFAULT 'cli',
                created_at TEXT NOT NULL
            );
            INSERT INTO punches (employee_id, kind, timestamp, created_at) VALUES
                ('E1', 'clock-in',  '2025-09-01T08:00:00Z', ''),
                ('E1', 'lunch',     '2025-09-01T12:00:00Z', ''),
                ('E1', 'clock-out', '2025-09-01T17:00:00Z', ''),
                ('E1', 'clock-in',  '2025-09-02T08:00:00Z', '');",
        )
        .unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let loaded = load_punches_by_date(&conn, "E1", day).unwrap();

        assert_eq!(loaded.punches.len(), 2);
        assert_eq!(loaded.quarantined, 1);
    }
}
