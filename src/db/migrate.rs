use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step: a unique version tag, a description and the SQL it runs.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

/// Ordered list of schema steps. Every step is idempotent on its own and
/// is recorded in `log` once applied.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250901_0001_create_employees",
        description: "Created employees table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS employees (
            id              TEXT PRIMARY KEY,
            name            TEXT NOT NULL,
            email           TEXT UNIQUE,
            role            TEXT NOT NULL DEFAULT 'employee'
                            CHECK(role IN ('employee','manager','admin')),
            department      TEXT,
            ctps            TEXT,
            admission_date  TEXT,
            created_at      TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250901_0002_create_punches",
        description: "Created punches table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS punches (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id  TEXT NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            kind         TEXT NOT NULL
                         CHECK(kind IN ('clock-in','clock-out','break-start','break-end')),
            timestamp    TEXT NOT NULL,
            source       TEXT NOT NULL DEFAULT 'cli',
            created_at   TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250901_0003_punches_indexes",
        description: "Added punches indexes",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_punches_employee_ts
            ON punches(employee_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_punches_day
            ON punches(employee_id, substr(timestamp, 1, 10));
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, m: &Migration) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;
    Ok(())
}

/// Names of the schema steps not yet recorded in `log`.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Called by db::init_db() and on every command that opens the database.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(m.sql)?;
        mark_applied(&tx, m)?;
        tx.commit()?;

        success(format!("Migration applied: {}", m.version));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();

        assert_eq!(applied as usize, MIGRATIONS.len());
        assert!(pending_migrations(&conn).unwrap().is_empty());
    }
}
