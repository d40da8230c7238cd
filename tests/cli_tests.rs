use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{add_employee, init_db, init_db_with_data, pc_db, punch, setup_test_db, temp_out};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("cli_init");

    pc_db(&db_path)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_commands_require_an_initialized_database() {
    let db_path = setup_test_db("cli_no_db");

    pc_db(&db_path)
        .args(["employee", "list"])
        .assert()
        .failure()
        .stderr(contains("Database not found"));
}

#[test]
fn test_employee_add_and_list() {
    let db_path = setup_test_db("cli_employee_add_list");
    init_db(&db_path);

    pc_db(&db_path)
        .args([
            "employee",
            "add",
            "E1",
            "--name",
            "Ada Lovelace",
            "--department",
            "R&D",
            "--admission",
            "2024-03-01",
        ])
        .assert()
        .success()
        .stdout(contains("Employee 'Ada Lovelace' (E1) added as employee."));

    add_employee(&db_path, "M1", "Grace Hopper", "manager");

    pc_db(&db_path)
        .args(["employee", "list"])
        .assert()
        .success()
        .stdout(contains("Ada Lovelace").and(contains("Grace Hopper")).and(contains("R&D")));

    pc_db(&db_path)
        .args(["employee", "list", "--role", "manager"])
        .assert()
        .success()
        .stdout(contains("Grace Hopper").and(contains("Ada Lovelace").not()));
}

#[test]
fn test_employee_duplicate_id_is_rejected() {
    let db_path = setup_test_db("cli_employee_dup");
    init_db(&db_path);
    add_employee(&db_path, "E1", "Ada Lovelace", "employee");

    pc_db(&db_path)
        .args(["employee", "add", "E1", "--name", "Someone Else"])
        .assert()
        .failure()
        .stderr(contains("Employee already exists: E1"));
}

#[test]
fn test_employee_edit_and_delete() {
    let db_path = setup_test_db("cli_employee_edit_del");
    init_db(&db_path);
    add_employee(&db_path, "E1", "Ada Lovelace", "employee");
    punch(&db_path, "E1", "in", "2025-09-01T08:00:00+00:00");

    pc_db(&db_path)
        .args(["employee", "edit", "E1", "--department", "Analytics"])
        .assert()
        .success()
        .stdout(contains("Employee 'E1' updated"));

    pc_db(&db_path)
        .args(["employee", "del", "E1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Employee 'E1' deleted.").and(contains("1 punch(es) removed")));

    pc_db(&db_path)
        .args(["status", "E1"])
        .assert()
        .failure()
        .stderr(contains("Employee not found: E1"));
}

#[test]
fn test_punch_records_and_reports_state() {
    let db_path = setup_test_db("cli_punch_state");
    init_db(&db_path);
    add_employee(&db_path, "E1", "Ada Lovelace", "employee");

    pc_db(&db_path)
        .args(["punch", "E1", "in", "--at", "2025-09-01T08:00:00+00:00"])
        .assert()
        .success()
        .stdout(contains("Clock in recorded for E1").and(contains("State: ")).and(contains("working")));

    pc_db(&db_path)
        .args(["punch", "E1", "break", "--at", "12:00"])
        .assert()
        .success()
        .stdout(contains("on break"));

    pc_db(&db_path)
        .args(["status", "E1"])
        .assert()
        .success()
        .stdout(contains("on break").and(contains("break-end")));
}

#[test]
fn test_punch_rejects_invalid_transition_unless_forced() {
    let db_path = setup_test_db("cli_punch_transition");
    init_db(&db_path);
    add_employee(&db_path, "E1", "Ada Lovelace", "employee");

    pc_db(&db_path)
        .args(["punch", "E1", "out", "--at", "2025-09-01T17:00:00+00:00"])
        .assert()
        .failure()
        .stderr(contains("clock-out is not allowed while not started"));

    pc_db(&db_path)
        .args(["punch", "E1", "out", "--at", "2025-09-01T17:00:00+00:00", "--force"])
        .assert()
        .success()
        .stdout(contains("Clock out recorded for E1"));
}

#[test]
fn test_punch_rejects_unknown_kind_and_employee() {
    let db_path = setup_test_db("cli_punch_unknown");
    init_db(&db_path);
    add_employee(&db_path, "E1", "Ada Lovelace", "employee");

    pc_db(&db_path)
        .args(["punch", "E1", "lunch"])
        .assert()
        .failure()
        .stderr(contains("Invalid punch kind: lunch"));

    pc_db(&db_path)
        .args(["punch", "E9", "in"])
        .assert()
        .failure()
        .stderr(contains("Employee not found: E9"));
}

#[test]
fn test_day_shows_hours_and_status() {
    let db_path = setup_test_db("cli_day");
    init_db_with_data(&db_path);

    pc_db(&db_path)
        .args(["day", "E1", "2025-09-01", "--details"])
        .assert()
        .success()
        .stdout(
            contains("08h 00m (8.00 h)")
                .and(contains("complete"))
                .and(contains("08:00–12:00"))
                .and(contains("break-start")),
        );

    pc_db(&db_path)
        .args(["day", "E2", "2025-09-01"])
        .assert()
        .success()
        .stdout(contains("06h 00m (6.00 h)").and(contains("incomplete")));
}

#[test]
fn test_day_open_shift_counts_up_to_now() {
    let db_path = setup_test_db("cli_day_open");
    init_db(&db_path);
    add_employee(&db_path, "E1", "Ada Lovelace", "employee");
    // --now is 18:00 UTC
    punch(&db_path, "E1", "in", "2025-09-01T15:30:00+00:00");

    pc_db(&db_path)
        .args(["day", "E1"])
        .assert()
        .success()
        .stdout(contains("02h 30m (2.50 h)").and(contains("still open")));
}

#[test]
fn test_list_period_totals() {
    let db_path = setup_test_db("cli_list");
    init_db_with_data(&db_path);

    pc_db(&db_path)
        .args(["list", "E1", "--period", "2025-09-01:2025-09-07"])
        .assert()
        .success()
        .stdout(
            contains("2025-09-02")
                .and(contains("16.00 h"))
                .and(contains("Days worked:"))
                .and(contains("8.00 h/day")),
        );

    pc_db(&db_path)
        .args(["list", "E1", "--period", "2025-09-01", "--events"])
        .assert()
        .success()
        .stdout(contains("clock-in").and(contains("break-end")).and(contains("12:00")));
}

#[test]
fn test_list_rejects_bad_period() {
    let db_path = setup_test_db("cli_list_bad_period");
    init_db_with_data(&db_path);

    pc_db(&db_path)
        .args(["list", "E1", "--period", "2025-09-10:2025-09-01"])
        .assert()
        .failure()
        .stderr(contains("Invalid date range"));
}

#[test]
fn test_report_defaults_to_employees_only() {
    let db_path = setup_test_db("cli_report");
    init_db_with_data(&db_path);

    pc_db(&db_path)
        .args(["report", "--period", "2025-09"])
        .assert()
        .success()
        .stdout(
            contains("Ada Lovelace")
                .and(contains("Alan Turing"))
                .and(contains("Grace Hopper").not())
                .and(contains("22.00 h")),
        );

    pc_db(&db_path)
        .args(["report", "--period", "2025-09", "--all-roles"])
        .assert()
        .success()
        .stdout(contains("Grace Hopper").and(contains("30.00 h")));
}

#[test]
fn test_report_hour_filters() {
    let db_path = setup_test_db("cli_report_filters");
    init_db_with_data(&db_path);

    pc_db(&db_path)
        .args(["report", "--period", "2025-09", "--min-hours", "10"])
        .assert()
        .success()
        .stdout(contains("Ada Lovelace").and(contains("Alan Turing").not()));

    pc_db(&db_path)
        .args(["report", "--period", "2025-09", "--min-hours", "100"])
        .assert()
        .success()
        .stdout(contains("No employees match the selected filters."));
}

#[test]
fn test_del_single_punch_and_day() {
    let db_path = setup_test_db("cli_del");
    init_db_with_data(&db_path);

    // first punch recorded by init_db_with_data
    pc_db(&db_path)
        .args(["del", "--punch", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("Punch #1").and(contains("has been deleted")));

    pc_db(&db_path)
        .args(["del", "--punch", "1", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Punch not found: 1"));

    pc_db(&db_path)
        .args(["del", "E1", "2025-09-02", "--yes"])
        .assert()
        .success()
        .stdout(contains("4 punch(es) of E1 on 2025-09-02 have been deleted."));

    pc_db(&db_path)
        .args(["del", "E1", "2025-09-02", "--yes"])
        .assert()
        .failure()
        .stderr(contains("No punches found"));

    pc_db(&db_path)
        .arg("del")
        .assert()
        .failure()
        .stderr(contains("Specify either --punch <ID> or <EMPLOYEE> <DATE>"));
}

#[test]
fn test_log_and_db_info() {
    let db_path = setup_test_db("cli_log_db");
    init_db_with_data(&db_path);

    pc_db(&db_path)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied").and(contains("punch")));

    pc_db(&db_path)
        .args(["db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_backup_with_compression() {
    let db_path = setup_test_db("cli_backup");
    init_db_with_data(&db_path);

    let dest = temp_out("cli_backup", "sqlite");
    let zip = temp_out("cli_backup", "zip");

    pc_db(&db_path)
        .args(["backup", "--file", &dest, "--compress"])
        .assert()
        .success()
        .stdout(contains("Compressed:"));

    assert!(std::path::Path::new(&zip).exists());
    assert!(!std::path::Path::new(&dest).exists());
}

#[test]
fn test_config_print_shows_defaults() {
    let db_path = setup_test_db("cli_config_print");

    pc_db(&db_path)
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(
            contains("expected_daily_hours: 8h")
                .and(contains("high_hours_threshold: 160"))
                .and(contains("Sat")),
        );
}
