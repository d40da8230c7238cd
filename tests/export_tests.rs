use predicates::str::contains;
use std::fs;

mod common;
use common::{init_db, init_db_with_data, pc_db, setup_test_db, temp_out};

#[test]
fn test_export_report_csv() {
    let db_path = setup_test_db("export_report_csv");
    init_db_with_data(&db_path);

    let out = temp_out("export_report_csv", "csv");

    pc_db(&db_path)
        .args(["export", "--format", "csv", "--file", &out, "--range", "2025-09"])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();

    assert_eq!(
        lines.next(),
        Some("employee_id,name,department,total_hours,days_worked,average_hours_per_day,band")
    );
    assert!(content.contains("E1,Ada Lovelace,,16.0,2,8.0,low"));
    assert!(content.contains("E2,Alan Turing,,6.0,1,6.0,low"));
    // managers are left out of the default export
    assert!(!content.contains("Grace Hopper"));
}

#[test]
fn test_export_report_json_has_rollup() {
    let db_path = setup_test_db("export_report_json");
    init_db_with_data(&db_path);

    let out = temp_out("export_report_json", "json");

    pc_db(&db_path)
        .args(["export", "--format", "json", "--file", &out, "--range", "2025-09"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let value: serde_json::Value = serde_json::from_str(&content).expect("valid json");

    let rows = value["rows"].as_array().expect("rows array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["employee_id"], "E1");
    assert_eq!(rows[0]["total_hours"], 16.0);

    assert_eq!(value["rollup"]["subjects"], 2);
    assert_eq!(value["rollup"]["total_hours"], 22.0);
    assert_eq!(value["rollup"]["total_days_worked"], 3);
}

#[test]
fn test_export_timesheet_csv() {
    let db_path = setup_test_db("export_timesheet_csv");
    init_db_with_data(&db_path);

    let out = temp_out("export_timesheet_csv", "csv");

    pc_db(&db_path)
        .args([
            "export",
            "--format",
            "csv",
            "--file",
            &out,
            "--range",
            "2025-09-01:2025-09-07",
            "--employee",
            "E1",
            "--timesheet",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read exported csv");

    // header + one line per calendar day
    assert_eq!(content.lines().count(), 8);
    assert!(content.contains("2025-09-01,Mon,08:00,12:00,13:00,17:00,8.0,complete"));
    assert!(content.contains("2025-09-03,Wed,,,,,0.0,absent"));
    assert!(content.contains("2025-09-06,Sat,,,,,0.0,complete"));
}

#[test]
fn test_export_timesheet_requires_employee() {
    let db_path = setup_test_db("export_timesheet_no_employee");
    init_db_with_data(&db_path);

    let out = temp_out("export_timesheet_no_employee", "csv");

    pc_db(&db_path)
        .args(["export", "--file", &out, "--timesheet"])
        .assert()
        .failure()
        .stderr(contains("--timesheet requires --employee"));
}

#[test]
fn test_export_all_range_on_empty_db() {
    let db_path = setup_test_db("export_all_empty");
    init_db(&db_path);

    let out = temp_out("export_all_empty", "csv");

    pc_db(&db_path)
        .args(["export", "--file", &out, "--range", "all"])
        .assert()
        .success()
        .stdout(contains("Nothing to export"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative_path");
    init_db_with_data(&db_path);

    pc_db(&db_path)
        .args(["export", "--file", "report.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_xlsx_and_pdf_write_files() {
    let db_path = setup_test_db("export_xlsx_pdf");
    init_db_with_data(&db_path);

    let xlsx = temp_out("export_xlsx_pdf", "xlsx");
    pc_db(&db_path)
        .args(["export", "--format", "xlsx", "--file", &xlsx, "--range", "all"])
        .assert()
        .success();
    assert!(fs::metadata(&xlsx).expect("xlsx written").len() > 0);

    let pdf = temp_out("export_xlsx_pdf", "pdf");
    pc_db(&db_path)
        .args([
            "export",
            "--format",
            "pdf",
            "--file",
            &pdf,
            "--range",
            "2025-09",
            "--employee",
            "E1",
            "--timesheet",
        ])
        .assert()
        .success();

    let bytes = fs::read(&pdf).expect("pdf written");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_export_existing_file_needs_force() {
    let db_path = setup_test_db("export_force");
    init_db_with_data(&db_path);

    let out = temp_out("export_force", "csv");
    fs::write(&out, "old").expect("seed file");

    // closed stdin answers "no"
    pc_db(&db_path)
        .args(["export", "--file", &out, "--range", "2025-09"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(contains("Export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "old");

    pc_db(&db_path)
        .args(["export", "--file", &out, "--range", "2025-09", "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().contains("Ada Lovelace"));
}
