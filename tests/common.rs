#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Fixed "current instant" used by the CLI tests: Monday 2025-09-01, 18:00 UTC.
pub const NOW: &str = "2025-09-01T18:00:00+00:00";

pub fn pc() -> Command {
    cargo_bin_cmd!("punchclock")
}

/// Command pre-wired with `--test --db <db> --now <NOW>`.
pub fn pc_db(db_path: &str) -> Command {
    let mut cmd = pc();
    cmd.args(["--test", "--db", db_path, "--now", NOW]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_punchclock.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    pc_db(db_path).arg("init").assert().success();
}

pub fn add_employee(db_path: &str, id: &str, name: &str, role: &str) {
    pc_db(db_path)
        .args(["employee", "add", id, "--name", name, "--role", role])
        .assert()
        .success();
}

pub fn punch(db_path: &str, id: &str, kind: &str, at: &str) {
    pc_db(db_path)
        .args(["punch", id, kind, "--at", at])
        .assert()
        .success();
}

/// A regular 8-hour day with a one-hour lunch break.
pub fn full_day(db_path: &str, id: &str, date: &str) {
    punch(db_path, id, "in", &format!("{date}T08:00:00+00:00"));
    punch(db_path, id, "break", &format!("{date}T12:00:00+00:00"));
    punch(db_path, id, "resume", &format!("{date}T13:00:00+00:00"));
    punch(db_path, id, "out", &format!("{date}T17:00:00+00:00"));
}

/// Initialize DB with two employees and a small dataset:
/// - E1: full days on 2025-09-01 and 2025-09-02
/// - E2: a 6-hour day on 2025-09-01
/// - M1: a manager with a full day on 2025-09-01
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    add_employee(db_path, "E1", "Ada Lovelace", "employee");
    add_employee(db_path, "E2", "Alan Turing", "employee");
    add_employee(db_path, "M1", "Grace Hopper", "manager");

    full_day(db_path, "E1", "2025-09-01");
    full_day(db_path, "E1", "2025-09-02");

    punch(db_path, "E2", "in", "2025-09-01T09:00:00+00:00");
    punch(db_path, "E2", "out", "2025-09-01T15:00:00+00:00");

    full_day(db_path, "M1", "2025-09-01");
}
