use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{ADMIN_PASSWORD, TestEnv};

#[test]
fn test_init_creates_workbook_and_config() {
    let env = TestEnv::new("cli_init_workbook", "workbook");
    env.init();

    let book = std::path::Path::new(&env.store);
    assert!(book.join("Sheet1.csv").is_file());
    assert!(book.join("Settings.csv").is_file());
    assert!(book.join("Log.csv").is_file());

    let header = fs::read_to_string(book.join("Sheet1.csv")).expect("read Sheet1");
    assert!(header.starts_with("EmployeeID,Name,TableNo,CheckInTime,CheckOutTime,DeviceFingerprint"));

    let settings = fs::read_to_string(book.join("Settings.csv")).expect("read Settings");
    assert!(settings.contains("Check-in,09:00,17:00"));

    let conf = fs::read_to_string(&env.config).expect("read config");
    assert!(conf.contains("backend: workbook"));
    assert!(conf.contains(&format!("admin_password: {ADMIN_PASSWORD}")));
}

#[test]
fn test_import_and_list() {
    let env = TestEnv::new("cli_import_list", "workbook");
    env.init_with_data();

    env.cmd(&["list"])
        .assert()
        .success()
        .stdout(contains("M4095"))
        .stdout(contains("John Doe"))
        .stdout(contains("Alex Chen"))
        .stdout(contains("4 of 4 attendees"));

    // importing the same roster again adds nothing
    let roster = env.dir.join("roster.csv");
    env.cmd(&["import", "--file", &roster.to_string_lossy()])
        .assert()
        .success()
        .stdout(contains("Imported 0 attendees (4 skipped)"));
}

#[test]
fn test_check_lists_worksheets() {
    let env = TestEnv::new("cli_check", "workbook");
    env.init_with_data();

    env.cmd(&["check"])
        .assert()
        .success()
        .stdout(contains("Sheet1"))
        .stdout(contains("Settings"))
        .stdout(contains("device guard active"))
        .stdout(contains("All checks passed"));
}

#[test]
fn test_check_fails_without_store() {
    let env = TestEnv::new("cli_check_missing", "workbook");

    env.cmd(&["--store", &env.store, "check"])
        .assert()
        .failure()
        .stderr(contains("Store unavailable"));
}

#[test]
fn test_check_in_flow() {
    let env = TestEnv::new("cli_check_in_flow", "workbook");
    env.init_with_data();

    env.cmd(&["process", "M4095", "--device", "abc", "--at", "10:00"])
        .assert()
        .success()
        .stdout(contains("Welcome John Doe"))
        .stdout(contains("A1"));

    // same person, by name, from another device
    env.cmd(&["process", "john doe", "--device", "xyz", "--at", "10:00"])
        .assert()
        .success()
        .stdout(contains("already checked in"));

    // same device for someone else
    env.cmd(&["process", "M4096", "--device", "abc", "--at", "10:00"])
        .assert()
        .failure()
        .stderr(contains("already been used"));

    let sheet = fs::read_to_string(std::path::Path::new(&env.store).join("Sheet1.csv"))
        .expect("read Sheet1");
    let john = sheet
        .lines()
        .find(|l| l.starts_with("M4095"))
        .expect("John Doe row");
    assert!(john.ends_with(",abc"));
    let jane = sheet
        .lines()
        .find(|l| l.starts_with("M4096"))
        .expect("Jane Roe row");
    assert!(jane.ends_with(",,,"));
}

#[test]
fn test_process_rejections() {
    let env = TestEnv::new("cli_process_rejections", "workbook");
    env.init_with_data();

    env.cmd(&["process", "alex chen", "--at", "10:00"])
        .assert()
        .success()
        .stdout(contains("Several attendees are named"));

    env.cmd(&["process", "nobody", "--at", "10:00"])
        .assert()
        .failure()
        .stderr(contains("No attendee found"));

    env.cmd(&["process", "   ", "--at", "10:00"])
        .assert()
        .failure()
        .stderr(contains("Please enter your employee ID or name"));

    env.cmd(&["process", "M4096", "--at", "18:00"])
        .assert()
        .success()
        .stdout(contains("not started yet or has already ended"));

    env.cmd(&["list", "--pending"])
        .assert()
        .success()
        .stdout(contains("4 of 4 attendees"));
}

#[test]
fn test_window_bounds_are_inclusive() {
    let env = TestEnv::new("cli_window_bounds", "workbook");
    env.init_with_data();

    env.cmd(&["process", "M4095", "--at", "17:00"])
        .assert()
        .success()
        .stdout(contains("Welcome John Doe"));

    env.cmd(&["process", "M4096", "--at", "08:59"])
        .assert()
        .success()
        .stdout(contains("not started yet"));

    env.cmd(&["process", "M4096", "--at", "17:00:30"])
        .assert()
        .success()
        .stdout(contains("already ended"));

    env.cmd(&["list", "--pending"])
        .assert()
        .success()
        .stdout(contains("M4096"));
}

#[test]
fn test_settings_require_password() {
    let env = TestEnv::new("cli_settings_password", "workbook");
    env.init_with_data();

    env.cmd(&["settings", "--mode", "out"])
        .assert()
        .failure()
        .stderr(contains("Wrong password"));

    env.cmd(&["settings", "--mode", "out", "--password", "nope"])
        .assert()
        .failure()
        .stderr(contains("Wrong password"));

    env.cmd(&[
        "settings",
        "--mode",
        "out",
        "--start",
        "08:00",
        "--password",
        ADMIN_PASSWORD,
    ])
    .assert()
    .success()
    .stdout(contains("Settings saved"))
    .stdout(contains("Check-out"))
    .stdout(contains("08:00"));

    env.cmd(&["settings"])
        .assert()
        .success()
        .stdout(contains("Check-out"))
        .stdout(contains("17:00"));
}

#[test]
fn test_check_out_flow() {
    let env = TestEnv::new("cli_check_out_flow", "workbook");
    env.init_with_data();

    env.cmd(&["process", "M4095", "--device", "abc", "--at", "10:00"])
        .assert()
        .success();

    env.cmd(&["settings", "--mode", "Check-out", "--password", ADMIN_PASSWORD])
        .assert()
        .success();

    env.cmd(&["process", "m4095", "--at", "16:00"])
        .assert()
        .success()
        .stdout(contains("Check-out successful, John Doe"));

    env.cmd(&["process", "M4095", "--at", "16:30"])
        .assert()
        .success()
        .stdout(contains("already checked out"));

    let sheet = fs::read_to_string(std::path::Path::new(&env.store).join("Sheet1.csv")).expect("sheet");
    let john = sheet
        .lines()
        .find(|l| l.starts_with("M4095"))
        .expect("John's row");
    assert!(john.contains(" 16:00:00"));
    assert!(!john.contains(" 16:30:00"));

    // check-out does not require a prior check-in
    env.cmd(&["process", "Jane Roe", "--at", "16:30"])
        .assert()
        .success()
        .stdout(contains("Check-out successful, Jane Roe"));

    env.cmd(&["list", "--checked-out"])
        .assert()
        .success()
        .stdout(contains("M4095"))
        .stdout(contains("M4096"))
        .stdout(contains("M5000").not());
}

#[test]
fn test_status_and_log() {
    let env = TestEnv::new("cli_status_log", "workbook");
    env.init_with_data();

    env.cmd(&["process", "M4095", "--device", "abc", "--at", "10:00"])
        .assert()
        .success();

    env.cmd(&["status"])
        .assert()
        .success()
        .stdout(contains("Check-in"))
        .stdout(contains("09:00 - 17:00"))
        .stdout(contains("Attendees   : 4"))
        .stdout(contains("Checked in  : 1"));

    env.cmd(&["log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("import"))
        .stdout(contains("check-in"))
        .stdout(contains("M4095"));
}

#[test]
fn test_export_csv_and_json() {
    let env = TestEnv::new("cli_export", "workbook");
    env.init_with_data();

    env.cmd(&["process", "M4095", "--device", "abc", "--at", "10:00"])
        .assert()
        .success();

    let csv_out = common::temp_out("cli_export", "csv");
    env.cmd(&["export", "--format", "csv", "--file", &csv_out])
        .assert()
        .success()
        .stdout(contains("CSV report written"));

    let content = fs::read_to_string(&csv_out).expect("read csv export");
    assert!(content.starts_with("employee_id,name,table_no,status"));
    assert!(content.contains("M4095,John Doe,A1,checked-in"));
    assert!(content.contains("M4096,Jane Roe,B2,pending"));

    let json_out = common::temp_out("cli_export", "json");
    env.cmd(&["export", "--format", "json", "--file", &json_out])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("read json")).expect("json");
    assert_eq!(json.as_array().map(|a| a.len()), Some(4));
    assert_eq!(json[0]["device_fingerprint"], "abc");

    // existing file is kept unless --force
    env.cmd(&["export", "--format", "csv", "--file", &csv_out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));

    env.cmd(&["export", "--format", "csv", "--file", &csv_out, "--force"])
        .assert()
        .success();
}

#[test]
fn test_export_xlsx() {
    let env = TestEnv::new("cli_export_xlsx", "workbook");
    env.init_with_data();

    let out = common::temp_out("cli_export_xlsx", "xlsx");
    env.cmd(&["export", "--format", "xlsx", "--file", &out])
        .assert()
        .success()
        .stdout(contains("XLSX report written"));

    let bytes = fs::read(&out).expect("read xlsx");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_config_check_and_migrate() {
    let env = TestEnv::new("cli_config_migrate", "workbook");
    fs::write(
        &env.config,
        format!("backend: workbook\nstore: {}\n", env.store),
    )
    .expect("write partial config");

    env.cmd(&["config", "--check"])
        .assert()
        .success()
        .stdout(contains("Missing fields"))
        .stdout(contains("utc_offset"));

    env.cmd(&["config", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Configuration migrated"));

    env.cmd(&["config", "--check"])
        .assert()
        .success()
        .stdout(contains("Configuration is complete"));

    env.cmd(&["config", "--print"])
        .assert()
        .success()
        .stdout(contains("worksheet: Sheet1"))
        .stdout(contains("attendee_cache_secs: 30"));
}

#[test]
fn test_sqlite_backend_flow() {
    let env = TestEnv::new("cli_sqlite_flow", "sqlite");
    env.init_with_data();

    env.cmd(&["check"])
        .assert()
        .success()
        .stdout(contains("attendees"))
        .stdout(contains("All checks passed"));

    env.cmd(&["process", "M4095", "--device", "abc", "--at", "10:00"])
        .assert()
        .success()
        .stdout(contains("Welcome John Doe"));

    env.cmd(&["process", "M4095", "--device", "xyz", "--at", "10:00"])
        .assert()
        .success()
        .stdout(contains("already checked in"));

    env.cmd(&["process", "Jane Roe", "--device", "abc", "--at", "10:00"])
        .assert()
        .failure()
        .stderr(contains("already been used"));

    env.cmd(&["list", "--checked-in"])
        .assert()
        .success()
        .stdout(contains("M4095"))
        .stdout(contains("1 of 4 attendees"));
}
