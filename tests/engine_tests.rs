use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rcheckin::core::engine::{Outcome, decide, find_attendee, process};
use rcheckin::core::gate::is_open;
use rcheckin::core::guard::device_in_use;
use rcheckin::errors::KioskError;
use rcheckin::models::feedback::Severity;
use rcheckin::models::mode::Mode;
use rcheckin::models::settings::EventSettings;
use rcheckin::store::WriteOutcome;

mod common;
use common::{MemStore, sample_table};

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 1)
        .and_then(|d| d.and_hms_opt(h, m, s))
        .expect("valid datetime")
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

#[test]
fn test_find_by_id_is_case_insensitive() {
    let table = sample_table();
    let a = find_attendee(&table, "  m4095 ").expect("found");
    assert_eq!(a.name, "John Doe");
}

#[test]
fn test_find_by_name_when_no_id_matches() {
    let table = sample_table();
    let a = find_attendee(&table, "JANE ROE").expect("found");
    assert_eq!(a.employee_id, "M4096");
}

#[test]
fn test_id_match_wins_over_name_match() {
    let mut table = sample_table();
    table.rows[1].name = "M4095".into();
    let a = find_attendee(&table, "M4095").expect("found");
    assert_eq!(a.name, "John Doe");
}

#[test]
fn test_find_rejections() {
    let table = sample_table();
    assert_eq!(find_attendee(&table, "   "), Err(KioskError::EmptyInput));
    assert_eq!(
        find_attendee(&table, "Alex Chen"),
        Err(KioskError::AmbiguousMatch("Alex Chen".into()))
    );
    assert_eq!(
        find_attendee(&table, "M9999"),
        Err(KioskError::NotFound("M9999".into()))
    );
}

#[test]
fn test_decide_already_checked_in() {
    let mut table = sample_table();
    table.rows[0].check_in_time = "2025-03-01 09:10:00".into();
    table.rows[0].device_fingerprint = "abc".into();

    assert_eq!(
        decide("john doe", Mode::CheckIn, "xyz", &table),
        Err(KioskError::AlreadyCheckedIn("John Doe".into()))
    );
}

#[test]
fn test_decide_device_already_used() {
    let mut table = sample_table();
    table.rows[0].check_in_time = "2025-03-01 09:10:00".into();
    table.rows[0].device_fingerprint = "abc".into();

    assert_eq!(
        decide("M4096", Mode::CheckIn, "abc", &table),
        Err(KioskError::DeviceAlreadyUsed)
    );
    assert!(decide("M4096", Mode::CheckIn, "def", &table).is_ok());
}

#[test]
fn test_guard_inactive_without_fingerprint_column() {
    let mut table = sample_table();
    table.rows[0].device_fingerprint = "abc".into();
    table.device_binding = false;

    assert!(!device_in_use(&table, "abc", Some(3)));
    assert!(decide("M4096", Mode::CheckIn, "abc", &table).is_ok());
}

#[test]
fn test_guard_ignores_empty_and_own_row() {
    let mut table = sample_table();
    table.rows[0].device_fingerprint = "abc".into();

    assert!(!device_in_use(&table, "", None));
    assert!(!device_in_use(&table, "abc", Some(2)));
    assert!(device_in_use(&table, " abc ", Some(3)));
}

#[test]
fn test_check_out_skips_device_guard() {
    let mut table = sample_table();
    table.rows[0].device_fingerprint = "abc".into();
    assert!(decide("M4096", Mode::CheckOut, "abc", &table).is_ok());

    table.rows[1].check_out_time = "2025-03-01 17:00:00".into();
    assert_eq!(
        decide("M4096", Mode::CheckOut, "abc", &table),
        Err(KioskError::AlreadyCheckedOut("Jane Roe".into()))
    );
}

#[test]
fn test_process_check_in_writes_timestamp_and_device() {
    let table = sample_table();
    let mut store = MemStore::new(table.clone(), EventSettings::default());

    let outcome = process(&mut store, "M4095", Mode::CheckIn, "abc", &table, at(10, 5, 7))
        .expect("check-in");

    assert_eq!(
        outcome,
        Outcome::CheckedIn {
            employee_id: "M4095".into(),
            name: "John Doe".into(),
            table_no: "A1".into(),
            at: "2025-03-01 10:05:07".into(),
        }
    );
    let fb = outcome.feedback();
    assert_eq!(fb.severity, Severity::Success);
    assert!(fb.text.contains("A1"));

    let state = store.state();
    assert_eq!(state.writes, 1);
    assert_eq!(state.table.rows[0].check_in_time, "2025-03-01 10:05:07");
    assert_eq!(state.table.rows[0].device_fingerprint, "abc");
}

#[test]
fn test_check_in_requires_a_device_when_guard_is_active() {
    let table = sample_table();
    let mut store = MemStore::new(table.clone(), EventSettings::default());

    let err = process(&mut store, "M4095", Mode::CheckIn, "  ", &table, at(10, 0, 0))
        .expect_err("blank device");
    assert_eq!(err, KioskError::FingerprintUnavailable);

    let state = store.state();
    assert_eq!(state.writes, 0);
    assert_eq!(state.table.rows[0].check_in_time, "");
}

#[test]
fn test_check_in_without_device_column_needs_no_device() {
    let mut table = sample_table();
    table.device_binding = false;
    assert!(decide("M4095", Mode::CheckIn, "", &table).is_ok());
}

#[test]
fn test_unexpected_check_out_outcome_is_not_success() {
    let table = sample_table();
    let mut store = MemStore::new(table.clone(), EventSettings::default());
    store.state().forced = Some(WriteOutcome::DeviceTaken);

    let err = process(&mut store, "M4095", Mode::CheckOut, "abc", &table, at(17, 0, 0))
        .expect_err("device conflict on check-out");
    assert!(matches!(err, KioskError::StoreUnavailable(_)));

    store.state().forced = Some(WriteOutcome::AlreadyRecorded);
    let err = process(&mut store, "M4095", Mode::CheckOut, "abc", &table, at(17, 0, 0))
        .expect_err("already recorded");
    assert_eq!(err, KioskError::AlreadyCheckedOut("John Doe".into()));
}

#[test]
fn test_process_rejection_does_not_write() {
    let mut table = sample_table();
    table.rows[0].check_in_time = "2025-03-01 09:00:00".into();
    let mut store = MemStore::new(table.clone(), EventSettings::default());

    let err = process(&mut store, "M4095", Mode::CheckIn, "abc", &table, at(10, 0, 0))
        .expect_err("already checked in");
    assert_eq!(err.severity(), Severity::Warning);
    assert_eq!(store.state().writes, 0);
}

#[test]
fn test_process_store_failure_is_store_unavailable() {
    let table = sample_table();
    let mut store = MemStore::new(table.clone(), EventSettings::default());
    store.state().fail = true;

    let err = process(&mut store, "M4095", Mode::CheckIn, "abc", &table, at(10, 0, 0))
        .expect_err("store down");
    assert!(matches!(err, KioskError::StoreUnavailable(_)));
    assert_eq!(err.severity(), Severity::Error);
}

#[test]
fn test_gate_bounds_are_inclusive_to_the_second() {
    let s = EventSettings::default();
    assert!(is_open(&s, hm(9, 0)));
    assert!(is_open(&s, hm(17, 0)));
    assert!(!is_open(&s, NaiveTime::from_hms_opt(17, 0, 30).expect("time")));
    assert!(!is_open(&s, NaiveTime::from_hms_opt(8, 59, 59).expect("time")));
    assert!(!is_open(&s, hm(8, 59)));
    assert!(!is_open(&s, hm(17, 1)));
}

#[test]
fn test_gate_closed_when_window_crosses_midnight() {
    let s = EventSettings {
        mode: Mode::CheckIn,
        start: hm(22, 0),
        end: hm(2, 0),
    };
    assert!(!is_open(&s, hm(23, 0)));
    assert!(!is_open(&s, hm(1, 0)));
}

#[test]
fn test_severity_mapping() {
    assert_eq!(KioskError::WindowClosed.severity(), Severity::Warning);
    assert_eq!(KioskError::AmbiguousMatch("x".into()).severity(), Severity::Warning);
    assert_eq!(KioskError::EmptyInput.severity(), Severity::Error);
    assert_eq!(KioskError::NotFound("x".into()).severity(), Severity::Error);
    assert_eq!(KioskError::DeviceAlreadyUsed.severity(), Severity::Error);
    assert_eq!(KioskError::FingerprintUnavailable.severity(), Severity::Error);
}
