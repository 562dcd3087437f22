#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rcheckin::errors::AppResult;
use rcheckin::models::attendee::{Attendee, AttendeeTable};
use rcheckin::models::log_entry::LogEntry;
use rcheckin::models::roster::RosterEntry;
use rcheckin::models::settings::EventSettings;
use rcheckin::store::{Repository, SheetSummary, WriteOutcome};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const ADMIN_PASSWORD: &str = "s3cret";

pub fn rci() -> Command {
    cargo_bin_cmd!("rcheckin")
}

/// Fresh, empty directory inside the system temp dir for one test.
pub fn setup_test_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcheckin", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test dir");
    path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub const ROSTER: &str = "EmployeeID,Name,TableNo
M4095,John Doe,A1
M4096,Jane Roe,B2
M5000,Alex Chen,C3
M5001,Alex Chen,C4
";

/// Global flags pointing at a per-test config and store.
pub struct TestEnv {
    pub dir: PathBuf,
    pub config: String,
    pub store: String,
    pub backend: &'static str,
}

impl TestEnv {
    pub fn new(name: &str, backend: &'static str) -> Self {
        let dir = setup_test_dir(name);
        let store = match backend {
            "sqlite" => dir.join("attendees.sqlite"),
            _ => dir.join("Event_Check-in"),
        };
        Self {
            config: dir.join("rcheckin.conf").to_string_lossy().to_string(),
            store: store.to_string_lossy().to_string(),
            dir,
            backend,
        }
    }

    /// `rcheckin --config <conf> <args...>`
    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = rci();
        cmd.env_remove("RCHECKIN_ADMIN_PASSWORD");
        cmd.args(["--config", &self.config]);
        cmd.args(args);
        cmd
    }

    pub fn init(&self) {
        let mut cmd = rci();
        cmd.env_remove("RCHECKIN_ADMIN_PASSWORD");
        cmd.args([
            "--config",
            &self.config,
            "--backend",
            self.backend,
            "--store",
            &self.store,
            "init",
            "--admin-password",
            ADMIN_PASSWORD,
        ])
        .assert()
        .success();
    }

    /// Init the store and provision the sample roster.
    pub fn init_with_data(&self) {
        self.init();
        let roster = self.dir.join("roster.csv");
        fs::write(&roster, ROSTER).expect("write roster");
        self.cmd(&["import", "--file", &roster.to_string_lossy()])
            .assert()
            .success();
    }
}

pub fn attendee(row: usize, id: &str, name: &str, table_no: &str) -> Attendee {
    Attendee {
        row,
        employee_id: id.to_string(),
        name: name.to_string(),
        table_no: table_no.to_string(),
        check_in_time: String::new(),
        check_out_time: String::new(),
        device_fingerprint: String::new(),
    }
}

/// Attendee table matching `ROSTER`, with sheet rows starting at 2.
pub fn sample_table() -> AttendeeTable {
    AttendeeTable::new(
        vec![
            attendee(2, "M4095", "John Doe", "A1"),
            attendee(3, "M4096", "Jane Roe", "B2"),
            attendee(4, "M5000", "Alex Chen", "C3"),
            attendee(5, "M5001", "Alex Chen", "C4"),
        ],
        true,
    )
}

#[derive(Debug, Default)]
pub struct MemState {
    pub table: AttendeeTable,
    pub settings: EventSettings,
    pub log: Vec<LogEntry>,
    pub loads: usize,
    pub writes: usize,
    pub fail: bool,
    /// When set, writes return this outcome and leave the table untouched.
    pub forced: Option<WriteOutcome>,
}

/// In-memory repository; clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    pub state: Arc<Mutex<MemState>>,
}

impl MemStore {
    pub fn new(table: AttendeeTable, settings: EventSettings) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemState {
                table,
                settings,
                ..Default::default()
            })),
        }
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, MemState> {
        self.state.lock().expect("mem store lock")
    }

    fn check(&self) -> AppResult<()> {
        if self.state().fail {
            return Err(rcheckin::errors::AppError::StoreUnavailable(
                "simulated outage".into(),
            ));
        }
        Ok(())
    }
}

impl Repository for MemStore {
    fn name(&self) -> String {
        "memory".into()
    }

    fn load_attendees(&mut self) -> AppResult<AttendeeTable> {
        self.check()?;
        let mut s = self.state();
        s.loads += 1;
        Ok(s.table.clone())
    }

    fn record_check_in(
        &mut self,
        attendee: &Attendee,
        timestamp: &str,
        fingerprint: &str,
    ) -> AppResult<WriteOutcome> {
        self.check()?;
        let mut s = self.state();
        if let Some(outcome) = s.forced {
            return Ok(outcome);
        }
        s.writes += 1;
        if let Some(a) = s.table.rows.iter_mut().find(|a| a.row == attendee.row) {
            a.check_in_time = timestamp.to_string();
            a.device_fingerprint = fingerprint.to_string();
        }
        Ok(WriteOutcome::Applied)
    }

    fn record_check_out(&mut self, attendee: &Attendee, timestamp: &str) -> AppResult<WriteOutcome> {
        self.check()?;
        let mut s = self.state();
        if let Some(outcome) = s.forced {
            return Ok(outcome);
        }
        if !s.table.rows.iter().any(|a| a.row == attendee.row && a.check_out_time.is_empty()) {
            return Ok(WriteOutcome::AlreadyRecorded);
        }
        s.writes += 1;
        if let Some(a) = s.table.rows.iter_mut().find(|a| a.row == attendee.row) {
            a.check_out_time = timestamp.to_string();
        }
        Ok(WriteOutcome::Applied)
    }

    fn load_settings(&mut self) -> AppResult<EventSettings> {
        self.check()?;
        Ok(self.state().settings)
    }

    fn save_settings(&mut self, settings: &EventSettings) -> AppResult<()> {
        self.check()?;
        self.state().settings = *settings;
        Ok(())
    }

    fn provision(&mut self, roster: &[RosterEntry]) -> AppResult<usize> {
        let mut s = self.state();
        let start = s.table.rows.len() + 2;
        for (i, r) in roster.iter().enumerate() {
            s.table
                .rows
                .push(attendee(start + i, &r.employee_id, &r.name, &r.table_no));
        }
        Ok(roster.len())
    }

    fn log(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.state().log.push(LogEntry {
            date: String::new(),
            operation: operation.into(),
            target: target.into(),
            message: message.into(),
        });
        Ok(())
    }

    fn load_log(&mut self) -> AppResult<Vec<LogEntry>> {
        Ok(self.state().log.clone())
    }

    fn describe(&mut self) -> AppResult<Vec<SheetSummary>> {
        Ok(vec![SheetSummary {
            name: "memory".into(),
            rows: self.state().table.len(),
        }])
    }
}
