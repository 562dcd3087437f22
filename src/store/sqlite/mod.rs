//! SQLite-backed repository. Writes are conditional and the fingerprint is
//! unique at the storage layer, so concurrent kiosks cannot double-book.

pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;

use crate::errors::{AppError, AppResult};
use crate::models::attendee::{Attendee, AttendeeTable};
use crate::models::log_entry::LogEntry;
use crate::models::roster::RosterEntry;
use crate::models::settings::EventSettings;
use crate::store::{Repository, SheetSummary, WriteOutcome};
use pool::DbPool;
use std::path::{Path, PathBuf};

const TABLES: [&str; 3] = ["attendees", "settings", "log"];

pub struct SqliteStore {
    pool: DbPool,
    path: PathBuf,
}

impl SqliteStore {
    /// Open an existing database and apply pending migrations.
    pub fn open(path: &Path) -> AppResult<Self> {
        if !path.is_file() {
            return Err(AppError::StoreUnavailable(format!(
                "database '{}' not found",
                path.display()
            )));
        }
        Self::connect(path)
    }

    /// Create the database file if needed and bring the schema up to date.
    pub fn create(path: &Path) -> AppResult<Self> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir)?;
        }
        Self::connect(path)
    }

    fn connect(path: &Path) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        migrate::run_pending_migrations(&pool.conn)
            .map_err(|e| AppError::Migration(e.to_string()))?;
        Ok(Self {
            pool,
            path: path.to_path_buf(),
        })
    }
}

impl Repository for SqliteStore {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn load_attendees(&mut self) -> AppResult<AttendeeTable> {
        let rows = queries::load_attendees(&self.pool.conn)?;
        Ok(AttendeeTable::new(rows, true))
    }

    fn record_check_in(
        &mut self,
        attendee: &Attendee,
        timestamp: &str,
        fingerprint: &str,
    ) -> AppResult<WriteOutcome> {
        Ok(queries::check_in(
            &self.pool.conn,
            attendee.row,
            timestamp,
            fingerprint,
        )?)
    }

    fn record_check_out(
        &mut self,
        attendee: &Attendee,
        timestamp: &str,
    ) -> AppResult<WriteOutcome> {
        Ok(queries::check_out(&self.pool.conn, attendee.row, timestamp)?)
    }

    fn load_settings(&mut self) -> AppResult<EventSettings> {
        Ok(queries::load_settings(&self.pool.conn)?)
    }

    fn save_settings(&mut self, settings: &EventSettings) -> AppResult<()> {
        Ok(queries::save_settings(&self.pool.conn, settings)?)
    }

    fn provision(&mut self, roster: &[RosterEntry]) -> AppResult<usize> {
        Ok(self.pool.with_conn(|conn| queries::provision(conn, roster))?)
    }

    fn log(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        log::ttlog(&self.pool.conn, operation, target, message)
    }

    fn load_log(&mut self) -> AppResult<Vec<LogEntry>> {
        log::load_log(&self.pool.conn)
    }

    fn describe(&mut self) -> AppResult<Vec<SheetSummary>> {
        let integrity: String =
            self.pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
        if integrity != "ok" {
            return Err(AppError::StoreUnavailable(format!(
                "integrity check failed: {integrity}"
            )));
        }

        let mut out = Vec::new();
        for table in TABLES {
            out.push(SheetSummary {
                name: table.to_string(),
                rows: queries::count_rows(&self.pool.conn, table)?,
            });
        }
        Ok(out)
    }
}
