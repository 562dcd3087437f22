//! Persistence layer.
//!
//! The transition logic only talks to [`Repository`], so the spreadsheet
//! workbook can be swapped for a datastore with conditional writes without
//! touching `core`.

pub mod address;
pub mod sheet_store;
pub mod sqlite;
pub mod workbook;

use crate::config::{Backend, Config};
use crate::errors::AppResult;
use crate::models::attendee::{Attendee, AttendeeTable};
use crate::models::log_entry::LogEntry;
use crate::models::roster::RosterEntry;
use crate::models::settings::EventSettings;

pub use sheet_store::SheetStore;
pub use sqlite::SqliteStore;

/// Result of a guarded write, as seen by the store itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    /// The conditional write found the timestamp already set.
    AlreadyRecorded,
    /// Storage-level uniqueness rejected the fingerprint.
    DeviceTaken,
}

/// Worksheet / table name with its row count, for `check`.
#[derive(Debug, Clone)]
pub struct SheetSummary {
    pub name: String,
    pub rows: usize,
}

pub trait Repository: Send {
    /// Human-readable store name (workbook or database file).
    fn name(&self) -> String;

    /// Read the full attendee table.
    fn load_attendees(&mut self) -> AppResult<AttendeeTable>;

    /// Write the check-in timestamp and bind the fingerprint.
    fn record_check_in(
        &mut self,
        attendee: &Attendee,
        timestamp: &str,
        fingerprint: &str,
    ) -> AppResult<WriteOutcome>;

    fn record_check_out(&mut self, attendee: &Attendee, timestamp: &str)
    -> AppResult<WriteOutcome>;

    /// Current settings; defaults when the stored row is missing or unusable.
    fn load_settings(&mut self) -> AppResult<EventSettings>;

    fn save_settings(&mut self, settings: &EventSettings) -> AppResult<()>;

    /// Out-of-band roster provisioning. Returns how many rows were added;
    /// employee ids already present are skipped.
    fn provision(&mut self, roster: &[RosterEntry]) -> AppResult<usize>;

    /// Append a line to the operation journal.
    fn log(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()>;

    fn load_log(&mut self) -> AppResult<Vec<LogEntry>>;

    /// Connection check: verify the attendee layout and list sheets/tables.
    fn describe(&mut self) -> AppResult<Vec<SheetSummary>>;
}

/// Open the configured store. Fails when it does not exist yet.
pub fn open(cfg: &Config) -> AppResult<Box<dyn Repository>> {
    let path = cfg.store_path();
    match cfg.backend {
        Backend::Workbook => Ok(Box::new(SheetStore::open(&path, cfg)?)),
        Backend::Sqlite => Ok(Box::new(SqliteStore::open(&path)?)),
    }
}

/// Create (or upgrade) the configured store.
pub fn create(cfg: &Config) -> AppResult<Box<dyn Repository>> {
    let path = cfg.store_path();
    match cfg.backend {
        Backend::Workbook => Ok(Box::new(SheetStore::create(&path, cfg)?)),
        Backend::Sqlite => Ok(Box::new(SqliteStore::create(&path)?)),
    }
}
