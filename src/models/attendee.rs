use serde::Serialize;

/// Column headers of the attendee worksheet.
pub const COL_EMPLOYEE_ID: &str = "EmployeeID";
pub const COL_NAME: &str = "Name";
pub const COL_TABLE_NO: &str = "TableNo";
pub const COL_CHECK_IN: &str = "CheckInTime";
pub const COL_CHECK_OUT: &str = "CheckOutTime";
pub const COL_FINGERPRINT: &str = "DeviceFingerprint";

pub const ATTENDEE_HEADERS: [&str; 6] = [
    COL_EMPLOYEE_ID,
    COL_NAME,
    COL_TABLE_NO,
    COL_CHECK_IN,
    COL_CHECK_OUT,
    COL_FINGERPRINT,
];

/// One attendee row. Empty strings stand for "not set".
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Attendee {
    /// Storage address understood by the store that produced the row
    /// (1-based sheet row for worksheets, row id for SQLite).
    pub row: usize,
    pub employee_id: String,
    pub name: String,
    pub table_no: String,
    pub check_in_time: String,
    pub check_out_time: String,
    pub device_fingerprint: String,
}

impl Attendee {
    pub fn is_checked_in(&self) -> bool {
        !self.check_in_time.trim().is_empty()
    }

    pub fn is_checked_out(&self) -> bool {
        !self.check_out_time.trim().is_empty()
    }

    /// Short status label used by `list`, `status` and exports.
    pub fn status(&self) -> &'static str {
        match (self.is_checked_in(), self.is_checked_out()) {
            (_, true) => "checked-out",
            (true, false) => "checked-in",
            (false, false) => "pending",
        }
    }
}

/// In-memory snapshot of the attendee sheet.
#[derive(Debug, Clone, Default)]
pub struct AttendeeTable {
    pub rows: Vec<Attendee>,
    /// Whether the store carries a fingerprint column (duplicate-device guard active).
    pub device_binding: bool,
}

impl AttendeeTable {
    pub fn new(rows: Vec<Attendee>, device_binding: bool) -> Self {
        Self {
            rows,
            device_binding,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (checked in, checked out) counters.
    pub fn counts(&self) -> (usize, usize) {
        let checked_in = self.rows.iter().filter(|a| a.is_checked_in()).count();
        let checked_out = self.rows.iter().filter(|a| a.is_checked_out()).count();
        (checked_in, checked_out)
    }
}
