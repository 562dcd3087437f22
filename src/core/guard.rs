use crate::models::attendee::AttendeeTable;

/// True when `fingerprint` is already bound to a record other than
/// `except_row`. Empty fingerprints never match, and the guard is inactive
/// when the store has no fingerprint column.
pub fn device_in_use(table: &AttendeeTable, fingerprint: &str, except_row: Option<usize>) -> bool {
    let fp = fingerprint.trim();
    if !table.device_binding || fp.is_empty() {
        return false;
    }

    table
        .rows
        .iter()
        .filter(|a| Some(a.row) != except_row)
        .any(|a| a.device_fingerprint == fp)
}
