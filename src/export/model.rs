use crate::models::attendee::Attendee;
use serde::Serialize;

/// Flat attendance row used by every export format.
#[derive(Serialize, Clone, Debug)]
pub struct AttendanceExport {
    pub employee_id: String,
    pub name: String,
    pub table_no: String,
    pub status: String,
    pub check_in_time: String,
    pub check_out_time: String,
    pub device_fingerprint: String,
}

impl From<&Attendee> for AttendanceExport {
    fn from(a: &Attendee) -> Self {
        Self {
            employee_id: a.employee_id.clone(),
            name: a.name.clone(),
            table_no: a.table_no.clone(),
            status: a.status().to_string(),
            check_in_time: a.check_in_time.clone(),
            check_out_time: a.check_out_time.clone(),
            device_fingerprint: a.device_fingerprint.clone(),
        }
    }
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "employee_id",
        "name",
        "table_no",
        "status",
        "check_in_time",
        "check_out_time",
        "device_fingerprint",
    ]
}

pub(crate) fn attendance_to_row(e: &AttendanceExport) -> Vec<String> {
    vec![
        e.employee_id.clone(),
        e.name.clone(),
        e.table_no.clone(),
        e.status.clone(),
        e.check_in_time.clone(),
        e.check_out_time.clone(),
        e.device_fingerprint.clone(),
    ]
}
