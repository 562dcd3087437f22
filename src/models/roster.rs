use serde::Deserialize;

/// One provisioned attendee, as read from a roster file (`EmployeeID,Name,TableNo`).
#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    #[serde(rename = "EmployeeID")]
    pub employee_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "TableNo", default)]
    pub table_no: String,
}
