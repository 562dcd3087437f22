use serde::Serialize;

/// One line of the operation journal (`log` table / `Log` worksheet).
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}
