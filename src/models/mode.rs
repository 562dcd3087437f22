use serde::{Deserialize, Serialize};

/// Kiosk operating mode, stored as `Check-in` / `Check-out`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mode {
    #[serde(rename = "Check-in")]
    CheckIn,
    #[serde(rename = "Check-out")]
    CheckOut,
}

impl Mode {
    /// Convert enum → store string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Mode::CheckIn => "Check-in",
            Mode::CheckOut => "Check-out",
        }
    }

    /// Convert store string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim() {
            "Check-in" => Some(Mode::CheckIn),
            "Check-out" => Some(Mode::CheckOut),
            _ => None,
        }
    }

    /// Helper: lenient parse for CLI / form input (`in`, `checkin`, `Check-in`, ...)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "in" | "checkin" => Some(Mode::CheckIn),
            "out" | "checkout" => Some(Mode::CheckOut),
            _ => None,
        }
    }
}
