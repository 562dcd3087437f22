use super::mode::Mode;
use crate::errors::{AppError, AppResult};
use crate::utils::time::{format_hhmm, parse_time};
use chrono::NaiveTime;
use serde::{Serialize, Serializer};

/// The single event settings record: mode plus the daily availability window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventSettings {
    pub mode: Mode,
    #[serde(serialize_with = "serialize_hhmm")]
    pub start: NaiveTime,
    #[serde(serialize_with = "serialize_hhmm")]
    pub end: NaiveTime,
}

fn serialize_hhmm<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_hhmm(*t))
}

impl Default for EventSettings {
    fn default() -> Self {
        Self {
            mode: Mode::CheckIn,
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
        }
    }
}

impl EventSettings {
    /// Build settings from the three stored strings (`Check-in`, `HH:MM`, `HH:MM`).
    pub fn from_strings(mode: &str, start: &str, end: &str) -> AppResult<Self> {
        let mode = Mode::from_db_str(mode)
            .or_else(|| Mode::from_code(mode))
            .ok_or_else(|| AppError::InvalidMode(mode.to_string()))?;
        let start = parse_time(start.trim()).ok_or_else(|| AppError::InvalidTime(start.to_string()))?;
        let end = parse_time(end.trim()).ok_or_else(|| AppError::InvalidTime(end.to_string()))?;

        Ok(Self { mode, start, end })
    }

    /// Like `from_strings`, but falls back to the defaults when the stored row is unusable.
    pub fn from_strings_or_default(mode: &str, start: &str, end: &str) -> Self {
        Self::from_strings(mode, start, end).unwrap_or_default()
    }

    /// The three values as stored, in column order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.mode.to_db_str().to_string(),
            format_hhmm(self.start),
            format_hhmm(self.end),
        ]
    }
}
