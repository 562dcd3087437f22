//! Time utilities: parsing HH:MM, UTC offsets, kiosk clock and timestamp formatting.

use crate::errors::{AppError, AppResult};
use chrono::{FixedOffset, Local, NaiveDateTime, NaiveTime, Utc};

/// Format used for the check-in / check-out cells.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

pub fn format_hhmm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Parse `+08:00`, `-0530`, `Z` or `UTC`. Empty input means "use local time".
pub fn parse_utc_offset(s: &str) -> AppResult<Option<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return Ok(FixedOffset::east_opt(0));
    }

    let (sign, rest) = match s.as_bytes()[0] {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return Err(AppError::InvalidOffset(s.to_string())),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidOffset(s.to_string()));
    }

    let hours: i32 = digits[..2].parse().map_err(|_| AppError::InvalidOffset(s.to_string()))?;
    let minutes: i32 = digits[2..].parse().map_err(|_| AppError::InvalidOffset(s.to_string()))?;
    if hours > 23 || minutes > 59 {
        return Err(AppError::InvalidOffset(s.to_string()));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .map(Some)
        .ok_or_else(|| AppError::InvalidOffset(s.to_string()))
}

/// Wall-clock time at the event location.
pub fn now_at(offset: Option<FixedOffset>) -> NaiveDateTime {
    match offset {
        Some(tz) => Utc::now().with_timezone(&tz).naive_local(),
        None => Local::now().naive_local(),
    }
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
