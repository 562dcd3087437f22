//! Availability window check.

use crate::errors::KioskError;
use crate::models::settings::EventSettings;
use chrono::NaiveTime;

/// Inclusive `start <= now <= end` on the full time of day.
/// Windows crossing midnight (`start > end`) are always closed.
pub fn is_open(settings: &EventSettings, now: NaiveTime) -> bool {
    settings.start <= now && now <= settings.end
}

pub fn ensure_open(settings: &EventSettings, now: NaiveTime) -> Result<(), KioskError> {
    if is_open(settings, now) {
        Ok(())
    } else {
        Err(KioskError::WindowClosed)
    }
}
