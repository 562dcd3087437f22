use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{Kiosk, gate};
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::{header, info};
use crate::utils::time::format_hhmm;

pub fn handle(_cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let kiosk = Kiosk::new(store::open(cfg)?, cfg)?;
    let settings = kiosk.settings()?;
    let table = kiosk.attendees()?;
    let now = kiosk.now();
    let (checked_in, checked_out) = table.counts();

    header(format!("Event status ({})", kiosk.store_name()));
    info(format!("Mode        : {}", settings.mode.to_db_str()));
    info(format!(
        "Window      : {} - {} ({})",
        format_hhmm(settings.start),
        format_hhmm(settings.end),
        if gate::is_open(&settings, now.time()) {
            "open"
        } else {
            "closed"
        }
    ));
    info(format!("Now         : {}", now.format("%Y-%m-%d %H:%M")));
    info(format!("Attendees   : {}", table.len()));
    info(format!("Checked in  : {checked_in}"));
    info(format!("Checked out : {checked_out}"));
    info(format!(
        "Pending     : {}",
        table.len().saturating_sub(checked_in)
    ));
    Ok(())
}
