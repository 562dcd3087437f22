use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Kiosk;
use crate::errors::{AppError, AppResult};
use crate::models::mode::Mode;
use crate::models::settings::EventSettings;
use crate::store;
use crate::ui::messages::{info, success};
use crate::utils::time::{format_hhmm, parse_optional_time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Settings {
        mode,
        start,
        end,
        password,
    } = cmd
    else {
        return Ok(());
    };

    let kiosk = Kiosk::new(store::open(cfg)?, cfg)?;
    let current = kiosk.settings()?;

    if mode.is_none() && start.is_none() && end.is_none() {
        print_settings(&current);
        return Ok(());
    }

    kiosk.verify_secret(password.as_deref().unwrap_or(""))?;

    let mode = match mode {
        Some(m) => Mode::from_code(m).ok_or_else(|| AppError::InvalidMode(m.clone()))?,
        None => current.mode,
    };
    let updated = EventSettings {
        mode,
        start: parse_optional_time(start.as_ref())?.unwrap_or(current.start),
        end: parse_optional_time(end.as_ref())?.unwrap_or(current.end),
    };

    kiosk.apply_settings(updated)?;
    success("Settings saved!");
    print_settings(&updated);
    Ok(())
}

fn print_settings(s: &EventSettings) {
    info(format!("Mode  : {}", s.mode.to_db_str()));
    info(format!("Start : {}", format_hhmm(s.start)));
    info(format!("End   : {}", format_hhmm(s.end)));
}
