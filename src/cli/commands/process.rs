use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::Kiosk;
use crate::errors::{AppError, AppResult};
use crate::session::Session;
use crate::store;
use crate::ui::messages;
use crate::utils::time::parse_time;
use uuid::Uuid;

/// Run one request through the kiosk, as a receptionist would at the desk.
/// Error feedback makes the command fail; warnings do not.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Process {
        identifier,
        device,
        at,
    } = cmd
    else {
        return Ok(());
    };

    let kiosk = Kiosk::new(store::open(cfg)?, cfg)?;

    let mut now = kiosk.now();
    if let Some(t) = at {
        let t = parse_time(t).ok_or_else(|| AppError::InvalidTime(t.clone()))?;
        now = now.date().and_time(t);
    }

    // each operator request counts as its own device unless one is given
    let device = device
        .clone()
        .unwrap_or_else(|| format!("cli-{}", Uuid::new_v4()));
    let mut session = Session::with_device(&device);

    let feedback = kiosk.confirm(&mut session, identifier, now);
    if feedback.is_error() {
        return Err(AppError::Rejected(feedback.text));
    }

    messages::feedback(&feedback);
    Ok(())
}
