use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::roster::RosterEntry;
use crate::store;
use crate::ui::messages::{info, success, warning};
use csv::{ReaderBuilder, Trim};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Import { file } = cmd else {
        return Ok(());
    };

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(file)?;
    let mut roster = Vec::new();
    for rec in reader.deserialize::<RosterEntry>() {
        roster.push(rec?);
    }
    info(format!("Read {} roster rows from {file}", roster.len()));

    let mut repo = store::open(cfg)?;
    let added = repo.provision(&roster)?;
    let skipped = roster.len() - added;

    if let Err(e) = repo.log(
        "import",
        file,
        &format!("{added} attendees added, {skipped} skipped"),
    ) {
        warning(format!("Failed to write operation journal: {e}"));
    }

    success(format!("Imported {added} attendees ({skipped} skipped)."));
    Ok(())
}
