use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::store;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Export {
        format,
        file,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let table = store::open(cfg)?.load_attendees()?;
    let path = format.output_path(file);
    ExportLogic::export(&table, format, &path, *force)
}
