use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store;
use crate::ui::messages::{header, info, success};
use crate::utils::table::Table;

/// Connection test: open the store, verify the attendee layout, list sheets.
pub fn handle(_cmd: &Commands, cfg: &Config) -> AppResult<()> {
    header("Store connection test");
    info(format!(
        "Opening {:?} store at {}",
        cfg.backend,
        cfg.store_path().display()
    ));

    let mut repo = store::open(cfg)?;
    success(format!("Store '{}' opened.", repo.name()));

    let sheets = repo.describe()?;
    let mut table = Table::new(&["Worksheet", "Rows"]);
    for s in &sheets {
        table.add_row(vec![s.name.clone(), s.rows.to_string()]);
    }
    print!("{}", table.render());

    let attendees = repo.load_attendees()?;
    info(format!(
        "Attendee sheet '{}': {} rows, device guard {}",
        cfg.worksheet,
        attendees.len(),
        if attendees.device_binding { "active" } else { "inactive" }
    ));

    success("All checks passed.");
    Ok(())
}
