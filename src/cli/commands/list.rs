use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::attendee::Attendee;
use crate::store;
use crate::utils::colors::{RESET, color_for_status, colorize_optional};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::List {
        pending,
        checked_in,
        checked_out,
    } = cmd
    else {
        return Ok(());
    };

    let table = store::open(cfg)?.load_attendees()?;

    let keep = |a: &Attendee| {
        if *pending {
            !a.is_checked_in()
        } else if *checked_in {
            a.is_checked_in() && !a.is_checked_out()
        } else if *checked_out {
            a.is_checked_out()
        } else {
            true
        }
    };

    let rows: Vec<&Attendee> = table.rows.iter().filter(|&a| keep(a)).collect();
    if rows.is_empty() {
        println!("No attendees to show.");
        return Ok(());
    }

    let mut out = Table::new(&[
        "ID", "Name", "Table", "Status", "Check-in", "Check-out", "Device",
    ]);
    for a in &rows {
        let status = a.status();
        out.add_row(vec![
            a.employee_id.clone(),
            a.name.clone(),
            colorize_optional(&a.table_no),
            format!("{}{status}{RESET}", color_for_status(status)),
            colorize_optional(&a.check_in_time),
            colorize_optional(&a.check_out_time),
            colorize_optional(&a.device_fingerprint),
        ]);
    }

    print!("{}", out.render());
    println!("\n{} of {} attendees", rows.len(), table.len());
    Ok(())
}
