use crate::errors::AppResult;
use crate::store::Repository;
use crate::utils::colors::{RESET, color_for_operation};
use crate::utils::table::display_width;

const OP_WIDTH_LIMIT: usize = 60;

pub struct LogLogic;

impl LogLogic {
    /// Print the operation journal, one line per entry.
    pub fn print_log(store: &mut dyn Repository) -> AppResult<()> {
        let entries = store.load_log()?;

        if entries.is_empty() {
            println!("📜 Operation journal is empty.");
            return Ok(());
        }

        let rows: Vec<(usize, String, String, String, String)> = entries
            .into_iter()
            .enumerate()
            .map(|(i, e)| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(e.date);

                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };

                (i + 1, date, e.operation, op_target, e.message)
            })
            .collect();

        let op_w = rows
            .iter()
            .map(|(_, _, _, op_target, _)| display_width(op_target))
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_LIMIT);
        let id_w = rows.len().to_string().len();
        let date_w = rows
            .iter()
            .map(|(_, date, _, _, _)| date.len())
            .max()
            .unwrap_or(0);

        println!("📜 Operation journal:\n");

        for (id, date, operation, op_target, message) in rows {
            let visible = if display_width(&op_target) > OP_WIDTH_LIMIT {
                let mut s: String = op_target.chars().take(OP_WIDTH_LIMIT - 3).collect();
                s.push_str("...");
                s
            } else {
                op_target
            };
            let padding = " ".repeat(op_w.saturating_sub(display_width(&visible)));

            // only the operation word is colored
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => format!("{}{op}{RESET} {rest}", color_for_operation(&operation)),
                None => format!("{}{visible}{RESET}", color_for_operation(&operation)),
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
