use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::AttendanceExport;
use crate::export::xlsx::export_xlsx;
use crate::models::attendee::AttendeeTable;
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write the attendance report for `table` to `file`.
    pub fn export(
        table: &AttendeeTable,
        format: &ExportFormat,
        file: &Path,
        force: bool,
    ) -> AppResult<()> {
        ensure_writable(file, force)?;

        if table.is_empty() {
            warning("No attendees found, exporting an empty report.");
        }

        let rows: Vec<AttendanceExport> = table.rows.iter().map(AttendanceExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, file),
            ExportFormat::Json => export_json(&rows, file),
            ExportFormat::Xlsx => export_xlsx(&rows, file),
        }
    }
}
