//! Attendance report: the attendee table flattened to CSV, JSON or a styled
//! XLSX sheet.

mod excel_date;
mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
mod xlsx;

pub use logic::ExportLogic;
pub use model::AttendanceExport;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::{Path, PathBuf};

pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} report written: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// `file` as given, or with the format's extension when it has none.
    pub fn output_path(self, file: &str) -> PathBuf {
        let path = PathBuf::from(file);
        if path.extension().is_some() {
            path
        } else {
            path.with_extension(self.extension())
        }
    }
}
