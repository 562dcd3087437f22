//! Repository over a spreadsheet workbook: attendees sheet, a `Settings` sheet
//! holding one configuration row at `A2:C2`, and a `Log` sheet for the journal.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::attendee::{
    ATTENDEE_HEADERS, Attendee, AttendeeTable, COL_CHECK_IN, COL_CHECK_OUT, COL_EMPLOYEE_ID,
    COL_FINGERPRINT, COL_NAME, COL_TABLE_NO,
};
use crate::models::log_entry::LogEntry;
use crate::models::roster::RosterEntry;
use crate::models::settings::EventSettings;
use crate::store::workbook::{Workbook, Worksheet, sheet_row};
use crate::store::{Repository, SheetSummary, WriteOutcome};
use chrono::Local;
use std::collections::HashSet;
use std::path::Path;

const SETTINGS_HEADERS: [&str; 3] = ["Mode", "StartTime", "EndTime"];
const SETTINGS_RANGE: &str = "A2:C2";
const LOG_HEADERS: [&str; 4] = ["date", "operation", "target", "message"];

/// Columns the lookup cannot work without.
const REQUIRED_COLUMNS: [&str; 4] = [COL_EMPLOYEE_ID, COL_NAME, COL_CHECK_IN, COL_CHECK_OUT];

pub struct SheetStore {
    book: Workbook,
    attendees: String,
    settings: String,
    log: String,
}

fn header_row(headers: &[&str]) -> Vec<String> {
    headers.iter().map(|h| h.to_string()).collect()
}

impl SheetStore {
    pub fn open(path: &Path, cfg: &Config) -> AppResult<Self> {
        Ok(Self {
            book: Workbook::open(path)?,
            attendees: cfg.worksheet.clone(),
            settings: cfg.settings_worksheet.clone(),
            log: cfg.log_worksheet.clone(),
        })
    }

    /// Create the workbook with the attendee headers, the default settings row
    /// and an empty journal. Existing worksheets are left untouched.
    pub fn create(path: &Path, cfg: &Config) -> AppResult<Self> {
        let defaults = EventSettings::default();
        Workbook::create(
            path,
            &[
                (cfg.worksheet.as_str(), vec![header_row(&ATTENDEE_HEADERS)]),
                (
                    cfg.settings_worksheet.as_str(),
                    vec![header_row(&SETTINGS_HEADERS), defaults.to_row()],
                ),
                (cfg.log_worksheet.as_str(), vec![header_row(&LOG_HEADERS)]),
            ],
        )?;
        Self::open(path, cfg)
    }

    fn attendee_sheet(&self) -> AppResult<Worksheet> {
        let ws = self.book.worksheet(&self.attendees)?;
        for column in REQUIRED_COLUMNS {
            if ws.column_of(column).is_none() {
                return Err(AppError::MissingColumn {
                    sheet: self.attendees.clone(),
                    column: column.to_string(),
                });
            }
        }
        Ok(ws)
    }

    fn required_column(&self, ws: &Worksheet, column: &str) -> AppResult<usize> {
        ws.column_of(column).ok_or_else(|| AppError::MissingColumn {
            sheet: self.attendees.clone(),
            column: column.to_string(),
        })
    }

    /// Open a worksheet, creating it with `headers` when missing.
    fn sheet_or_create(&self, title: &str, headers: &[&str]) -> AppResult<Worksheet> {
        if !self.book.has_worksheet(title) {
            Workbook::create(self.book.path(), &[(title, vec![header_row(headers)])])?;
        }
        self.book.worksheet(title)
    }
}

impl Repository for SheetStore {
    fn name(&self) -> String {
        self.book.name()
    }

    fn load_attendees(&mut self) -> AppResult<AttendeeTable> {
        let ws = self.attendee_sheet()?;
        let device_binding = ws.column_of(COL_FINGERPRINT).is_some();

        let rows = ws
            .records()
            .into_iter()
            .map(|rec| Attendee {
                row: sheet_row(rec.index),
                employee_id: rec.get(COL_EMPLOYEE_ID).trim().to_string(),
                name: rec.get(COL_NAME).trim().to_string(),
                table_no: rec.get(COL_TABLE_NO).trim().to_string(),
                check_in_time: rec.get(COL_CHECK_IN).trim().to_string(),
                check_out_time: rec.get(COL_CHECK_OUT).trim().to_string(),
                device_fingerprint: rec.get(COL_FINGERPRINT).trim().to_string(),
            })
            .collect();

        Ok(AttendeeTable::new(rows, device_binding))
    }

    fn record_check_in(
        &mut self,
        attendee: &Attendee,
        timestamp: &str,
        fingerprint: &str,
    ) -> AppResult<WriteOutcome> {
        let mut ws = self.attendee_sheet()?;
        let col_in = self.required_column(&ws, COL_CHECK_IN)?;

        let mut cells = vec![(attendee.row, col_in, timestamp.to_string())];
        if let Some(col_fp) = ws.column_of(COL_FINGERPRINT) {
            cells.push((attendee.row, col_fp, fingerprint.to_string()));
        }

        ws.update_cells(&cells)?;
        Ok(WriteOutcome::Applied)
    }

    fn record_check_out(
        &mut self,
        attendee: &Attendee,
        timestamp: &str,
    ) -> AppResult<WriteOutcome> {
        let mut ws = self.attendee_sheet()?;
        let col_out = self.required_column(&ws, COL_CHECK_OUT)?;

        ws.update_cell(attendee.row, col_out, timestamp)?;
        Ok(WriteOutcome::Applied)
    }

    fn load_settings(&mut self) -> AppResult<EventSettings> {
        let ws = match self.book.worksheet(&self.settings) {
            Ok(ws) => ws,
            Err(AppError::WorksheetNotFound(_)) => return Ok(EventSettings::default()),
            Err(e) => return Err(e),
        };

        Ok(EventSettings::from_strings_or_default(
            &ws.acell("A2")?,
            &ws.acell("B2")?,
            &ws.acell("C2")?,
        ))
    }

    fn save_settings(&mut self, settings: &EventSettings) -> AppResult<()> {
        let mut ws = self.sheet_or_create(&self.settings, &SETTINGS_HEADERS)?;
        ws.update_range(SETTINGS_RANGE, &[settings.to_row()])
    }

    fn provision(&mut self, roster: &[RosterEntry]) -> AppResult<usize> {
        let mut ws = self.attendee_sheet()?;
        let width = ws.header().len();
        let col_id = self.required_column(&ws, COL_EMPLOYEE_ID)?;
        let col_name = self.required_column(&ws, COL_NAME)?;
        let col_table = ws.column_of(COL_TABLE_NO);

        let mut known: HashSet<String> = ws
            .records()
            .iter()
            .map(|r| r.get(COL_EMPLOYEE_ID).trim().to_lowercase())
            .collect();

        let mut added = 0;
        for entry in roster {
            let id = entry.employee_id.trim();
            if id.is_empty() || !known.insert(id.to_lowercase()) {
                continue;
            }

            let mut row = vec![String::new(); width];
            row[col_id - 1] = id.to_string();
            row[col_name - 1] = entry.name.trim().to_string();
            if let Some(c) = col_table {
                row[c - 1] = entry.table_no.trim().to_string();
            }

            ws.append_row(&row)?;
            added += 1;
        }

        Ok(added)
    }

    fn log(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        let mut ws = self.sheet_or_create(&self.log, &LOG_HEADERS)?;
        ws.append_row(&[
            Local::now().to_rfc3339(),
            operation.to_string(),
            target.to_string(),
            message.to_string(),
        ])
    }

    fn load_log(&mut self) -> AppResult<Vec<LogEntry>> {
        let ws = match self.book.worksheet(&self.log) {
            Ok(ws) => ws,
            Err(AppError::WorksheetNotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        Ok(ws
            .records()
            .into_iter()
            .map(|r| LogEntry {
                date: r.get("date").to_string(),
                operation: r.get("operation").to_string(),
                target: r.get("target").to_string(),
                message: r.get("message").to_string(),
            })
            .collect())
    }

    fn describe(&mut self) -> AppResult<Vec<SheetSummary>> {
        // Fails on a missing attendee sheet or column.
        self.attendee_sheet()?;

        let mut out = Vec::new();
        for title in self.book.worksheets()? {
            let ws = self.book.worksheet(&title)?;
            out.push(SheetSummary {
                name: ws.title().to_string(),
                rows: ws.row_count().saturating_sub(1),
            });
        }
        Ok(out)
    }
}
