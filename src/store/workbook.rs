//! Spreadsheet accessor over a local workbook.
//!
//! A workbook is a directory; each worksheet is a `<title>.csv` file inside it,
//! so the organizer can edit the roster with any spreadsheet program. Rows and
//! columns are 1-based, row 1 is the header row, which means the data record at
//! 0-based index `i` lives at sheet row `i + 2`.

use crate::errors::{AppError, AppResult};
use crate::store::address::{column_letters, parse_a1, parse_range};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Sheet row of the first data record.
pub const FIRST_DATA_ROW: usize = 2;

/// Map a 0-based data index to its 1-based sheet row.
pub fn sheet_row(index: usize) -> usize {
    index + FIRST_DATA_ROW
}

#[derive(Debug, Clone)]
pub struct Workbook {
    path: PathBuf,
}

impl Workbook {
    /// Open an existing workbook directory.
    pub fn open(path: &Path) -> AppResult<Self> {
        if !path.is_dir() {
            return Err(AppError::StoreUnavailable(format!(
                "workbook '{}' not found",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Create the workbook directory (if needed) and every listed worksheet
    /// that does not exist yet, seeded with the given rows.
    pub fn create(path: &Path, sheets: &[(&str, Vec<Vec<String>>)]) -> AppResult<Self> {
        fs::create_dir_all(path)?;
        let book = Self {
            path: path.to_path_buf(),
        };

        for (title, rows) in sheets {
            if book.has_worksheet(title) {
                continue;
            }
            let sheet = Worksheet {
                title: title.to_string(),
                path: book.sheet_path(title),
                grid: rows.clone(),
            };
            sheet.persist()?;
        }

        Ok(book)
    }

    /// Workbook name, i.e. the directory name.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sheet_path(&self, title: &str) -> PathBuf {
        self.path.join(format!("{title}.csv"))
    }

    pub fn has_worksheet(&self, title: &str) -> bool {
        self.sheet_path(title).is_file()
    }

    /// Titles of all worksheets, sorted.
    pub fn worksheets(&self) -> AppResult<Vec<String>> {
        let mut titles = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let p = entry?.path();
            if p.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv"))
                && let Some(stem) = p.file_stem()
            {
                titles.push(stem.to_string_lossy().to_string());
            }
        }
        titles.sort();
        Ok(titles)
    }

    pub fn worksheet(&self, title: &str) -> AppResult<Worksheet> {
        let path = self.sheet_path(title);
        if !path.is_file() {
            return Err(AppError::WorksheetNotFound(title.to_string()));
        }
        Worksheet::load(title, path)
    }
}

/// One data row keyed by header.
#[derive(Debug, Clone)]
pub struct Record {
    /// 0-based position after the header row.
    pub index: usize,
    values: HashMap<String, String>,
}

impl Record {
    /// Value for `column`, empty when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct Worksheet {
    title: String,
    path: PathBuf,
    grid: Vec<Vec<String>>,
}

impl Worksheet {
    fn load(title: &str, path: PathBuf) -> AppResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)?;

        let mut grid = Vec::new();
        for rec in reader.records() {
            let rec = rec?;
            grid.push(rec.iter().map(str::to_string).collect::<Vec<_>>());
        }

        // Spreadsheet programs like to prepend a UTF-8 BOM.
        if let Some(first) = grid.first_mut().and_then(|r| r.first_mut())
            && let Some(stripped) = first.strip_prefix('\u{feff}')
        {
            *first = stripped.to_string();
        }

        Ok(Self {
            title: title.to_string(),
            path,
            grid,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of rows including the header row.
    pub fn row_count(&self) -> usize {
        self.grid.len()
    }

    /// Header row, trimmed.
    pub fn header(&self) -> Vec<String> {
        self.grid
            .first()
            .map(|r| r.iter().map(|h| h.trim().to_string()).collect())
            .unwrap_or_default()
    }

    /// 1-based column of `name` in the header row.
    pub fn column_of(&self, name: &str) -> Option<usize> {
        self.header().iter().position(|h| h == name).map(|i| i + 1)
    }

    /// All data rows keyed by header. Fully empty rows are skipped without
    /// shifting the index of the rows after them.
    pub fn records(&self) -> Vec<Record> {
        let header = self.header();

        self.grid
            .iter()
            .skip(1)
            .enumerate()
            .filter(|(_, row)| row.iter().any(|c| !c.trim().is_empty()))
            .map(|(index, row)| {
                let mut values = HashMap::new();
                for (i, name) in header.iter().enumerate() {
                    if name.is_empty() {
                        continue;
                    }
                    let v = row.get(i).cloned().unwrap_or_default();
                    values.entry(name.clone()).or_insert(v);
                }
                Record { index, values }
            })
            .collect()
    }

    /// Single-cell read; outside the grid reads as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        if row == 0 || col == 0 {
            return "";
        }
        self.grid
            .get(row - 1)
            .and_then(|r| r.get(col - 1))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Single-cell read in A1 notation.
    pub fn acell(&self, addr: &str) -> AppResult<String> {
        let (row, col) = parse_a1(addr)?;
        Ok(self.cell(row, col).to_string())
    }

    fn set(&mut self, row: usize, col: usize, value: &str) -> AppResult<()> {
        if row == 0 || col == 0 {
            return Err(AppError::InvalidCell(format!("{}{row}", column_letters(col))));
        }
        if self.grid.len() < row {
            self.grid.resize_with(row, Vec::new);
        }
        let r = &mut self.grid[row - 1];
        if r.len() < col {
            r.resize(col, String::new());
        }
        r[col - 1] = value.to_string();
        Ok(())
    }

    /// Single-cell write, persisted immediately.
    pub fn update_cell(&mut self, row: usize, col: usize, value: &str) -> AppResult<()> {
        self.set(row, col, value)?;
        self.persist()
    }

    /// Several cells written with a single save.
    pub fn update_cells(&mut self, cells: &[(usize, usize, String)]) -> AppResult<()> {
        for (row, col, value) in cells {
            self.set(*row, *col, value)?;
        }
        self.persist()
    }

    /// Range write in A1 notation (`"A2:C2"`); `values` is row-major.
    pub fn update_range(&mut self, range: &str, values: &[Vec<String>]) -> AppResult<()> {
        let ((r0, c0), (r1, c1)) = parse_range(range)?;
        if values.len() > r1 - r0 + 1 || values.iter().any(|v| v.len() > c1 - c0 + 1) {
            return Err(AppError::InvalidCell(format!(
                "{range}: values do not fit the range"
            )));
        }

        for (dr, row) in values.iter().enumerate() {
            for (dc, value) in row.iter().enumerate() {
                self.set(r0 + dr, c0 + dc, value)?;
            }
        }
        self.persist()
    }

    pub fn append_row(&mut self, values: &[String]) -> AppResult<()> {
        self.grid.push(values.to_vec());
        self.persist()
    }

    /// Write the grid back, padded to a rectangle, through a temp file.
    fn persist(&self) -> AppResult<()> {
        let width = self.grid.iter().map(Vec::len).max().unwrap_or(0);
        let tmp = self.path.with_extension("csv.tmp");

        {
            let mut writer = WriterBuilder::new().flexible(true).from_path(&tmp)?;
            for row in &self.grid {
                let mut padded = row.clone();
                padded.resize(width, String::new());
                writer.write_record(&padded)?;
            }
            writer.flush()?;
        }

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
