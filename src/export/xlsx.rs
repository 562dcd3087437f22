use crate::errors::{AppError, AppResult};
use crate::export::excel_date::parse_to_excel_date;
use crate::export::model::{attendance_to_row, get_headers};
use crate::export::{AttendanceExport, notify_export_success};
use crate::ui::messages::info;
use crate::utils::colors;
use rust_xlsxwriter::{Color, Format, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

const STATUS_COL: usize = 3;

/// Styled XLSX report: banded rows, frozen header, auto column widths.
pub(crate) fn export_xlsx(rows: &[AttendanceExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Attendance").map_err(to_export_error)?;

    let headers = get_headers();
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, *header, &header_format)
            .map_err(to_export_error)?;
    }
    worksheet.set_freeze_panes(1, 0).map_err(to_export_error)?;

    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();
    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    for (row_index, item) in rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, value) in attendance_to_row(item).iter().enumerate() {
            let font = if col == STATUS_COL {
                status_color(value)
            } else {
                Color::Black
            };
            write_cell(worksheet, row, col as u16, value, band, font)?;
            col_widths[col] = col_widths[col].max(UnicodeWidthStr::width(value.as_str()));
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_export_error)?;
    }

    workbook.save(path).map_err(to_export_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

fn status_color(status: &str) -> Color {
    match colors::color_for_status(status) {
        colors::GREEN => Color::RGB(0x1E7B34),
        colors::YELLOW => Color::RGB(0x9C6500),
        _ => Color::RGB(0x7F7F7F),
    }
}

/// Timestamps become Excel dates, everything else stays text
/// (employee ids and table numbers keep leading zeros).
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    s: &str,
    bg: Color,
    font: Color,
) -> AppResult<()> {
    let fmt = Format::new()
        .set_font_color(font)
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    if let Some((num_format, serial)) = parse_to_excel_date(s) {
        worksheet
            .write_with_format(row, col, serial, &fmt.set_num_format(num_format))
            .map_err(to_export_error)?;
        return Ok(());
    }

    worksheet
        .write_with_format(row, col, s, &fmt)
        .map_err(to_export_error)?;
    Ok(())
}

fn to_export_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
