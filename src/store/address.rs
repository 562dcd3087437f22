//! A1-notation helpers for worksheet cell addressing (1-based rows and columns).

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::OnceLock;

fn a1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z]{1,3})([1-9][0-9]*)$").expect("valid A1 regex"))
}

/// `"B2"` → `(2, 2)`, `"AA10"` → `(10, 27)`.
pub fn parse_a1(addr: &str) -> AppResult<(usize, usize)> {
    let caps = a1_re()
        .captures(addr.trim())
        .ok_or_else(|| AppError::InvalidCell(addr.to_string()))?;

    let col = caps[1]
        .to_ascii_uppercase()
        .bytes()
        .fold(0usize, |acc, b| acc * 26 + (b - b'A' + 1) as usize);
    let row: usize = caps[2]
        .parse()
        .map_err(|_| AppError::InvalidCell(addr.to_string()))?;

    Ok((row, col))
}

/// `"A2:C2"` → `((2, 1), (2, 3))`. A single cell is a 1×1 range.
pub fn parse_range(range: &str) -> AppResult<((usize, usize), (usize, usize))> {
    match range.split_once(':') {
        Some((from, to)) => {
            let start = parse_a1(from)?;
            let end = parse_a1(to)?;
            if end.0 < start.0 || end.1 < start.1 {
                return Err(AppError::InvalidCell(range.to_string()));
            }
            Ok((start, end))
        }
        None => {
            let cell = parse_a1(range)?;
            Ok((cell, cell))
        }
    }
}

/// Column number → letters (`1` → `A`, `27` → `AA`).
pub fn column_letters(mut col: usize) -> String {
    let mut out = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        out.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
