//! Cell reference algebra: "B4" <-> (row, col) conversions
//!
//! Every other module goes through these functions; nothing else parses
//! column letters or row digits on its own.

use crate::error::{MapError, MapResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Zero-based cell position (e.g. "A1" is row 0, col 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: u32,
    pub col: u32,
}

impl CellIndex {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl PartialOrd for CellIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then_with(|| self.col.cmp(&other.col))
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_cell_ref(*self))
    }
}

impl FromStr for CellIndex {
    type Err = MapError;

    fn from_str(s: &str) -> MapResult<Self> {
        parse_cell_ref(s)
    }
}

/// Parse a reference like "B4" into a 0-based [`CellIndex`]
///
/// Only uppercase column letters followed by a 1-based row number are
/// accepted. Surrounding whitespace is ignored.
pub fn parse_cell_ref(cell_ref: &str) -> MapResult<CellIndex> {
    let invalid = || MapError::InvalidReference(cell_ref.to_string());
    let s = cell_ref.trim();

    let split = s
        .find(|c: char| !c.is_ascii_uppercase())
        .ok_or_else(invalid)?;
    let (letters, digits) = s.split_at(split);

    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let mut col = 0u64;
    for b in letters.bytes() {
        col = col
            .checked_mul(26)
            .and_then(|acc| acc.checked_add((b - b'A' + 1) as u64))
            .ok_or_else(invalid)?;
    }
    let col = u32::try_from(col - 1).map_err(|_| invalid())?;

    let row = digits.parse::<u32>().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }

    Ok(CellIndex { row: row - 1, col })
}

/// Convert a 0-based column index to its letters (0 -> A, 25 -> Z, 26 -> AA)
pub fn format_column_index(col: u32) -> String {
    let mut n = col as u64 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let remainder = ((n - 1) % 26) as u8;
        letters.push((b'A' + remainder) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Convert a 0-based index back to a reference like "B4"
pub fn format_cell_ref(index: CellIndex) -> String {
    format!("{}{}", format_column_index(index.col), index.row as u64 + 1)
}
