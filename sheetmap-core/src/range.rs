//! Range model: rectangular regions like "B4:D15", optionally scoped to a sheet

use crate::cell_ref::{CellIndex, format_cell_ref, parse_cell_ref};
use crate::error::{MapError, MapResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangular cell region as written by the user
///
/// The endpoints are kept as text; they are only validated when indices are
/// requested through [`CellRange::dimensions`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub start: String,
    pub end: String,
    /// Sheet the range lives on. `None` means the caller's selected sheet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
}

/// Bounding indices of a range, 0-based and inclusive
///
/// Counts are signed: an end that precedes its start gives a count <= 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeDimensions {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
    pub row_count: i64,
    pub col_count: i64,
}

impl RangeDimensions {
    /// True when the range covers no cells
    pub fn is_empty(&self) -> bool {
        self.row_count <= 0 || self.col_count <= 0
    }
}

/// Parse "A1:C10" or "B4" into a [`CellRange`]
///
/// Splits once on the first ':' and trims both halves. Cell syntax is not
/// checked here.
pub fn parse_range_string(text: &str, sheet: Option<&str>) -> CellRange {
    let (start, end) = match text.split_once(':') {
        Some((start, end)) => (start.trim(), end.trim()),
        None => (text.trim(), text.trim()),
    };

    CellRange {
        start: start.to_string(),
        end: end.to_string(),
        sheet: sheet.map(str::to_string),
    }
}

/// Parse a range that may carry its own sheet prefix ("Monthly!A2:B13")
///
/// An explicit prefix wins over `default_sheet`. Quoted prefixes follow the
/// Excel convention: `'Q1, 2025'!B2:C2`, with `''` for a literal quote.
pub fn parse_qualified_range(text: &str, default_sheet: Option<&str>) -> CellRange {
    let text = text.trim();
    if let Some((sheet, range)) = split_quoted_sheet(text) {
        return parse_range_string(range, Some(&sheet));
    }
    match text.rsplit_once('!') {
        Some((sheet, range)) => parse_range_string(range, Some(sheet.trim())),
        None => parse_range_string(text, default_sheet),
    }
}

/// `'Bob''s'!B2` -> ("Bob's", "B2")
fn split_quoted_sheet(text: &str) -> Option<(String, &str)> {
    let rest = text.strip_prefix('\'')?;
    let mut sheet = String::new();
    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '\'' {
            sheet.push(c);
            continue;
        }
        if chars.peek().is_some_and(|&(_, next)| next == '\'') {
            chars.next();
            sheet.push('\'');
            continue;
        }
        let range = rest[i + 1..].trim_start().strip_prefix('!')?;
        return Some((sheet, range));
    }
    None
}

/// Split a list of range strings on commas outside quoted sheet names
pub fn split_range_list(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quoted = false;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            ',' if !quoted => {
                parts.push(text[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

fn needs_quotes(sheet: &str) -> bool {
    sheet
        .chars()
        .any(|c| matches!(c, ',' | '!' | '\'') || c.is_whitespace())
}

impl CellRange {
    /// Range covering a single cell
    pub fn single(cell_ref: &str) -> Self {
        parse_range_string(cell_ref, None)
    }

    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// The sheet this range reads from, given the currently selected sheet
    pub fn sheet_or<'a>(&'a self, selected: &'a str) -> &'a str {
        self.sheet.as_deref().unwrap_or(selected)
    }

    /// Derive bounding indices; fails if either endpoint is not a valid reference
    pub fn dimensions(&self) -> MapResult<RangeDimensions> {
        let start = parse_cell_ref(&self.start)?;
        let end = parse_cell_ref(&self.end)?;

        Ok(RangeDimensions {
            start_row: start.row,
            start_col: start.col,
            end_row: end.row,
            end_col: end.col,
            row_count: end.row as i64 - start.row as i64 + 1,
            col_count: end.col as i64 - start.col as i64 + 1,
        })
    }

    /// Like [`CellRange::dimensions`], but reports the whole range as invalid
    pub fn checked_dimensions(&self) -> MapResult<RangeDimensions> {
        self.dimensions()
            .map_err(|_| MapError::InvalidRange(self.to_string()))
    }

    /// Every cell covered by the range, row by row
    pub fn expand_indices(&self) -> MapResult<impl Iterator<Item = CellIndex> + use<>> {
        let dims = self.checked_dimensions()?;
        let cols = dims.start_col..=dims.end_col;
        Ok((dims.start_row..=dims.end_row)
            .flat_map(move |row| cols.clone().map(move |col| CellIndex::new(row, col))))
    }

    /// Every cell reference covered by the range, row by row ("A1", "B1", "A2", ...)
    pub fn expand(&self) -> MapResult<Vec<String>> {
        Ok(self.expand_indices()?.map(format_cell_ref).collect())
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sheet {
            Some(sheet) if needs_quotes(sheet) => write!(f, "'{}'!", sheet.replace('\'', "''"))?,
            Some(sheet) => write!(f, "{}!", sheet)?,
            None => {}
        }
        if self.is_single_cell() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}
