//! Workbook data structures

use crate::error::{MapError, MapResult};
use std::fmt;
use std::path::PathBuf;

/// Represents a complete decoded workbook
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub path: PathBuf,
    /// Sheets in file order
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Get the grid of a sheet, or [`MapError::MissingSheet`]
    pub fn grid(&self, name: &str) -> MapResult<&Grid> {
        self.get_sheet(name)
            .map(|s| &s.grid)
            .ok_or_else(|| MapError::MissingSheet(name.to_string()))
    }

    /// Get all sheet names
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// The sheet selected when nothing else is requested (the first one)
    pub fn default_sheet(&self) -> Option<&str> {
        self.sheets.first().map(|s| s.name.as_str())
    }
}

/// Represents a worksheet
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub grid: Grid,
}

impl Sheet {
    pub fn new(name: impl Into<String>, grid: Grid) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }
}

/// Row-major, 0-based cell values of one sheet
///
/// Rows may have different lengths; anything past the end of a row is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Get the cell at the given position, `None` if outside the stored data
    pub fn get(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.rows.get(row as usize)?.get(col as usize)
    }

    /// Numeric value of a cell; absent cells count as 0
    pub fn number_at(&self, row: u32, col: u32) -> f64 {
        self.get(row, col).map_or(0.0, CellValue::to_number)
    }

    /// Text of a cell; absent cells give an empty string
    pub fn text_at(&self, row: u32, col: u32) -> String {
        self.get(row, col).map(|v| v.to_string()).unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.iter().all(CellValue::is_empty))
    }
}

impl<R, C> FromIterator<R> for Grid
where
    R: IntoIterator<Item = C>,
    C: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            rows: iter
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}

/// Cell value types
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric coercion used for every value column and sum
    ///
    /// Text is parsed after trimming; anything that is not a finite number
    /// (including blank text) becomes 0. Never NaN.
    pub fn to_number(&self) -> f64 {
        let n = match self {
            CellValue::Empty => 0.0,
            CellValue::Number(n) => *n,
            CellValue::Boolean(b) => f64::from(u8::from(*b)),
            CellValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        };
        if n.is_finite() { n } else { 0.0 }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}
