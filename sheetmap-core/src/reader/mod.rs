//! Excel/ODS file reader using calamine

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::path::Path;

pub mod workbook;

pub use workbook::{CellValue, Grid, Sheet, Workbook};

/// Read a workbook from a file path
///
/// Every sheet is decoded into a [`Grid`] whose indices match the sheet's
/// absolute cell positions ("A1" is always `rows[0][0]`).
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    let mut excel: Sheets<_> = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_names = excel.sheet_names();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for sheet_name in &sheet_names {
        let grid = match excel.worksheet_range(sheet_name) {
            Ok(range) => grid_from_range(&range),
            Err(e) => {
                log::warn!("Could not read sheet '{}': {}", sheet_name, e);
                Grid::default()
            }
        };
        sheets.push(Sheet::new(sheet_name.as_str(), grid));
    }

    log::info!(
        "Loaded {} sheet(s) from {}",
        sheets.len(),
        path.display()
    );

    Ok(Workbook {
        path: path.to_path_buf(),
        sheets,
    })
}

/// Convert a calamine range into an absolute-positioned grid
pub fn grid_from_range(range: &Range<Data>) -> Grid {
    let Some((start_row, start_col)) = range.start() else {
        return Grid::default();
    };

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
    for data_row in range.rows() {
        let mut row = vec![CellValue::Empty; start_col as usize];
        row.extend(data_row.iter().map(parse_cell_value));
        while row.last().is_some_and(CellValue::is_empty) {
            row.pop();
        }
        rows.push(row);
    }

    Grid::new(rows)
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
