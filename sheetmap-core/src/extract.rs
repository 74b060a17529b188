//! Name/value extraction over a single range
//!
//! Each row of the range yields at most one record: the leftmost cell is the
//! name, the next `value_columns` cells are its values. Reads never leave the
//! `[start_col, end_col]` span of the queried range, so two unrelated tables
//! placed side by side on the same rows cannot bleed into each other.

use crate::error::{MapError, MapResult};
use crate::range::CellRange;
use crate::reader::{Grid, Workbook};
use serde::{Deserialize, Serialize};

/// One named row pulled out of a range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub name: String,
    /// Always exactly as long as the requested value-column count
    pub values: Vec<f64>,
}

impl ExtractedRecord {
    /// Value at `index`, 0 when out of bounds
    pub fn value(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }
}

/// Extract records, reporting an unparsable range as [`MapError::InvalidRange`]
pub fn try_extract(
    grid: &Grid,
    range: &CellRange,
    value_columns: usize,
) -> MapResult<Vec<ExtractedRecord>> {
    let dims = range.checked_dimensions()?;
    let mut records = Vec::new();
    if grid.row_count() == 0 {
        return Ok(records);
    }

    // rows past the grid are absent
    let last_row = dims.end_row.min(u32::try_from(grid.row_count() - 1).unwrap_or(u32::MAX));
    for row in dims.start_row..=last_row {
        let Some(name) = grid.get(row, dims.start_col) else {
            continue;
        };
        let name = name.to_string();
        if name.is_empty() {
            continue;
        }

        let values = (0..value_columns)
            .map(|i| {
                let col = dims.start_col as u64 + 1 + i as u64;
                if col <= dims.end_col as u64 {
                    grid.number_at(row, col as u32)
                } else {
                    0.0
                }
            })
            .collect();

        records.push(ExtractedRecord { name, values });
    }

    Ok(records)
}

/// Extract records from `range`; an invalid range yields nothing
pub fn extract(grid: &Grid, range: &CellRange, value_columns: usize) -> Vec<ExtractedRecord> {
    try_extract(grid, range, value_columns).unwrap_or_else(|e| {
        log::debug!("Skipping extraction: {}", e);
        Vec::new()
    })
}

/// Extract from the sheet the range points at, or from `selected_sheet`
///
/// A sheet that does not exist contributes no records.
pub fn extract_from_workbook(
    workbook: &Workbook,
    range: &CellRange,
    selected_sheet: &str,
    value_columns: usize,
) -> Vec<ExtractedRecord> {
    match workbook.grid(range.sheet_or(selected_sheet)) {
        Ok(grid) => extract(grid, range, value_columns),
        Err(e @ MapError::MissingSheet(_)) => {
            log::warn!("Range {} skipped: {}", range, e);
            Vec::new()
        }
        Err(e) => {
            log::debug!("Range {} skipped: {}", range, e);
            Vec::new()
        }
    }
}
