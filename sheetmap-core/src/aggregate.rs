//! Aggregate cell specs: "B23", "B23:B25" or "B23:B25+D23:D25"
//!
//! Numeric specs sum every referenced cell. Text specs read one literal cell.

use crate::range::parse_range_string;
use crate::reader::Grid;
use serde::Serialize;

/// Which reading a caller wants from a spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Number,
    Text,
}

/// A resolved scalar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

/// Sum every cell referenced by `spec`
///
/// Each `+`-separated part is a cell or a range. Parts that do not parse
/// contribute 0.
pub fn resolve_sum(grid: &Grid, spec: &str) -> f64 {
    spec.split('+')
        .map(str::trim)
        .map(|part| match parse_range_string(part, None).expand_indices() {
            Ok(cells) => cells.map(|cell| grid.number_at(cell.row, cell.col)).sum::<f64>(),
            Err(e) => {
                log::debug!("Ignoring part '{}' of '{}': {}", part, spec, e);
                0.0
            }
        })
        .sum()
}

/// Literal text of the cell named by `spec`
///
/// A range spec reads its start cell. Invalid specs and absent cells give "".
pub fn resolve_text(grid: &Grid, spec: &str) -> String {
    let first = spec.split('+').next().unwrap_or_default();
    match parse_range_string(first, None).expand_indices() {
        Ok(mut cells) => cells
            .next()
            .map(|cell| grid.text_at(cell.row, cell.col))
            .unwrap_or_default(),
        Err(e) => {
            log::debug!("Cannot read text from '{}': {}", spec, e);
            String::new()
        }
    }
}

/// Resolve `spec` as either a sum or a literal
pub fn resolve_scalar(grid: &Grid, spec: &str, kind: ScalarKind) -> Scalar {
    match kind {
        ScalarKind::Number => Scalar::Number(resolve_sum(grid, spec)),
        ScalarKind::Text => Scalar::Text(resolve_text(grid, spec)),
    }
}
