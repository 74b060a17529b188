//! sheetmap-core: range-scoped name/value extraction for spreadsheet dashboards
//!
//! Named entities are mapped to cell ranges. Each range row yields a name and
//! a fixed number of numeric values read strictly inside the range, which the
//! [`dashboard`] module turns into typed strike, recon and summary records.

pub mod aggregate;
pub mod cell_ref;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod mapping;
pub mod range;
pub mod reader;

use anyhow::{Context, Result};
use std::path::Path;

pub use aggregate::{Scalar, ScalarKind, resolve_scalar, resolve_sum, resolve_text};
pub use cell_ref::{CellIndex, format_cell_ref, format_column_index, parse_cell_ref};
pub use config::{DashboardConfig, SummaryCells};
pub use dashboard::{
    Dashboard, DateRange, MonthlyStat, ReconSystem, StrikeSystem, SummaryStatistics,
};
pub use error::{MapError, MapResult};
pub use extract::{ExtractedRecord, extract, extract_from_workbook, try_extract};
pub use mapping::{ExtractedEntries, MappingConfiguration, MappingEntry};
pub use range::{
    CellRange, RangeDimensions, parse_qualified_range, parse_range_string, split_range_list,
};
pub use reader::{CellValue, Grid, Sheet, Workbook, read_workbook};

/// Reads workbooks and assembles dashboards from one configuration snapshot
pub struct Mapper {
    config: DashboardConfig,
}

impl Mapper {
    /// Mapper with the built-in entity layout
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default())
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Read `path` and build the dashboard for `sheet`, or the first sheet
    ///
    /// Naming a sheet the workbook does not have is an error here, unlike the
    /// lower-level extraction calls which yield nothing.
    pub fn map_file<P: AsRef<Path>>(&self, path: P, sheet: Option<&str>) -> Result<Dashboard> {
        let workbook = read_workbook(path)?;
        self.map_workbook(&workbook, sheet)
    }

    pub fn map_workbook(&self, workbook: &Workbook, sheet: Option<&str>) -> Result<Dashboard> {
        let selected = match sheet {
            Some(name) => workbook
                .get_sheet(name)
                .map(|s| s.name.as_str())
                .ok_or_else(|| MapError::MissingSheet(name.to_string()))
                .with_context(|| {
                    format!("Available sheets: {}", workbook.sheet_names().join(", "))
                })?,
            None => workbook
                .default_sheet()
                .context("Workbook has no sheets")?,
        };

        Ok(Dashboard::build(workbook, &self.config, selected))
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}
