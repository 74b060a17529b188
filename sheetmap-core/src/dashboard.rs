//! Typed dashboard records assembled from a workbook and a configuration

use crate::aggregate::{resolve_sum, resolve_text};
use crate::config::DashboardConfig;
use crate::extract::extract_from_workbook;
use crate::mapping::MappingConfiguration;
use crate::reader::Workbook;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrikeSystem {
    pub name: String,
    pub icon: Option<String>,
    pub hit_count: f64,
    pub destroyed_count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconSystem {
    pub name: String,
    pub icon: Option<String>,
    pub detected_count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStat {
    pub month: String,
    pub count: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatistics {
    pub total_flights: f64,
    pub unique_targets: f64,
    /// In sheet row order
    pub monthly_stats: Vec<MonthlyStat>,
    pub date_range: DateRange,
}

impl SummaryStatistics {
    /// The `n` months with the highest counts, highest first
    pub fn top_months(&self, n: usize) -> Vec<&MonthlyStat> {
        let mut months: Vec<_> = self.monthly_stats.iter().collect();
        months.sort_by(|a, b| b.count.partial_cmp(&a.count).unwrap_or(Ordering::Equal));
        months.truncate(n);
        months
    }
}

/// Everything the dashboard shows for one workbook
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub sheet: String,
    pub strike_systems: Vec<StrikeSystem>,
    pub recon_systems: Vec<ReconSystem>,
    pub summary: SummaryStatistics,
}

impl Dashboard {
    /// Build the dashboard for `selected_sheet` using one configuration snapshot
    ///
    /// Ranges without a sheet read from `selected_sheet`. If that sheet does
    /// not exist every block comes back empty.
    pub fn build(workbook: &Workbook, config: &DashboardConfig, selected_sheet: &str) -> Self {
        if workbook.get_sheet(selected_sheet).is_none() {
            log::warn!("Selected sheet '{}' not found in workbook", selected_sheet);
            return Self {
                sheet: selected_sheet.to_string(),
                ..Self::default()
            };
        }

        Self {
            sheet: selected_sheet.to_string(),
            strike_systems: strike_systems(workbook, &config.strike, selected_sheet),
            recon_systems: recon_systems(workbook, &config.recon, selected_sheet),
            summary: summary_statistics(workbook, config, selected_sheet),
        }
    }
}

/// One strike system per extracted row, icon taken from its entry
pub fn strike_systems(
    workbook: &Workbook,
    mappings: &MappingConfiguration,
    selected_sheet: &str,
) -> Vec<StrikeSystem> {
    mappings
        .extract_all_from_workbook(workbook, selected_sheet)
        .entries
        .into_iter()
        .flat_map(|entry| {
            let icon = entry.icon;
            entry.records.into_iter().map(move |record| StrikeSystem {
                hit_count: record.value(0),
                destroyed_count: record.value(1),
                name: record.name,
                icon: icon.clone(),
            })
        })
        .collect()
}

/// One recon system per extracted row, icon taken from its entry
pub fn recon_systems(
    workbook: &Workbook,
    mappings: &MappingConfiguration,
    selected_sheet: &str,
) -> Vec<ReconSystem> {
    mappings
        .extract_all_from_workbook(workbook, selected_sheet)
        .entries
        .into_iter()
        .flat_map(|entry| {
            let icon = entry.icon;
            entry.records.into_iter().map(move |record| ReconSystem {
                detected_count: record.value(0),
                name: record.name,
                icon: icon.clone(),
            })
        })
        .collect()
}

/// Totals and date range from the selected sheet, months from the monthly sheet
pub fn summary_statistics(
    workbook: &Workbook,
    config: &DashboardConfig,
    selected_sheet: &str,
) -> SummaryStatistics {
    let cells = &config.summary;
    let Ok(grid) = workbook.grid(selected_sheet) else {
        log::warn!("Selected sheet '{}' not found in workbook", selected_sheet);
        return SummaryStatistics::default();
    };

    let monthly_stats = if cells.monthly_stats_range.is_empty() {
        Vec::new()
    } else {
        extract_from_workbook(workbook, &cells.monthly_range(), selected_sheet, 1)
            .into_iter()
            .map(|record| MonthlyStat {
                count: record.value(0),
                month: record.name,
            })
            .collect()
    };

    SummaryStatistics {
        total_flights: resolve_sum(grid, &cells.total_flights),
        unique_targets: resolve_sum(grid, &cells.unique_targets),
        monthly_stats,
        date_range: DateRange {
            start: resolve_text(grid, &cells.date_range_start),
            end: resolve_text(grid, &cells.date_range_end),
        },
    }
}
