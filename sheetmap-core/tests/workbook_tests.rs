mod common;

use common::{create_xlsx, num, scenario_rows, text};
use sheetmap_core::{CellValue, DashboardConfig, Mapper, read_workbook};

fn monthly_rows() -> Vec<Vec<CellValue>> {
    vec![
        vec![text("Місяць"), text("Знищено")],
        vec![text("Липень"), num(14.0)],
        vec![text("Серпень"), num(21.0), num(999.0)],
    ]
}

fn report_config() -> DashboardConfig {
    DashboardConfig::from_flat([
        ("strike.Танки", "B3:D3"),
        ("strike.ОС РОВ", "B2:D2"),
        ("recon.РЛС", "B4:C4"),
        ("summary.totalFlights", "C2+C3"),
        ("summary.uniqueTargets", "D3"),
        ("summary.dateRangeStart", "B2"),
        ("summary.dateRangeEnd", "B4"),
        ("summary.monthlyStatsSheet", "Monthly"),
        ("summary.monthlyStatsRange", "A2:B3"),
    ])
    .unwrap()
}

#[test]
fn test_read_workbook_keeps_absolute_positions() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.xlsx");
    create_xlsx(&path, &[("Main", scenario_rows()), ("Monthly", monthly_rows())])?;

    let workbook = read_workbook(&path)?;
    assert_eq!(workbook.sheet_names(), vec!["Main", "Monthly"]);
    assert_eq!(workbook.default_sheet(), Some("Main"));

    let grid = workbook.grid("Main")?;
    // B2 is the first populated cell; it must still be addressed as B2
    assert_eq!(grid.text_at(1, 1), "ОС РОВ");
    assert_eq!(grid.number_at(1, 2), 7.0);
    assert_eq!(grid.number_at(2, 3), 3.0);
    assert!(grid.get(0, 0).is_none_or(CellValue::is_empty));

    Ok(())
}

#[test]
fn test_map_file_builds_dashboard() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.xlsx");
    create_xlsx(&path, &[("Main", scenario_rows()), ("Monthly", monthly_rows())])?;

    let dashboard = Mapper::with_config(report_config()).map_file(&path, None)?;
    assert_eq!(dashboard.sheet, "Main");

    let strikes: Vec<_> = dashboard
        .strike_systems
        .iter()
        .map(|s| (s.name.as_str(), s.hit_count, s.destroyed_count))
        .collect();
    assert_eq!(strikes, vec![("Танки", 5.0, 3.0), ("ОС РОВ", 7.0, 0.0)]);

    assert_eq!(dashboard.recon_systems.len(), 1);
    assert_eq!(dashboard.recon_systems[0].detected_count, 8.0);

    let summary = &dashboard.summary;
    assert_eq!(summary.total_flights, 12.0);
    assert_eq!(summary.unique_targets, 3.0);
    assert_eq!(summary.date_range.start, "ОС РОВ");
    assert_eq!(summary.date_range.end, "РЛС");

    let months: Vec<_> = summary
        .monthly_stats
        .iter()
        .map(|m| (m.month.as_str(), m.count))
        .collect();
    assert_eq!(months, vec![("Липень", 14.0), ("Серпень", 21.0)]);

    Ok(())
}

#[test]
fn test_missing_monthly_sheet_yields_empty_breakdown() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("no-monthly.xlsx");
    create_xlsx(&path, &[("Main", scenario_rows())])?;

    let dashboard = Mapper::with_config(report_config()).map_file(&path, Some("Main"))?;
    assert!(dashboard.summary.monthly_stats.is_empty());
    assert_eq!(dashboard.strike_systems.len(), 2);

    Ok(())
}

#[test]
fn test_unknown_selected_sheet_is_an_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.xlsx");
    create_xlsx(&path, &[("Main", scenario_rows())])?;

    let err = Mapper::new().map_file(&path, Some("Archive")).unwrap_err();
    assert!(format!("{err:#}").contains("Archive"));

    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let err = read_workbook("does-not-exist.xlsx").unwrap_err();
    assert!(err.to_string().contains("Failed to open workbook"));
}
