//! Output formatters for dashboards

use anyhow::Result;
use colored::*;
use sheetmap_core::{Dashboard, DashboardConfig};
use std::path::Path;

const TOP_MONTHS: usize = 3;

/// Print the dashboard as colored tables
pub fn print_human(file_path: &Path, dashboard: &Dashboard) {
    println!(
        "{}",
        format!("Report: {} [{}]", file_path.display(), dashboard.sheet).bold()
    );
    println!();

    if dashboard.strike_systems.is_empty() && dashboard.recon_systems.is_empty() {
        println!("{}", "No systems found in the configured ranges".yellow().bold());
    }

    if !dashboard.strike_systems.is_empty() {
        println!("{}", "Strike systems:".bold().underline());
        for system in &dashboard.strike_systems {
            println!(
                "  {:<28} {} {:>6}  {} {:>6}",
                label(&system.name, system.icon.as_deref()),
                "hit".bright_black(),
                count(system.hit_count).red().bold(),
                "destroyed".bright_black(),
                count(system.destroyed_count).green().bold()
            );
        }
        let hits: f64 = dashboard.strike_systems.iter().map(|s| s.hit_count).sum();
        let destroyed: f64 = dashboard
            .strike_systems
            .iter()
            .map(|s| s.destroyed_count)
            .sum();
        println!(
            "  {:<28} {} {:>6}  {} {:>6}",
            "Total".bold(),
            "hit".bright_black(),
            count(hits).bold(),
            "destroyed".bright_black(),
            count(destroyed).bold()
        );
        println!();
    }

    if !dashboard.recon_systems.is_empty() {
        println!("{}", "Recon systems:".bold().underline());
        for system in &dashboard.recon_systems {
            println!(
                "  {:<28} {} {:>6}",
                label(&system.name, system.icon.as_deref()),
                "detected".bright_black(),
                count(system.detected_count).cyan().bold()
            );
        }
        println!();
    }

    let summary = &dashboard.summary;
    println!("{}", "Summary:".bold().underline());
    println!("  {} {}", "Flights:".bold(), count(summary.total_flights));
    println!("  {} {}", "Unique targets:".bold(), count(summary.unique_targets));
    if !summary.date_range.start.is_empty() || !summary.date_range.end.is_empty() {
        println!(
            "  {} {} - {}",
            "Period:".bold(),
            summary.date_range.start.yellow(),
            summary.date_range.end.yellow()
        );
    }

    if !summary.monthly_stats.is_empty() {
        println!();
        println!("{}", "By month:".bold().underline());
        for stat in &summary.monthly_stats {
            println!("  {:<16} {:>6}", stat.month, count(stat.count));
        }
        let top: Vec<_> = summary
            .top_months(TOP_MONTHS)
            .iter()
            .map(|m| m.month.as_str())
            .collect();
        println!("  {} {}", "Top:".bold(), top.join(", ").cyan());
    }
}

fn label(name: &str, icon: Option<&str>) -> String {
    match icon {
        Some(icon) => format!("{name} ({icon})"),
        None => name.to_string(),
    }
}

/// Whole counts print without a fractional part
fn count(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// Print the dashboard in JSON format
pub fn print_json(file_path: &Path, dashboard: &Dashboard) -> Result<()> {
    let output = serde_json::json!({
        "file": file_path.display().to_string(),
        "dashboard": dashboard,
        "totals": {
            "strikeSystems": dashboard.strike_systems.len(),
            "reconSystems": dashboard.recon_systems.len(),
            "months": dashboard.summary.monthly_stats.len(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print the effective configuration as `key = value` lines or an ordered JSON array
pub fn print_config(config: &DashboardConfig, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&config_json(config))?);
    } else {
        for (key, value) in config.to_flat() {
            println!("{} = {}", key.cyan(), value);
        }
    }
    Ok(())
}

/// Flat configuration as an array of `{key, value}` objects, in snapshot order
fn config_json(config: &DashboardConfig) -> serde_json::Value {
    config
        .to_flat()
        .into_iter()
        .map(|(key, value)| serde_json::json!({ "key": key, "value": value }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json_keeps_snapshot_order() {
        let config = DashboardConfig::default();
        let json = config_json(&config);
        let keys: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| pair["key"].as_str().unwrap().to_string())
            .collect();
        let expected: Vec<_> = config.to_flat().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, expected);
        assert_eq!(keys[0], "strike.Танки");
        assert_eq!(keys.last().map(String::as_str), Some("summary.monthlyStatsRange"));
        assert_eq!(json[0]["value"], "B4:D4");
    }

    #[test]
    fn test_count_formatting() {
        assert_eq!(count(12.0), "12");
        assert_eq!(count(0.0), "0");
        assert_eq!(count(2.5), "2.50");
    }

    #[test]
    fn test_label() {
        assert_eq!(label("Танки", Some("tank")), "Танки (tank)");
        assert_eq!(label("Склади", None), "Склади");
    }
}
