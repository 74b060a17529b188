use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use sheetmap_core::{DashboardConfig, Mapper};
use std::path::{Path, PathBuf};

mod formatter;

const DEFAULT_CONFIG_FILE: &str = "sheetdash.toml";

#[derive(Parser)]
#[command(name = "sheetdash")]
#[command(about = "Strike and recon counts mapped out of Excel/ODS reports", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Excel/ODS report
    #[arg(value_name = "FILE", required_unless_present = "dump_config")]
    file: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Sheet to read unqualified ranges from (defaults to the first sheet)
    #[arg(short, long, value_name = "NAME")]
    sheet: Option<String>,

    /// Override a configuration key, e.g. --set "strike.Танки=B4:D4"
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Print the effective configuration as flat keys and exit
    #[arg(long)]
    dump_config: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for other tools
    Json,
}

fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{arg}'"))
}

fn load_config(path: Option<&Path>) -> Result<DashboardConfig> {
    if let Some(config_path) = path {
        return DashboardConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()));
    }

    let default_config_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_config_path.exists() {
        DashboardConfig::from_file(default_config_path).with_context(|| {
            format!(
                "Failed to load config from {}",
                default_config_path.display()
            )
        })
    } else {
        Ok(DashboardConfig::default())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).init();

    let config = load_config(cli.config.as_deref())?
        .with_flat(cli.overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .context("Invalid --set override")?;
    config.validate().context("Invalid configuration")?;

    if cli.dump_config {
        formatter::print_config(&config, matches!(cli.format, OutputFormat::Json))?;
        return Ok(());
    }

    let file = cli.file.context("No workbook given")?;
    let mapper = Mapper::with_config(config);
    let dashboard = mapper
        .map_file(&file, cli.sheet.as_deref())
        .with_context(|| format!("Failed to read dashboard from {}", file.display()))?;

    match cli.format {
        OutputFormat::Human => formatter::print_human(&file, &dashboard),
        OutputFormat::Json => formatter::print_json(&file, &dashboard)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("strike.Танки = B4:D4, B30:D30").unwrap(),
            ("strike.Танки".to_string(), "B4:D4, B30:D30".to_string())
        );
        assert_eq!(
            parse_key_value("recon.РЛС=").unwrap(),
            ("recon.РЛС".to_string(), String::new())
        );
        assert!(parse_key_value("summary.totalFlights").is_err());
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from([
            "sheetdash",
            "report.xlsx",
            "--sheet",
            "Main",
            "--set",
            "summary.totalFlights=B23+B30",
            "--set",
            "recon.РЛС=B18:C18",
            "-vv",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.file, Some(PathBuf::from("report.xlsx")));
        assert_eq!(cli.sheet.as_deref(), Some("Main"));
        assert_eq!(cli.overrides.len(), 2);
        assert_eq!(cli.overrides[0].1, "B23+B30");
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(!cli.dump_config);
    }

    #[test]
    fn test_dump_config_needs_no_workbook() {
        let cli = Cli::try_parse_from(["sheetdash", "--dump-config"]).unwrap();
        assert!(cli.dump_config);
        assert_eq!(cli.file, None);

        assert!(Cli::try_parse_from(["sheetdash"]).is_err());
        assert!(Cli::try_parse_from(["sheetdash", "--sheet", "Main"]).is_err());
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        assert!(load_config(Some(Path::new("does-not-exist.toml"))).is_err());
    }
}
