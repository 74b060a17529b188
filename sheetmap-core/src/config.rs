//! Dashboard configuration: which ranges feed which records
//!
//! Two surfaces are supported. The TOML file groups entities by class:
//!
//! ```toml
//! [[strike]]
//! name = "Танки"
//! ranges = ["B4:D4"]
//! icon = "tank"
//!
//! [summary]
//! total_flights = "B23+B30"
//! ```
//!
//! The flat surface maps dotted keys (`strike.<name>`, `recon.<name>`,
//! `summary.totalFlights`, ...) to strings and is read and written as a whole.

use crate::mapping::{
    MappingConfiguration, MappingEntry, RECON_VALUE_COLUMNS, STRIKE_VALUE_COLUMNS,
};
use crate::range::{CellRange, parse_qualified_range, split_range_list};
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

pub const STRIKE_PREFIX: &str = "strike.";
pub const RECON_PREFIX: &str = "recon.";

pub const KEY_TOTAL_FLIGHTS: &str = "summary.totalFlights";
pub const KEY_UNIQUE_TARGETS: &str = "summary.uniqueTargets";
pub const KEY_DATE_RANGE_START: &str = "summary.dateRangeStart";
pub const KEY_DATE_RANGE_END: &str = "summary.dateRangeEnd";
pub const KEY_MONTHLY_STATS_SHEET: &str = "summary.monthlyStatsSheet";
pub const KEY_MONTHLY_STATS_RANGE: &str = "summary.monthlyStatsRange";

/// `B23`, `B23:B25`, `B23:B25+D23` ...
static AGGREGATE_SPEC: LazyLock<Regex> = LazyLock::new(|| {
    let part = r"[A-Z]+[0-9]+(\s*:\s*[A-Z]+[0-9]+)?";
    Regex::new(&format!(r"^\s*{part}(\s*\+\s*{part})*\s*$"))
        .expect("valid aggregate spec pattern")
});

/// Complete dashboard configuration snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConfigFile", into = "ConfigFile")]
pub struct DashboardConfig {
    pub strike: MappingConfiguration,
    pub recon: MappingConfiguration,
    pub summary: SummaryCells,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            strike: MappingConfiguration::default_strike(),
            recon: MappingConfiguration::default_recon(),
            summary: SummaryCells::default(),
        }
    }
}

/// Cell specs for the summary block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryCells {
    /// Aggregate spec, summed
    pub total_flights: String,
    /// Aggregate spec, summed
    pub unique_targets: String,
    /// Single cell read as text
    pub date_range_start: String,
    /// Single cell read as text
    pub date_range_end: String,
    pub monthly_stats_sheet: String,
    /// Month names in the first column, counts in the second
    pub monthly_stats_range: String,
}

impl Default for SummaryCells {
    fn default() -> Self {
        Self {
            total_flights: "B23".to_string(),
            unique_targets: "B24".to_string(),
            date_range_start: "B26".to_string(),
            date_range_end: "B27".to_string(),
            monthly_stats_sheet: "Monthly".to_string(),
            monthly_stats_range: "A2:B13".to_string(),
        }
    }
}

impl SummaryCells {
    /// The monthly breakdown range; a `Sheet!` prefix overrides the sheet setting
    pub fn monthly_range(&self) -> CellRange {
        let sheet = Some(self.monthly_stats_sheet.as_str()).filter(|s| !s.is_empty());
        parse_qualified_range(&self.monthly_stats_range, sheet)
    }
}

impl DashboardConfig {
    /// Configuration with no entities and default summary cells
    pub fn empty() -> Self {
        Self {
            strike: MappingConfiguration::default(),
            recon: MappingConfiguration::default(),
            summary: SummaryCells::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: DashboardConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration as TOML
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }

    /// Get-all: every setting as a dotted key and its string value
    ///
    /// Entities come first in configuration order (strike, then recon),
    /// followed by the summary keys.
    pub fn to_flat(&self) -> Vec<(String, String)> {
        let mut flat = Vec::new();
        for entry in self.strike.entries() {
            flat.push((format!("{STRIKE_PREFIX}{}", entry.name), entry.ranges_string()));
        }
        for entry in self.recon.entries() {
            flat.push((format!("{RECON_PREFIX}{}", entry.name), entry.ranges_string()));
        }

        let s = &self.summary;
        for (key, value) in [
            (KEY_TOTAL_FLIGHTS, &s.total_flights),
            (KEY_UNIQUE_TARGETS, &s.unique_targets),
            (KEY_DATE_RANGE_START, &s.date_range_start),
            (KEY_DATE_RANGE_END, &s.date_range_end),
            (KEY_MONTHLY_STATS_SHEET, &s.monthly_stats_sheet),
            (KEY_MONTHLY_STATS_RANGE, &s.monthly_stats_range),
        ] {
            flat.push((key.to_string(), value.clone()));
        }
        flat
    }

    /// Set-all: apply dotted keys on top of this snapshot, returning a new one
    ///
    /// Entity values are one or more ranges separated by `,`. An entity key
    /// with an empty value removes that entity. Unknown keys are rejected and
    /// leave no partial update behind.
    pub fn with_flat<I, K, V>(&self, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut next = self.clone();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref().trim(), value.as_ref().trim());
            if let Some(name) = key.strip_prefix(STRIKE_PREFIX) {
                next.strike = apply_entity(&next.strike, name, value, STRIKE_VALUE_COLUMNS)
                    .with_context(|| format!("Invalid key '{}'", key))?;
            } else if let Some(name) = key.strip_prefix(RECON_PREFIX) {
                next.recon = apply_entity(&next.recon, name, value, RECON_VALUE_COLUMNS)
                    .with_context(|| format!("Invalid key '{}'", key))?;
            } else {
                let slot = match key {
                    KEY_TOTAL_FLIGHTS => &mut next.summary.total_flights,
                    KEY_UNIQUE_TARGETS => &mut next.summary.unique_targets,
                    KEY_DATE_RANGE_START => &mut next.summary.date_range_start,
                    KEY_DATE_RANGE_END => &mut next.summary.date_range_end,
                    KEY_MONTHLY_STATS_SHEET => &mut next.summary.monthly_stats_sheet,
                    KEY_MONTHLY_STATS_RANGE => &mut next.summary.monthly_stats_range,
                    _ => anyhow::bail!("Unknown configuration key '{}'", key),
                };
                *slot = value.to_string();
            }
        }
        Ok(next)
    }

    /// Build a configuration purely from dotted keys
    pub fn from_flat<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::empty().with_flat(pairs)
    }

    /// Check every configured range and cell spec for syntax errors
    pub fn validate(&self) -> Result<()> {
        for (class, mappings) in [("strike", &self.strike), ("recon", &self.recon)] {
            for entry in mappings.entries() {
                if entry.ranges.is_empty() {
                    anyhow::bail!(
                        "Configuration error: {} entry '{}' has no ranges",
                        class,
                        entry.name
                    );
                }
                if entry.value_columns == 0 {
                    anyhow::bail!(
                        "Configuration error: {} entry '{}' reads no value columns",
                        class,
                        entry.name
                    );
                }
                for range in &entry.ranges {
                    range.checked_dimensions().with_context(|| {
                        format!("Configuration error in {} entry '{}'", class, entry.name)
                    })?;
                }
            }
        }

        let s = &self.summary;
        for (key, spec) in [
            (KEY_TOTAL_FLIGHTS, &s.total_flights),
            (KEY_UNIQUE_TARGETS, &s.unique_targets),
            (KEY_DATE_RANGE_START, &s.date_range_start),
            (KEY_DATE_RANGE_END, &s.date_range_end),
        ] {
            if !spec.is_empty() && !AGGREGATE_SPEC.is_match(spec) {
                anyhow::bail!(
                    "Configuration error: '{}' is not a valid cell spec for {}",
                    spec,
                    key
                );
            }
        }

        if !s.monthly_stats_range.is_empty() {
            s.monthly_range()
                .checked_dimensions()
                .with_context(|| format!("Configuration error in {}", KEY_MONTHLY_STATS_RANGE))?;
        }

        Ok(())
    }
}

fn apply_entity(
    mappings: &MappingConfiguration,
    name: &str,
    value: &str,
    value_columns: usize,
) -> Result<MappingConfiguration> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("entity name is empty");
    }
    if value.is_empty() {
        return Ok(mappings.without_entry(name));
    }

    let ranges = split_range_list(value);
    Ok(mappings.with_entry(MappingEntry::new(name, ranges, value_columns, None)))
}

/// On-disk layout of [`DashboardConfig`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    strike: Option<Vec<EntryFile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recon: Option<Vec<EntryFile>>,
    #[serde(default)]
    summary: SummaryCells,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryFile {
    name: String,
    ranges: Vec<String>,
    /// Sheet for ranges without their own `Sheet!` prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sheet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
}

impl EntryFile {
    fn into_entry(self, value_columns: usize) -> MappingEntry {
        let sheet = self.sheet.as_deref();
        MappingEntry {
            ranges: self
                .ranges
                .iter()
                .map(|r| parse_qualified_range(r, sheet))
                .collect(),
            name: self.name,
            value_columns,
            icon: self.icon,
        }
    }

    fn from_entry(entry: &MappingEntry) -> Self {
        Self {
            name: entry.name.clone(),
            ranges: entry.ranges.iter().map(ToString::to_string).collect(),
            sheet: None,
            icon: entry.icon.clone(),
        }
    }
}

impl From<ConfigFile> for DashboardConfig {
    fn from(file: ConfigFile) -> Self {
        Self {
            strike: file_section(file.strike, STRIKE_VALUE_COLUMNS)
                .unwrap_or_else(MappingConfiguration::default_strike),
            recon: file_section(file.recon, RECON_VALUE_COLUMNS)
                .unwrap_or_else(MappingConfiguration::default_recon),
            summary: file.summary,
        }
    }
}

/// `None` when the section is absent from the file
fn file_section(
    entries: Option<Vec<EntryFile>>,
    value_columns: usize,
) -> Option<MappingConfiguration> {
    entries.map(|entries| {
        MappingConfiguration::new(entries.into_iter().map(|e| e.into_entry(value_columns)))
    })
}

impl From<DashboardConfig> for ConfigFile {
    fn from(config: DashboardConfig) -> Self {
        Self {
            strike: Some(config.strike.entries().iter().map(EntryFile::from_entry).collect()),
            recon: Some(config.recon.entries().iter().map(EntryFile::from_entry).collect()),
            summary: config.summary,
        }
    }
}
