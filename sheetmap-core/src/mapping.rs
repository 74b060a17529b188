//! Mapping configuration: named entities bound to one or more ranges
//!
//! A [`MappingConfiguration`] is an immutable snapshot. Updates return a new
//! configuration and leave the one they were called on untouched.

use crate::extract::{ExtractedRecord, extract, extract_from_workbook};
use crate::range::{CellRange, parse_qualified_range};
use crate::reader::{Grid, Workbook};
use serde::Serialize;

/// Value columns read for a strike system (hit, destroyed)
pub const STRIKE_VALUE_COLUMNS: usize = 2;
/// Value columns read for a recon system (detected)
pub const RECON_VALUE_COLUMNS: usize = 1;

/// One named entity and where to read it from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub name: String,
    /// Read in order; the first range's leftmost column is the name column
    pub ranges: Vec<CellRange>,
    pub value_columns: usize,
    pub icon: Option<String>,
}

impl MappingEntry {
    /// Build an entry from range strings like "B4:D4" or "Monthly!A2:B13"
    pub fn new<I, S>(
        name: impl Into<String>,
        ranges: I,
        value_columns: usize,
        icon: Option<&str>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            ranges: ranges
                .into_iter()
                .map(|r| parse_qualified_range(r.as_ref(), None))
                .collect(),
            value_columns,
            icon: icon.map(str::to_string),
        }
    }

    /// Entry with hit/destroyed value columns
    pub fn strike(name: impl Into<String>, range: &str, icon: Option<&str>) -> Self {
        Self::new(name, [range], STRIKE_VALUE_COLUMNS, icon)
    }

    /// Entry with a single detected-count value column
    pub fn recon(name: impl Into<String>, range: &str, icon: Option<&str>) -> Self {
        Self::new(name, [range], RECON_VALUE_COLUMNS, icon)
    }

    /// Extract from every range of this entry against one grid, in range order
    pub fn extract(&self, grid: &Grid) -> Vec<ExtractedRecord> {
        self.ranges
            .iter()
            .flat_map(|range| extract(grid, range, self.value_columns))
            .collect()
    }

    /// Extract from every range, honouring per-range sheet names
    pub fn extract_from_workbook(
        &self,
        workbook: &Workbook,
        selected_sheet: &str,
    ) -> Vec<ExtractedRecord> {
        self.ranges
            .iter()
            .flat_map(|range| {
                extract_from_workbook(workbook, range, selected_sheet, self.value_columns)
            })
            .collect()
    }

    /// Ranges joined the way they are written in flat configuration values
    pub fn ranges_string(&self) -> String {
        self.ranges
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Records extracted for one entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryExtraction {
    pub name: String,
    pub icon: Option<String>,
    pub records: Vec<ExtractedRecord>,
}

/// Ordered mapping from entry name to its records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExtractedEntries {
    pub entries: Vec<EntryExtraction>,
}

impl ExtractedEntries {
    /// Records for an entry name
    pub fn get(&self, name: &str) -> Option<&[ExtractedRecord]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.records.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntryExtraction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ordered, name-unique collection of [`MappingEntry`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingConfiguration {
    entries: Vec<MappingEntry>,
}

impl MappingConfiguration {
    /// Build a configuration; a repeated name replaces the earlier entry in place
    pub fn new(entries: impl IntoIterator<Item = MappingEntry>) -> Self {
        entries
            .into_iter()
            .fold(Self::default(), |config, entry| config.with_entry(entry))
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&MappingEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Replace the entry with the same name, or append a new one
    ///
    /// A replaced entry keeps its position, and keeps its icon when the new
    /// entry has none.
    pub fn with_entry(&self, mut entry: MappingEntry) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => {
                if entry.icon.is_none() {
                    entry.icon = existing.icon.take();
                }
                *existing = entry;
            }
            None => entries.push(entry),
        }
        Self { entries }
    }

    /// Drop the entry with the given name, if any
    pub fn without_entry(&self, name: &str) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|e| e.name != name)
                .cloned()
                .collect(),
        }
    }

    /// Run every entry against a single grid
    pub fn extract_all(&self, grid: &Grid) -> ExtractedEntries {
        self.collect(|entry| entry.extract(grid))
    }

    /// Run every entry against a workbook, resolving each range's sheet
    pub fn extract_all_from_workbook(
        &self,
        workbook: &Workbook,
        selected_sheet: &str,
    ) -> ExtractedEntries {
        self.collect(|entry| entry.extract_from_workbook(workbook, selected_sheet))
    }

    fn collect<F>(&self, mut extract_entry: F) -> ExtractedEntries
    where
        F: FnMut(&MappingEntry) -> Vec<ExtractedRecord>,
    {
        ExtractedEntries {
            entries: self
                .entries
                .iter()
                .map(|entry| EntryExtraction {
                    name: entry.name.clone(),
                    icon: entry.icon.clone(),
                    records: extract_entry(entry),
                })
                .collect(),
        }
    }

    /// Built-in strike system layout: one row per system in B4:D11
    pub fn default_strike() -> Self {
        Self::new([
            MappingEntry::strike("Танки", "B4:D4", Some("tank")),
            MappingEntry::strike("ББМ", "B5:D5", Some("truck-military")),
            MappingEntry::strike("РСЗВ", "B6:D6", Some("rocket")),
            MappingEntry::strike("Артилерійські системи", "B7:D7", Some("artillery")),
            MappingEntry::strike("Засоби ППО", "B8:D8", Some("shield")),
            MappingEntry::strike("Автомобільна техніка", "B9:D9", Some("truck")),
            MappingEntry::strike("БпЛА", "B10:D10", Some("drone")),
            MappingEntry::strike("Склади", "B11:D11", None),
        ])
    }

    /// Built-in recon system layout: one row per system in B18:C20
    pub fn default_recon() -> Self {
        Self::new([
            MappingEntry::recon("РЛС", "B18:C18", Some("radar")),
            MappingEntry::recon("Засоби РЕБ", "B19:C19", Some("radio")),
            MappingEntry::recon("Пускові установки", "B20:C20", Some("rocket-launch")),
        ])
    }
}
