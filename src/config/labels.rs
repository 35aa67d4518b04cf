//! Hand-placed inline label positions
//!
//! Each country or region label sits at a literal anchor year with a vertical
//! offset in children-per-woman units. The table is data, not logic: it can be
//! loaded from a JSON file next to the dataset, and the built-in default holds
//! the curated placements for the highlighted countries and the regions.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::util::safe_read_file;
use crate::error::{FertilityError, Result};
use crate::models::normalize_label;

/// File name looked up beside the dataset when no label file is given
pub const DEFAULT_LABEL_FILE: &str = "label_positions.json";

/// Where a single label goes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    /// Year whose data point anchors the label
    pub year: i32,
    /// Vertical offset added to the data value
    #[serde(default)]
    pub offset: f64,
}

impl LabelPlacement {
    /// Create a placement
    #[must_use]
    pub const fn new(year: i32, offset: f64) -> Self {
        Self { year, offset }
    }
}

/// Label placements for countries and regions, keyed by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTable {
    /// Country label placements
    #[serde(default)]
    pub countries: BTreeMap<String, LabelPlacement>,
    /// Region label placements
    #[serde(default)]
    pub regions: BTreeMap<String, LabelPlacement>,
}

impl Default for LabelTable {
    fn default() -> Self {
        let countries = [
            ("Mexico", LabelPlacement::new(1988, 0.08)),
            ("Israel", LabelPlacement::new(2018, -0.08)),
            ("United States", LabelPlacement::new(1996, 0.10)),
            ("France", LabelPlacement::new(1974, 0.06)),
            ("Norway", LabelPlacement::new(1982, -0.06)),
            ("Hungary", LabelPlacement::new(2000, -0.10)),
            ("Canada", LabelPlacement::new(2018, -0.06)),
        ];
        let regions = [
            ("Sub-Saharan Africa", LabelPlacement::new(2012, 0.10)),
            ("South Asia", LabelPlacement::new(1984, 0.06)),
            (
                "Middle East, North Africa, Afghanistan & Pakistan",
                LabelPlacement::new(1990, 0.06),
            ),
            ("Latin America & Caribbean", LabelPlacement::new(1976, -0.5)),
            ("East Asia & Pacific", LabelPlacement::new(1962, -1.0)),
            ("Europe & Central Asia", LabelPlacement::new(1970, 0.06)),
            ("North America", LabelPlacement::new(1961, -0.06)),
        ];

        Self {
            countries: countries
                .into_iter()
                .map(|(name, placement)| (name.to_string(), placement))
                .collect(),
            regions: regions
                .into_iter()
                .map(|(name, placement)| (name.to_string(), placement))
                .collect(),
        }
    }
}

impl LabelTable {
    /// An empty table: no inline labels at all
    #[must_use]
    pub fn empty() -> Self {
        Self {
            countries: BTreeMap::new(),
            regions: BTreeMap::new(),
        }
    }

    /// Parse a table from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.normalized()
    }

    /// Load a table from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let bytes = safe_read_file(path, "reading label placements")?;
        let table = serde_json::from_slice::<Self>(&bytes)?.normalized()?;
        log::info!(
            "Loaded {} country and {} region label placements from {}",
            table.countries.len(),
            table.regions.len(),
            path.display()
        );
        Ok(table)
    }

    /// Resolve the table for a dataset
    ///
    /// An explicit path wins; otherwise `label_positions.json` in the
    /// dataset's directory is used if present, and the built-in table if not.
    pub fn resolve(explicit: Option<&Path>, dataset_path: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_json_file(path);
        }

        let beside = dataset_path
            .parent()
            .map(|dir| dir.join(DEFAULT_LABEL_FILE))
            .filter(|candidate| candidate.is_file());

        match beside {
            Some(path) => Self::from_json_file(&path),
            None => {
                log::debug!("No label file beside {}, using built-in placements", dataset_path.display());
                Ok(Self::default())
            }
        }
    }

    /// Placement for a country label
    #[must_use]
    pub fn country(&self, name: &str) -> Option<LabelPlacement> {
        self.countries.get(&normalize_label(name)).copied()
    }

    /// Placement for a region label
    #[must_use]
    pub fn region(&self, name: &str) -> Option<LabelPlacement> {
        self.regions.get(&normalize_label(name)).copied()
    }

    /// Trim every key and check every offset
    fn normalized(self) -> Result<Self> {
        Ok(Self {
            countries: normalize_keys(self.countries)?,
            regions: normalize_keys(self.regions)?,
        })
    }
}

fn normalize_keys(entries: BTreeMap<String, LabelPlacement>) -> Result<BTreeMap<String, LabelPlacement>> {
    let mut normalized = BTreeMap::new();
    for (name, placement) in entries {
        if !placement.offset.is_finite() {
            return Err(FertilityError::ConfigError(format!(
                "Label offset for '{name}' is not a finite number"
            )));
        }
        let key = normalize_label(&name);
        if normalized.insert(key.clone(), placement).is_some() {
            return Err(FertilityError::ConfigError(format!(
                "Label '{key}' is listed more than once"
            )));
        }
    }
    Ok(normalized)
}
