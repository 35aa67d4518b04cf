//! Row-level entities

use serde::{Deserialize, Serialize};

/// One observation of a country's total fertility rate in a given year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilityRecord {
    /// Country name
    #[serde(rename = "name")]
    pub country: String,
    /// Region label, whitespace-normalized on load
    pub region: String,
    /// Calendar year
    pub year: i32,
    /// Total fertility rate (children per woman)
    pub tfr: f64,
    /// Population used as the aggregation weight
    pub population: f64,
}

impl FertilityRecord {
    /// Create a record, normalizing the country and region labels
    #[must_use]
    pub fn new(country: &str, region: &str, year: i32, tfr: f64, population: f64) -> Self {
        Self {
            country: normalize_label(country),
            region: normalize_label(region),
            year,
            tfr,
            population,
        }
    }

    /// Normalize labels in place after deserialization
    pub fn post_deserialize(&mut self) {
        if self.country.trim().len() != self.country.len() {
            self.country = normalize_label(&self.country);
        }
        if self.region.trim().len() != self.region.len() {
            self.region = normalize_label(&self.region);
        }
    }
}

/// Population-weighted fertility rate of one region in one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSeries {
    /// Normalized region label
    pub region: String,
    /// Calendar year
    pub year: i32,
    /// `Σ(tfr * population) / Σ(population)` over the region's countries
    pub tfr_region: f64,
    /// Total population of the group, always positive
    pub population: f64,
}

/// Strip leading and trailing whitespace from a label
///
/// Applying it twice gives the same result as applying it once, so labels
/// coming from different stages can be compared after normalization.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label.trim().to_string()
}
