//! Filtering of records and region series by the user controls
//!
//! Every filter here reads its input and returns a fresh collection; the
//! loaded dataset is never modified. Edge cases degrade instead of failing:
//! an empty country selection or an empty/inverted year range simply yields
//! an empty result.

pub mod selection;
pub mod year_range;

pub use selection::CountrySelection;
pub use year_range::YearRange;

use crate::algorithm::RegionWeighted;
use crate::models::{Dataset, FertilityRecord, RegionSeries};

/// Defines a criterion for filtering records or region entries
pub trait FilterCriteria<T> {
    /// Determine if an entity meets the filter criteria
    fn meets_criteria(&self, entity: &T) -> bool;
}

impl FilterCriteria<FertilityRecord> for YearRange {
    fn meets_criteria(&self, record: &FertilityRecord) -> bool {
        self.contains(record.year)
    }
}

impl FilterCriteria<RegionSeries> for YearRange {
    fn meets_criteria(&self, entry: &RegionSeries) -> bool {
        self.contains(entry.year)
    }
}

impl FilterCriteria<FertilityRecord> for CountrySelection {
    fn meets_criteria(&self, record: &FertilityRecord) -> bool {
        self.contains(&record.country)
    }
}

/// Keep the records inside `years` whose country is selected, in input order
#[must_use]
pub fn filter_records(
    records: &[FertilityRecord],
    years: YearRange,
    countries: &CountrySelection,
) -> Vec<FertilityRecord> {
    records
        .iter()
        .filter(|record| years.meets_criteria(*record) && countries.meets_criteria(*record))
        .cloned()
        .collect()
}

/// Keep the region entries inside `years`, ordered by region then year
#[must_use]
pub fn filter_region_series(regions: &RegionWeighted, years: YearRange) -> Vec<RegionSeries> {
    regions
        .iter()
        .filter(|entry| years.meets_criteria(*entry))
        .cloned()
        .collect()
}

/// The state of the three user controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartFilter {
    /// Requested year range, clamped to the data when applied
    pub years: YearRange,
    /// Countries to draw as individual lines
    pub countries: CountrySelection,
    /// Whether region lines are drawn
    pub show_regions: bool,
}

impl ChartFilter {
    /// Filter covering the whole dataset with the given countries and regions shown
    #[must_use]
    pub fn full_span(dataset: &Dataset, countries: CountrySelection) -> Self {
        Self {
            years: dataset.year_span(),
            countries,
            show_regions: true,
        }
    }

    /// Apply the filter to a dataset
    ///
    /// The year range is first clamped to the data's span, so an out-of-bounds
    /// or inverted request produces an empty view rather than an error.
    #[must_use]
    pub fn apply(&self, dataset: &Dataset) -> FilteredView {
        let years = self.years.clamp_to(dataset.year_span());
        let records = filter_records(dataset.records(), years, &self.countries);
        let regions = if self.show_regions {
            filter_region_series(dataset.regions(), years)
        } else {
            Vec::new()
        };

        log::debug!(
            "Filter {} / {} countries / regions {}: {} records, {} region entries",
            years,
            self.countries.len(),
            if self.show_regions { "on" } else { "off" },
            records.len(),
            regions.len()
        );

        FilteredView {
            years,
            countries: self.countries.clone(),
            show_regions: self.show_regions,
            records,
            regions,
        }
    }
}

/// Filtered copies of the dataset, ready for the interactive renderer
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    /// Effective year range after clamping
    pub years: YearRange,
    /// Countries that were asked for
    pub countries: CountrySelection,
    /// Whether region series were requested
    pub show_regions: bool,
    /// Selected country records, in dataset order
    pub records: Vec<FertilityRecord>,
    /// Region entries in the range, empty when regions are hidden
    pub regions: Vec<RegionSeries>,
}

impl FilteredView {
    /// Whether nothing would be drawn
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.regions.is_empty()
    }
}
