//! Population-weighted regional fertility rates
//!
//! Every (region, year) group of country records is reduced to
//! `Σ(tfr * population) / Σ(population)`. Groups whose population sums to
//! zero have no defined rate and are left out of the table; they are reported
//! through [`RegionWeighted::dropped_groups`] and a warning in the log.
//! Records with a non-finite rate or population are skipped.

use std::collections::BTreeMap;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::models::{FertilityRecord, RegionSeries, normalize_label};

/// Grouping key: normalized region label and calendar year
pub type RegionKey = (String, i32);

#[derive(Debug, Default, Clone, Copy)]
struct GroupAccumulator {
    count: usize,
    weighted_sum: f64,
    population: f64,
    min_tfr: f64,
    max_tfr: f64,
}

impl GroupAccumulator {
    fn add(&mut self, record: &FertilityRecord) {
        if self.count == 0 {
            self.min_tfr = record.tfr;
            self.max_tfr = record.tfr;
        } else {
            self.min_tfr = self.min_tfr.min(record.tfr);
            self.max_tfr = self.max_tfr.max(record.tfr);
        }
        self.count += 1;
        self.weighted_sum += record.tfr * record.population;
        self.population += record.population;
    }

    fn weighted_rate(&self) -> Option<f64> {
        if self.population > 0.0 {
            // Rounding can push the ratio a hair past its inputs.
            Some((self.weighted_sum / self.population).clamp(self.min_tfr, self.max_tfr))
        } else {
            None
        }
    }
}

/// Regional series indexed by (region, year)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionWeighted {
    entries: BTreeMap<RegionKey, RegionSeries>,
    dropped_groups: Vec<RegionKey>,
}

impl RegionWeighted {
    /// Aggregate country records into population-weighted region entries
    #[must_use]
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a FertilityRecord>,
    {
        let mut groups: FxHashMap<RegionKey, GroupAccumulator> = FxHashMap::default();
        let mut seen = 0usize;

        for record in records {
            seen += 1;
            if !record.tfr.is_finite() || !record.population.is_finite() {
                log::warn!(
                    "Skipping {} in {}: rate {} and population {} must be finite",
                    record.country,
                    record.year,
                    record.tfr,
                    record.population
                );
                continue;
            }
            let key = (normalize_label(&record.region), record.year);
            groups.entry(key).or_default().add(record);
        }

        let mut entries = BTreeMap::new();
        let mut dropped_groups = Vec::new();

        for (key, group) in groups {
            match group.weighted_rate() {
                Some(tfr_region) => {
                    let entry = RegionSeries {
                        region: key.0.clone(),
                        year: key.1,
                        tfr_region,
                        population: group.population,
                    };
                    entries.insert(key, entry);
                }
                None => dropped_groups.push(key),
            }
        }

        dropped_groups.sort();
        for (region, year) in &dropped_groups {
            log::warn!("Dropping region '{region}' in {year}: total population is zero");
        }

        log::debug!(
            "Aggregated {seen} records into {} region entries ({} groups dropped)",
            entries.len(),
            dropped_groups.len()
        );

        Self {
            entries,
            dropped_groups,
        }
    }

    /// Look up the entry for a region and year; the region is normalized first
    #[must_use]
    pub fn get(&self, region: &str, year: i32) -> Option<&RegionSeries> {
        self.entries.get(&(normalize_label(region), year))
    }

    /// All entries ordered by region, then year
    pub fn iter(&self) -> impl Iterator<Item = &RegionSeries> {
        self.entries.values()
    }

    /// Number of (region, year) entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry was produced
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Region names in alphabetical order
    #[must_use]
    pub fn regions(&self) -> Vec<&str> {
        self.entries.keys().map(|(region, _)| region.as_str()).dedup().collect()
    }

    /// One region's entries ordered by year
    #[must_use]
    pub fn series_for(&self, region: &str) -> Vec<&RegionSeries> {
        let region = normalize_label(region);
        self.entries
            .range((region.clone(), i32::MIN)..=(region, i32::MAX))
            .map(|(_, entry)| entry)
            .collect()
    }

    /// Groups that were left out because their population summed to zero
    #[must_use]
    pub fn dropped_groups(&self) -> &[RegionKey] {
        &self.dropped_groups
    }
}

/// Compute the weighted regional table for a slice of records
#[must_use]
pub fn aggregate_regions(records: &[FertilityRecord]) -> RegionWeighted {
    RegionWeighted::from_records(records)
}
