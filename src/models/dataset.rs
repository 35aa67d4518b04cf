//! A loaded dataset: records plus everything derived from them once per load

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::algorithm::RegionWeighted;
use crate::filter::YearRange;
use crate::models::{FertilityRecord, RegionSeries};

/// Identity of the source a dataset was loaded from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceId {
    /// Path of the source file
    pub path: PathBuf,
    /// Fingerprint of the file content at load time
    pub fingerprint: u64,
}

impl SourceId {
    /// Create a source identity
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, fingerprint: u64) -> Self {
        Self {
            path: path.into(),
            fingerprint,
        }
    }

    /// Identity for data that did not come from a file
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new("<memory>", 0)
    }

    /// Path of the source file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:016x})", self.path.display(), self.fingerprint)
    }
}

/// Read-only reference data for one rendering session
#[derive(Debug, Clone)]
pub struct Dataset {
    source: SourceId,
    records: Vec<FertilityRecord>,
    regions: RegionWeighted,
    year_span: YearRange,
    countries: BTreeSet<String>,
}

impl Dataset {
    /// Build a dataset, computing the regional table and the data's extent
    #[must_use]
    pub fn from_records(source: SourceId, records: Vec<FertilityRecord>) -> Self {
        let regions = RegionWeighted::from_records(&records);
        let year_span = YearRange::span_of(records.iter().map(|record| record.year));
        let countries = records.iter().map(|record| record.country.clone()).collect();

        log::info!(
            "Dataset {source}: {} records, {} region entries, years {year_span}",
            records.len(),
            regions.len()
        );

        Self {
            source,
            records,
            regions,
            year_span,
            countries,
        }
    }

    /// Where the data came from
    #[must_use]
    pub const fn source(&self) -> &SourceId {
        &self.source
    }

    /// All records in source order
    #[must_use]
    pub fn records(&self) -> &[FertilityRecord] {
        &self.records
    }

    /// The population-weighted regional table
    #[must_use]
    pub const fn regions(&self) -> &RegionWeighted {
        &self.regions
    }

    /// First to last year present in the data
    #[must_use]
    pub const fn year_span(&self) -> YearRange {
        self.year_span
    }

    /// Country names present in the data, sorted
    #[must_use]
    pub const fn countries(&self) -> &BTreeSet<String> {
        &self.countries
    }

    /// One country's records ordered by year
    #[must_use]
    pub fn country_series(&self, country: &str) -> Vec<&FertilityRecord> {
        self.records
            .iter()
            .filter(|record| record.country == country)
            .sorted_by_key(|record| record.year)
            .collect()
    }

    /// The first record for a country in a given year
    #[must_use]
    pub fn record_at(&self, country: &str, year: i32) -> Option<&FertilityRecord> {
        self.records
            .iter()
            .find(|record| record.country == country && record.year == year)
    }

    /// The regional entry for a region in a given year
    #[must_use]
    pub fn region_at(&self, region: &str, year: i32) -> Option<&RegionSeries> {
        self.regions.get(region, year)
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
