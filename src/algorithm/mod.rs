//! Aggregation algorithms over loaded fertility records
//!
//! Currently this is the population-weighted regional average that turns
//! per-country rates into one series per region.

pub mod region_weighted;

pub use region_weighted::{RegionKey, RegionWeighted, aggregate_regions};
