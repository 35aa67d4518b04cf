//! Domain models for fertility-rate charts
//!
//! Per-country records as they are loaded from the source, the derived
//! population-weighted region entries, and the dataset that bundles both for
//! one load of a source.

pub mod dataset;
pub mod record;

pub use dataset::{Dataset, SourceId};
pub use record::{FertilityRecord, RegionSeries, normalize_label};
