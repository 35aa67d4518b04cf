//! Fertility-rate charts from World Bank style country data.
//!
//! Loads per-country total fertility rates with populations from CSV or
//! Parquet, aggregates them into population-weighted regional series, and
//! renders a static newspaper-style SVG chart and an interactive plotly chart.

pub mod algorithm;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod render;
pub mod schema;
pub mod session;

// Re-export the most common types for easier use
// Core types
pub use cache::{CacheOutcome, DatasetCache};
pub use config::{InteractiveConfig, LabelTable, LoaderConfig, StaticChartConfig};
pub use error::{FertilityError, Result};
pub use models::{Dataset, FertilityRecord, RegionSeries, SourceId};
pub use session::{RenderOutput, Session};

// Aggregation and filtering
pub use algorithm::{RegionWeighted, aggregate_regions};
pub use filter::{ChartFilter, CountrySelection, FilteredView, YearRange};

// Loading
pub use loader::{dataset_from_csv_str, load_dataset};

// Rendering
pub use render::{InteractiveChart, StaticChart, build_static_chart, render_svg};
