//! Configuration for loading and rendering.

pub mod labels;

pub use labels::{DEFAULT_LABEL_FILE, LabelPlacement, LabelTable};

/// Default number of rows per decoded batch
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Configuration for the dataset loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Rows per Arrow record batch when decoding
    pub batch_size: usize,
    /// Drop rows with missing required values instead of failing the load
    pub skip_incomplete_rows: bool,
    /// Log a warning for rates outside the plausible range
    pub warn_on_implausible_rates: bool,
    /// Plausible total fertility rate range, inclusive
    pub plausible_tfr: (f64, f64),
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            skip_incomplete_rows: false,
            warn_on_implausible_rates: true,
            plausible_tfr: (0.5, 9.0),
        }
    }
}

/// A country drawn in the foreground of the static chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedCountry {
    /// Country name as it appears in the dataset
    pub name: String,
    /// Line and label color, `#RRGGBB`
    pub color: String,
}

impl HighlightedCountry {
    /// Create a highlighted country entry
    #[must_use]
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

/// Configuration for the static chart
#[derive(Debug, Clone)]
pub struct StaticChartConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Horizontal axis bounds, inclusive years
    pub x_bounds: (i32, i32),
    /// Vertical axis bounds in children per woman
    pub y_bounds: (f64, f64),
    /// Countries drawn on top, in draw order
    pub highlighted: Vec<HighlightedCountry>,
    /// Region line color
    pub region_color: String,
    /// Region line width
    pub region_line_width: f64,
    /// Region line opacity
    pub region_opacity: f64,
    /// Country line width
    pub country_line_width: f64,
    /// Region label color
    pub region_label_color: String,
    /// Country label font size
    pub country_label_size: u32,
    /// Region label font size
    pub region_label_size: u32,
    /// Years between a label's anchor and its text
    pub label_year_shift: f64,
    /// Horizontal gridline color
    pub grid_color: String,
    /// Bottom border color
    pub baseline_color: String,
    /// Tick label color
    pub tick_color: String,
    /// Text of the unit callout above the plot
    pub callout: String,
    /// Callout position in data coordinates (year, rate)
    pub callout_position: (f64, f64),
    /// Callout color
    pub callout_color: String,
    /// Data source citation under the plot
    pub source_note: String,
    /// Font family for all text
    pub font_family: String,
}

impl Default for StaticChartConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            x_bounds: (1960, 2023),
            y_bounds: (0.8, 7.1),
            highlighted: vec![
                HighlightedCountry::new("United States", "#3B64A1"),
                HighlightedCountry::new("France", "#E36A3B"),
                HighlightedCountry::new("Norway", "#BC3939"),
                HighlightedCountry::new("Canada", "#F6DD6F"),
                HighlightedCountry::new("Mexico", "#785171"),
                HighlightedCountry::new("Israel", "#CEB0C6"),
                HighlightedCountry::new("Hungary", "#4F4F4F"),
            ],
            region_color: "#BDBDBD".to_string(),
            region_line_width: 1.4,
            region_opacity: 0.9,
            country_line_width: 2.8,
            region_label_color: "#9E9E9E".to_string(),
            country_label_size: 14,
            region_label_size: 12,
            label_year_shift: 1.0,
            grid_color: "#E6E6E6".to_string(),
            baseline_color: "#333333".to_string(),
            tick_color: "#6E6E6E".to_string(),
            callout: "children".to_string(),
            callout_position: (1958.0, 7.2),
            callout_color: "#333333".to_string(),
            source_note: "SOURCE: World Bank (fertility rate, population) from 1960 to 2023"
                .to_string(),
            font_family: "sans-serif".to_string(),
        }
    }
}

impl StaticChartConfig {
    /// Color assigned to a highlighted country
    #[must_use]
    pub fn color_for(&self, country: &str) -> Option<&str> {
        self.highlighted
            .iter()
            .find(|entry| entry.name == country)
            .map(|entry| entry.color.as_str())
    }
}

/// Configuration for the interactive chart
#[derive(Debug, Clone)]
pub struct InteractiveConfig {
    /// Chart title
    pub title: String,
    /// Region line width
    pub region_line_width: f64,
    /// Region line opacity
    pub region_opacity: f64,
    /// Region line color
    pub region_color: String,
    /// Country line width
    pub country_line_width: f64,
    /// Element id of the chart's div when embedded in a page
    pub div_id: String,
}

impl Default for InteractiveConfig {
    fn default() -> Self {
        Self {
            title: "Birthrates Over Time".to_string(),
            region_line_width: 1.0,
            region_opacity: 0.35,
            region_color: "#9E9E9E".to_string(),
            country_line_width: 2.0,
            div_id: "fertility-interactive".to_string(),
        }
    }
}
