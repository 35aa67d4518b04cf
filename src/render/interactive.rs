//! The interactive chart
//!
//! One line per selected country, colored by plotly's categorical palette,
//! and optionally thin translucent region lines that stay out of the legend
//! but keep their own hover readout. Input collections are only read.

use itertools::Itertools;
use plotly::common::{Line, Mode, Title};
use plotly::layout::{Axis, HoverMode, Layout};
use plotly::{Plot, Scatter};

use crate::config::InteractiveConfig;
use crate::filter::{FilteredView, YearRange};
use crate::models::{FertilityRecord, RegionSeries};

/// What a trace represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    /// A selected country
    Country,
    /// A region's weighted series
    Region,
}

/// One line of the interactive chart
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// Country or region name
    pub name: String,
    /// What the line represents
    pub kind: TraceKind,
    /// Years ordered ascending
    pub years: Vec<i32>,
    /// Rates matching `years`
    pub values: Vec<f64>,
    /// Plotly hover template
    pub hover_template: String,
    /// Whether the trace appears in the legend
    pub show_legend: bool,
    /// Line opacity
    pub opacity: f64,
    /// Line width in pixels
    pub line_width: f64,
    /// Fixed color; `None` leaves the choice to the palette
    pub color: Option<String>,
}

impl Trace {
    /// Number of points
    #[must_use]
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Whether the trace has no points
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    fn to_scatter(&self) -> Box<Scatter<i32, f64>> {
        let mut line = Line::new().width(self.line_width);
        if let Some(color) = &self.color {
            line = line.color(color.clone());
        }

        Scatter::new(self.years.clone(), self.values.clone())
            .name(&self.name)
            .mode(Mode::Lines)
            .hover_template(&self.hover_template)
            .show_legend(self.show_legend)
            .opacity(self.opacity)
            .line(line)
    }
}

/// A laid out interactive chart
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveChart {
    /// Chart title
    pub title: String,
    /// Year range shown on the x axis
    pub years: YearRange,
    /// Region lines, alphabetical, drawn first
    pub region_traces: Vec<Trace>,
    /// Country lines, alphabetical
    pub country_traces: Vec<Trace>,
    /// Element id used when embedding the chart
    pub div_id: String,
}

impl InteractiveChart {
    /// Build the chart from already filtered records and region entries
    ///
    /// # Arguments
    /// * `records` - Records of the selected countries inside the year range
    /// * `regions` - Region entries inside the year range, `None` to hide regions
    /// * `years` - The effective year range
    /// * `config` - Styling
    #[must_use]
    pub fn build(
        records: &[FertilityRecord],
        regions: Option<&[RegionSeries]>,
        years: YearRange,
        config: &InteractiveConfig,
    ) -> Self {
        let country_traces: Vec<Trace> = records
            .iter()
            .into_group_map_by(|record| record.country.as_str())
            .into_iter()
            .sorted_by_key(|(country, _)| *country)
            .map(|(country, rows)| {
                let points: Vec<(i32, f64)> = rows
                    .into_iter()
                    .map(|record| (record.year, record.tfr))
                    .sorted_by_key(|(year, _)| *year)
                    .collect();
                Trace {
                    name: country.to_string(),
                    kind: TraceKind::Country,
                    years: points.iter().map(|(year, _)| *year).collect(),
                    values: points.iter().map(|(_, value)| *value).collect(),
                    hover_template: country_hover_template(country),
                    show_legend: true,
                    opacity: 1.0,
                    line_width: config.country_line_width,
                    color: None,
                }
            })
            .collect();

        let region_traces: Vec<Trace> = regions
            .map(|entries| {
                entries
                    .iter()
                    .into_group_map_by(|entry| entry.region.as_str())
                    .into_iter()
                    .sorted_by_key(|(region, _)| *region)
                    .map(|(region, rows)| {
                        let points: Vec<(i32, f64)> = rows
                            .into_iter()
                            .map(|entry| (entry.year, entry.tfr_region))
                            .sorted_by_key(|(year, _)| *year)
                            .collect();
                        Trace {
                            name: region.to_string(),
                            kind: TraceKind::Region,
                            years: points.iter().map(|(year, _)| *year).collect(),
                            values: points.iter().map(|(_, value)| *value).collect(),
                            hover_template: region_hover_template(region),
                            show_legend: false,
                            opacity: config.region_opacity,
                            line_width: config.region_line_width,
                            color: Some(config.region_color.clone()),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            title: config.title.clone(),
            years,
            region_traces,
            country_traces,
            div_id: config.div_id.clone(),
        }
    }

    /// Build the chart for a filtered view
    #[must_use]
    pub fn from_view(view: &FilteredView, config: &InteractiveConfig) -> Self {
        let regions = view.show_regions.then_some(view.regions.as_slice());
        Self::build(&view.records, regions, view.years, config)
    }

    /// All traces in draw order: regions first, countries on top
    pub fn traces(&self) -> impl Iterator<Item = &Trace> {
        self.region_traces.iter().chain(self.country_traces.iter())
    }

    /// Convert into a plotly plot
    #[must_use]
    pub fn to_plot(&self) -> Plot {
        let mut plot = Plot::new();
        for trace in self.traces() {
            plot.add_trace(trace.to_scatter());
        }

        let mut x_axis = Axis::new().title(Title::new("Year"));
        if !self.years.is_empty() {
            x_axis = x_axis.range(vec![f64::from(self.years.start()), f64::from(self.years.end())]);
        }

        let layout = Layout::new()
            .title(Title::new(&self.title))
            .hover_mode(HoverMode::Closest)
            .x_axis(x_axis)
            .y_axis(Axis::new().title(Title::new("Fertility rate (children per woman)")));
        plot.set_layout(layout);
        plot
    }

    /// Standalone HTML document
    #[must_use]
    pub fn to_html(&self) -> String {
        self.to_plot().to_html()
    }

    /// HTML fragment for embedding in a page that already loads plotly.js
    #[must_use]
    pub fn to_inline_html(&self) -> String {
        self.to_plot().to_inline_html(Some(&self.div_id))
    }

    /// Plotly JSON description
    #[must_use]
    pub fn to_json(&self) -> String {
        self.to_plot().to_json()
    }
}

fn country_hover_template(country: &str) -> String {
    format!("Year: %{{x}}<br>Country: {country}<br>Fertility rate: %{{y:.2f}}<extra></extra>")
}

fn region_hover_template(region: &str) -> String {
    format!("Region: {region}<br>Year: %{{x}}<br>Fertility rate: %{{y:.2f}}<extra></extra>")
}
