//! One rendering session over a shared dataset
//!
//! A [`Session`] owns the state of the user controls and turns it into charts.
//! The dataset behind it is shared and immutable, so several sessions can read
//! the same cached [`Dataset`] while holding independent filters.

use std::sync::Arc;

use crate::config::{InteractiveConfig, LabelTable, StaticChartConfig};
use crate::error::Result;
use crate::filter::{ChartFilter, CountrySelection, FilteredView, YearRange};
use crate::models::Dataset;
use crate::render::{InteractiveChart, Report, StaticChart, build_report, render_svg};

/// Everything produced by one render cycle
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// Static chart as an SVG document
    pub static_svg: String,
    /// Interactive chart as a standalone HTML document
    pub interactive_html: String,
    /// Page combining both charts
    pub report_html: String,
    /// The view the interactive chart was built from
    pub view: FilteredView,
}

/// Filter state and chart settings for one user
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Dataset>,
    filter: ChartFilter,
    labels: LabelTable,
    static_config: StaticChartConfig,
    interactive_config: InteractiveConfig,
}

impl Session {
    /// Start a session with default settings
    ///
    /// The initial filter spans every year in the data, selects the highlighted
    /// countries that the data contains and shows regions.
    #[must_use]
    pub fn new(dataset: Arc<Dataset>, labels: LabelTable) -> Self {
        Self::with_config(
            dataset,
            labels,
            StaticChartConfig::default(),
            InteractiveConfig::default(),
        )
    }

    /// Start a session with explicit chart settings
    #[must_use]
    pub fn with_config(
        dataset: Arc<Dataset>,
        labels: LabelTable,
        static_config: StaticChartConfig,
        interactive_config: InteractiveConfig,
    ) -> Self {
        let defaults = static_config
            .highlighted
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<CountrySelection>()
            .restrict_to(dataset.countries());
        let filter = ChartFilter::full_span(&dataset, defaults);

        Self {
            dataset,
            filter,
            labels,
            static_config,
            interactive_config,
        }
    }

    /// The dataset this session reads
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Current filter state
    #[must_use]
    pub const fn filter(&self) -> &ChartFilter {
        &self.filter
    }

    /// Label placements in use
    #[must_use]
    pub const fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Set the inclusive year range
    pub fn set_year_range(&mut self, years: YearRange) {
        self.filter.years = years;
    }

    /// Replace the country selection; names missing from the data are dropped
    pub fn set_countries(&mut self, countries: CountrySelection) {
        self.filter.countries = countries.restrict_to(self.dataset.countries());
    }

    /// Toggle region lines in the interactive chart
    pub fn set_show_regions(&mut self, show: bool) {
        self.filter.show_regions = show;
    }

    /// Change the static canvas size
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.static_config.width = width;
        self.static_config.height = height;
    }

    /// The dataset seen through the current filter
    #[must_use]
    pub fn filtered(&self) -> FilteredView {
        self.filter.apply(&self.dataset)
    }

    /// Lay out and draw the static chart, which always covers the full dataset
    pub fn render_static(&self) -> Result<String> {
        let chart = StaticChart::for_dataset(&self.dataset, &self.labels, &self.static_config)?;
        render_svg(&chart)
    }

    /// Build the interactive chart for the current filter
    #[must_use]
    pub fn render_interactive(&self) -> InteractiveChart {
        InteractiveChart::from_view(&self.filtered(), &self.interactive_config)
    }

    /// Run a full render cycle
    pub fn render(&self) -> Result<RenderOutput> {
        let view = self.filtered();
        if view.is_empty() {
            log::warn!("Current filter selects no data; the interactive chart will be empty");
        }

        let static_svg = self.render_static()?;
        let interactive = InteractiveChart::from_view(&view, &self.interactive_config);
        let report: Report = build_report(&self.interactive_config.title, &static_svg, &interactive, &view);

        log::info!(
            "Rendered {} country and {} region traces for {}",
            interactive.country_traces.len(),
            interactive.region_traces.len(),
            view.years
        );

        Ok(RenderOutput {
            interactive_html: interactive.to_html(),
            report_html: report.to_html(),
            static_svg,
            view,
        })
    }
}
