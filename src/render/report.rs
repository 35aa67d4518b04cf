//! HTML page combining both charts
//!
//! The page shows the static SVG recreation first and the interactive explorer
//! below it, together with a summary of the filter that produced the
//! interactive view.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::filter::FilteredView;
use crate::render::interactive::InteractiveChart;

/// Script tag source for plotly.js
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.12.1.min.js";

/// A titled block of the report
#[derive(Debug, Clone)]
pub struct ReportSection {
    title: String,
    content_blocks: Vec<Markup>,
}

impl ReportSection {
    /// Create an empty section
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content_blocks: Vec::new(),
        }
    }

    /// Append arbitrary markup
    pub fn add_content(&mut self, content: Markup) {
        self.content_blocks.push(content);
    }

    /// Append an SVG document inline
    pub fn add_svg(&mut self, svg: &str) {
        self.content_blocks.push(html! {
            figure class="static-chart" { (PreEscaped(svg)) }
        });
    }

    /// Append the interactive chart
    pub fn add_interactive(&mut self, chart: &InteractiveChart) {
        self.content_blocks.push(html! {
            div class="interactive-chart" { (PreEscaped(chart.to_inline_html())) }
        });
    }

    fn render(&self) -> Markup {
        html! {
            section {
                h2 { (self.title) }
                @for block in &self.content_blocks {
                    (block)
                }
            }
        }
    }
}

/// The whole HTML report
#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    sections: Vec<ReportSection>,
}

impl Report {
    /// Create a report without sections
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sections: Vec::new(),
        }
    }

    /// Append a section
    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    /// Number of sections
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the report has no sections
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn render(&self) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    script src=(PLOTLY_CDN) {}
                    style {
                        (PreEscaped("
                            body { font-family: sans-serif; margin: 2rem auto; max-width: 1260px; color: #333333; }
                            h1 { font-size: 2rem; margin-bottom: 0.5rem; }
                            h2 { font-size: 1.25rem; margin-top: 2.5rem; }
                            .static-chart { margin: 0; }
                            .filter-summary { color: #6E6E6E; font-size: 0.9rem; }
                        "))
                    }
                }
                body {
                    h1 { (self.title) }
                    @for section in &self.sections {
                        (section.render())
                    }
                }
            }
        }
    }

    /// Render the report to an HTML string
    #[must_use]
    pub fn to_html(&self) -> String {
        self.render().into_string()
    }
}

/// Markup describing the controls behind a filtered view
#[must_use]
pub fn filter_summary(view: &FilteredView) -> Markup {
    let countries = if view.countries.is_empty() {
        "none".to_string()
    } else {
        view.countries.names().collect::<Vec<_>>().join(", ")
    };

    html! {
        p class="filter-summary" {
            "Years: " (view.years)
            " · Countries: " (countries)
            " · Regions: " (if view.show_regions { "shown" } else { "hidden" })
        }
    }
}

/// Assemble the two-section page from a rendered SVG and an interactive chart
#[must_use]
pub fn build_report(title: &str, svg: &str, interactive: &InteractiveChart, view: &FilteredView) -> Report {
    let mut report = Report::new(title);

    let mut recreation = ReportSection::new("Static recreation (NYT-style)");
    recreation.add_svg(svg);
    report.add_section(recreation);

    let mut explorer = ReportSection::new("Interactive explorer");
    explorer.add_content(filter_summary(view));
    explorer.add_interactive(interactive);
    report.add_section(explorer);

    report
}
