//! Chart construction and output
//!
//! Both charts are first laid out as plain values ([`StaticChart`],
//! [`InteractiveChart`]) and only then turned into SVG, plotly HTML or the
//! combined report page.

pub mod color;
pub mod interactive;
pub mod report;
pub mod static_chart;
pub mod svg;

pub use color::Rgb;
pub use interactive::{InteractiveChart, Trace, TraceKind};
pub use report::{Report, ReportSection, build_report, filter_summary};
pub use static_chart::{ChartLine, InlineLabel, Layer, StaticChart, build_static_chart};
pub use svg::render_svg;
