//! The static, newspaper-style chart
//!
//! Region lines sit in a muted gray behind the highlighted countries, and each
//! line is named by an inline label placed from the hand-tuned label table
//! rather than by a legend. The chart is assembled as a plain value first so
//! placement can be inspected; [`super::svg::render_svg`] draws it.

use itertools::Itertools;

use crate::algorithm::RegionWeighted;
use crate::config::{LabelTable, StaticChartConfig};
use crate::error::Result;
use crate::models::{Dataset, FertilityRecord};
use crate::render::color::Rgb;

/// Which layer a line or label belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Background regional context
    Region,
    /// Highlighted country
    Country,
}

/// One polyline of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    /// Country or region name
    pub name: String,
    /// Layer the line is drawn in
    pub layer: Layer,
    /// Stroke color
    pub color: Rgb,
    /// Stroke width in pixels
    pub width: f64,
    /// Stroke opacity
    pub opacity: f64,
    /// (year, rate) points ordered by year
    pub points: Vec<(f64, f64)>,
}

/// Text placed next to a line
#[derive(Debug, Clone, PartialEq)]
pub struct InlineLabel {
    /// Label text, the entity name
    pub text: String,
    /// Layer of the labelled line
    pub layer: Layer,
    /// Data point the label belongs to, offset vertically
    pub anchor: (f64, f64),
    /// Where the text starts (left edge, vertical centre)
    pub position: (f64, f64),
    /// Text color
    pub color: Rgb,
    /// Font size in pixels
    pub font_size: u32,
    /// Whether a translucent white box is drawn behind the text
    pub backing: bool,
}

/// Free text positioned in data coordinates or on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Text to draw
    pub text: String,
    /// Color
    pub color: Rgb,
    /// Font size in pixels
    pub font_size: u32,
}

/// Fixed cosmetic settings of the static chart
#[derive(Debug, Clone, PartialEq)]
pub struct Cosmetics {
    /// Horizontal gridline color
    pub grid: Rgb,
    /// Bottom border color
    pub baseline: Rgb,
    /// Tick mark and tick label color
    pub ticks: Rgb,
    /// Font family
    pub font_family: String,
}

/// A fully laid out static chart
#[derive(Debug, Clone, PartialEq)]
pub struct StaticChart {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Horizontal bounds (years)
    pub x_bounds: (f64, f64),
    /// Vertical bounds (children per woman)
    pub y_bounds: (f64, f64),
    /// Years that get a tick and a tick label
    pub x_ticks: Vec<i32>,
    /// Rates that get a gridline and a tick label
    pub y_ticks: Vec<f64>,
    /// Region lines, alphabetical by region
    pub region_lines: Vec<ChartLine>,
    /// Highlighted country lines, in configured order
    pub country_lines: Vec<ChartLine>,
    /// Inline labels, countries first
    pub labels: Vec<InlineLabel>,
    /// Unit callout and its position in data coordinates
    pub callout: (Annotation, (f64, f64)),
    /// Citation centred under the chart
    pub source_note: Annotation,
    /// Colors and font
    pub cosmetics: Cosmetics,
}

impl StaticChart {
    /// Lay out the chart for a loaded dataset
    pub fn for_dataset(dataset: &Dataset, labels: &LabelTable, config: &StaticChartConfig) -> Result<Self> {
        build_static_chart(dataset.records(), dataset.regions(), labels, config)
    }

    /// Every line in draw order: regions first, countries on top
    pub fn lines(&self) -> impl Iterator<Item = &ChartLine> {
        self.region_lines.iter().chain(self.country_lines.iter())
    }

    /// The label for an entity, if it was placed
    #[must_use]
    pub fn label(&self, text: &str) -> Option<&InlineLabel> {
        self.labels.iter().find(|label| label.text == text)
    }
}

/// Lay out the static chart from all records and all region entries
///
/// # Arguments
/// * `records` - Every country record
/// * `regions` - The weighted regional table
/// * `labels` - Label anchor years and offsets
/// * `config` - Bounds, palette and cosmetics
///
/// # Errors
/// Returns an error if a configured color is not a `#RRGGBB` value
pub fn build_static_chart(
    records: &[FertilityRecord],
    regions: &RegionWeighted,
    labels: &LabelTable,
    config: &StaticChartConfig,
) -> Result<StaticChart> {
    let (x_min, x_max) = config.x_bounds;
    let x_bounds = (f64::from(x_min), f64::from(x_max));
    let in_bounds = |year: i32| (x_min..=x_max).contains(&year);

    let region_color = Rgb::parse_hex(&config.region_color)?;
    let region_label_color = Rgb::parse_hex(&config.region_label_color)?;

    let region_lines: Vec<ChartLine> = regions
        .regions()
        .into_iter()
        .map(|region| ChartLine {
            name: region.to_string(),
            layer: Layer::Region,
            color: region_color,
            width: config.region_line_width,
            opacity: config.region_opacity,
            points: regions
                .series_for(region)
                .into_iter()
                .filter(|entry| in_bounds(entry.year))
                .map(|entry| (f64::from(entry.year), entry.tfr_region))
                .collect(),
        })
        .collect();

    let mut country_lines = Vec::with_capacity(config.highlighted.len());
    let mut labels_out = Vec::new();

    for highlighted in &config.highlighted {
        let color = Rgb::parse_hex(&highlighted.color)?;
        let series: Vec<&FertilityRecord> = records
            .iter()
            .filter(|record| record.country == highlighted.name)
            .sorted_by_key(|record| record.year)
            .collect();

        if series.is_empty() {
            log::debug!("Highlighted country '{}' has no data", highlighted.name);
            continue;
        }

        country_lines.push(ChartLine {
            name: highlighted.name.clone(),
            layer: Layer::Country,
            color,
            width: config.country_line_width,
            opacity: 1.0,
            points: series
                .iter()
                .filter(|record| in_bounds(record.year))
                .map(|record| (f64::from(record.year), record.tfr))
                .collect(),
        });

        let Some(placement) = labels.country(&highlighted.name) else {
            continue;
        };
        match series.iter().find(|record| record.year == placement.year) {
            Some(record) => labels_out.push(place_label(
                &highlighted.name,
                Layer::Country,
                placement.year,
                record.tfr + placement.offset,
                color,
                config.country_label_size,
                config.label_year_shift,
            )),
            None => log::debug!(
                "No data for '{}' in {}, omitting its label",
                highlighted.name,
                placement.year
            ),
        }
    }

    for (region, placement) in &labels.regions {
        match regions.get(region, placement.year) {
            Some(entry) => labels_out.push(place_label(
                region,
                Layer::Region,
                placement.year,
                entry.tfr_region + placement.offset,
                region_label_color,
                config.region_label_size,
                config.label_year_shift,
            )),
            None => log::debug!("No data for region '{region}' in {}, omitting its label", placement.year),
        }
    }

    Ok(StaticChart {
        width: config.width,
        height: config.height,
        x_bounds,
        y_bounds: config.y_bounds,
        x_ticks: decade_ticks(x_min, x_max),
        y_ticks: whole_ticks(config.y_bounds),
        region_lines,
        country_lines,
        labels: labels_out,
        callout: (
            Annotation {
                text: config.callout.clone(),
                color: Rgb::parse_hex(&config.callout_color)?,
                font_size: 13,
            },
            config.callout_position,
        ),
        source_note: Annotation {
            text: config.source_note.clone(),
            color: Rgb::parse_hex(&config.tick_color)?,
            font_size: 10,
        },
        cosmetics: Cosmetics {
            grid: Rgb::parse_hex(&config.grid_color)?,
            baseline: Rgb::parse_hex(&config.baseline_color)?,
            ticks: Rgb::parse_hex(&config.tick_color)?,
            font_family: config.font_family.clone(),
        },
    })
}

fn place_label(
    text: &str,
    layer: Layer,
    year: i32,
    y: f64,
    color: Rgb,
    font_size: u32,
    year_shift: f64,
) -> InlineLabel {
    let x = f64::from(year);
    InlineLabel {
        text: text.to_string(),
        layer,
        anchor: (x, y),
        position: (x + year_shift, y),
        color,
        font_size,
        backing: layer == Layer::Country,
    }
}

/// Every multiple of ten inside the bounds
fn decade_ticks(min: i32, max: i32) -> Vec<i32> {
    let first = min + (10 - min.rem_euclid(10)) % 10;
    (first..=max).step_by(10).collect()
}

/// Every whole number inside the bounds
fn whole_ticks((min, max): (f64, f64)) -> Vec<f64> {
    let (first, last) = (min.ceil(), max.floor());
    if first > last {
        return Vec::new();
    }
    (0_i32..)
        .map(|step| first + f64::from(step))
        .take_while(|tick| *tick <= last)
        .collect()
}
