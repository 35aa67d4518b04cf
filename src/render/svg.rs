//! SVG drawing of the static chart with plotters
//!
//! Gridlines, ticks and the bottom border are drawn by hand instead of through
//! the mesh so that only horizontal gridlines appear, only the bottom border
//! is visible and the tick positions are exactly the ones laid out.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::{FertilityError, Result};
use crate::render::static_chart::{InlineLabel, StaticChart};

/// Space under the plot reserved for the source note
const FOOTER_HEIGHT: i32 = 36;
/// Length of the x tick marks in pixels
const TICK_LENGTH: i32 = 5;
/// Plotters treats font sizes as points and divides by this when writing SVG
const PIXELS_TO_POINTS: f64 = 1.24;
/// Tick label size in pixels
const TICK_FONT_SIZE: u32 = 13;

/// Render a laid out static chart to an SVG document
///
/// # Arguments
/// * `chart` - The chart to draw
///
/// # Returns
/// The SVG markup as a string
pub fn render_svg(chart: &StaticChart) -> Result<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, (chart.width, chart.height)).into_drawing_area();
        root.fill(&WHITE).map_err(FertilityError::render)?;

        let plot_height = i32::try_from(chart.height).unwrap_or(i32::MAX) - FOOTER_HEIGHT;
        let (plot_area, footer) = root.split_vertically(plot_height);

        let (x0, x1) = chart.x_bounds;
        let (y0, y1) = chart.y_bounds;
        let mut ctx = ChartBuilder::on(&plot_area)
            .margin_top(48)
            .margin_left(48)
            .margin_right(40)
            .margin_bottom(28)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(FertilityError::render)?;

        let family = chart.cosmetics.font_family.as_str();
        let tick_color = chart.cosmetics.ticks.to_plotters();
        let grid_color = chart.cosmetics.grid.to_plotters();

        for &y in &chart.y_ticks {
            ctx.draw_series(LineSeries::new(vec![(x0, y), (x1, y)], grid_color.stroke_width(1)))
                .map_err(FertilityError::render)?;
        }

        for line in &chart.region_lines {
            let style = line
                .color
                .to_plotters()
                .mix(line.opacity)
                .stroke_width(stroke(line.width));
            ctx.draw_series(LineSeries::new(line.points.iter().copied(), style))
                .map_err(FertilityError::render)?;
        }

        ctx.draw_series(LineSeries::new(
            vec![(x0, y0), (x1, y0)],
            chart.cosmetics.baseline.to_plotters().stroke_width(1),
        ))
        .map_err(FertilityError::render)?;

        for line in &chart.country_lines {
            let style = line
                .color
                .to_plotters()
                .mix(line.opacity)
                .stroke_width(stroke(line.width));
            ctx.draw_series(LineSeries::new(line.points.iter().copied(), style))
                .map_err(FertilityError::render)?;
        }

        let tick_font = (family, font_size(TICK_FONT_SIZE)).into_font().color(&tick_color);
        for &year in &chart.x_ticks {
            let (px, py) = ctx.backend_coord(&(f64::from(year), y0));
            root.draw(&PathElement::new(
                vec![(px, py), (px, py + TICK_LENGTH)],
                tick_color.stroke_width(1),
            ))
            .map_err(FertilityError::render)?;
            root.draw_text(
                &year.to_string(),
                &tick_font.pos(Pos::new(HPos::Center, VPos::Top)),
                (px, py + TICK_LENGTH + 3),
            )
            .map_err(FertilityError::render)?;
        }
        for &value in &chart.y_ticks {
            let (px, py) = ctx.backend_coord(&(x0, value));
            root.draw_text(
                &format!("{value:.0}"),
                &tick_font.pos(Pos::new(HPos::Right, VPos::Center)),
                (px - 8, py),
            )
            .map_err(FertilityError::render)?;
        }

        for label in &chart.labels {
            let (px, py) = ctx.backend_coord(&label.position);
            draw_label(&root, label, family, (px, py))?;
        }

        let (callout, position) = &chart.callout;
        let (px, py) = ctx.backend_coord(position);
        let callout_style = (family, font_size(callout.font_size), FontStyle::Bold)
            .into_font()
            .color(&callout.color.to_plotters())
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        root.draw_text(&callout.text, &callout_style, (px, py))
            .map_err(FertilityError::render)?;

        let note = &chart.source_note;
        let note_style = (family, font_size(note.font_size))
            .into_font()
            .color(&note.color.to_plotters())
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        let center = i32::try_from(chart.width / 2).unwrap_or(i32::MAX);
        footer
            .draw_text(&note.text, &note_style, (center, FOOTER_HEIGHT - 6))
            .map_err(FertilityError::render)?;

        root.present().map_err(FertilityError::render)?;
    }

    log::debug!("Rendered static chart: {} bytes of SVG", buffer.len());
    Ok(buffer)
}

fn draw_label<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    label: &InlineLabel,
    family: &str,
    (px, py): (i32, i32),
) -> Result<()> {
    let style = (family, font_size(label.font_size))
        .into_font()
        .color(&label.color.to_plotters())
        .pos(Pos::new(HPos::Left, VPos::Center));

    if label.backing {
        let (width, height) = area
            .estimate_text_size(&label.text, &style)
            .map_err(FertilityError::render)?;
        let (width, height) = (
            i32::try_from(width).unwrap_or(0),
            i32::try_from(height).unwrap_or(0),
        );
        area.draw(&Rectangle::new(
            [(px - 2, py - height / 2 - 2), (px + width + 2, py + height / 2 + 2)],
            WHITE.mix(0.6).filled(),
        ))
        .map_err(FertilityError::render)?;
    }

    area.draw_text(&label.text, &style, (px, py))
        .map_err(FertilityError::render)
}

/// Font size to hand to plotters so the SVG carries `pixels`
fn font_size(pixels: u32) -> f64 {
    f64::from(pixels) * PIXELS_TO_POINTS
}

fn stroke(width: f64) -> u32 {
    // Plotters strokes are whole pixels.
    width.round().max(1.0) as u32
}
