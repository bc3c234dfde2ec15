use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, info};

use crate::error::{PrecRecError, Result};
use crate::model::{BestRecord, Table};

pub const FIGURE_SIZE: (u32, u32) = (1000, 800);
pub const DEFAULT_EXTENSION: &str = "png";

const FAINT_ALPHA: f64 = 0.2;
const MARKER_SIZE: i32 = 7;
const BEST_MARKER_SIZE: i32 = 9;
const LABEL_FONT: (&str, i32) = ("sans-serif", 14);
const CAPTION_FONT: (&str, i32) = ("sans-serif", 24);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFormat {
    Png,
    Svg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointStyle {
    Best,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub style: PointStyle,
}

/// Recall on x, precision on y, one point per record in table order.
pub fn plot_points(table: &Table, best: &BestRecord) -> Vec<PlotPoint> {
    table
        .records()
        .iter()
        .enumerate()
        .map(|(idx, r)| PlotPoint {
            x: r.recall,
            y: r.precision,
            label: r.score.clone(),
            style: if idx == best.index {
                PointStyle::Best
            } else {
                PointStyle::Other
            },
        })
        .collect()
}

/// Maps a title to an output file. A bare title gets the default extension.
pub fn resolve_plot_path(out_dir: &Path, title: &str) -> Result<(PathBuf, PlotFormat)> {
    let mut path = out_dir.join(title);
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    let format = match ext.as_deref() {
        None | Some("") => {
            let stem = title.trim_end_matches('.');
            path = out_dir.join(format!("{stem}.{DEFAULT_EXTENSION}"));
            PlotFormat::Png
        }
        Some("png") => PlotFormat::Png,
        Some("svg") => PlotFormat::Svg,
        Some(other) => return Err(PrecRecError::UnsupportedFormat(other.to_string())),
    };
    Ok((path, format))
}

/// Draws the precision/recall chart. Returns the written path when `save`
/// is set; otherwise nothing is rendered.
pub fn render(
    table: &Table,
    best: &BestRecord,
    title: &str,
    save: bool,
    out_dir: &Path,
) -> Result<Option<PathBuf>> {
    let points = plot_points(table, best);
    if !save {
        info!(
            "plot saving disabled; skipped rendering {} points",
            points.len()
        );
        return Ok(None);
    }

    let (path, format) = resolve_plot_path(out_dir, title)?;
    debug!("rendering {:?} plot to {}", format, path.display());
    match format {
        PlotFormat::Png => {
            let root = BitMapBackend::new(&path, FIGURE_SIZE).into_drawing_area();
            draw_chart(&root, &points, title)?;
        }
        PlotFormat::Svg => {
            let root = SVGBackend::new(&path, FIGURE_SIZE).into_drawing_area();
            draw_chart(&root, &points, title)?;
        }
    }
    info!("wrote plot to {}", path.display());
    Ok(Some(path))
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    points: &[PlotPoint],
    title: &str,
) -> Result<()> {
    root.fill(&WHITE).map_err(plot_err)?;

    let x_range = padded_range(points.iter().map(|p| p.x));
    let y_range = padded_range(points.iter().map(|p| p.y));

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .caption(title, CAPTION_FONT)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Recall")
        .y_desc("Precision")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|p| (p.x, p.y)),
            BLUE.mix(FAINT_ALPHA),
        ))
        .map_err(plot_err)?;

    chart
        .draw_series(
            points
                .iter()
                .filter(|p| p.style == PointStyle::Other)
                .map(|p| {
                    TriangleMarker::new((p.x, p.y), MARKER_SIZE, BLUE.mix(FAINT_ALPHA).filled())
                }),
        )
        .map_err(plot_err)?;

    chart
        .draw_series(
            points
                .iter()
                .filter(|p| p.style == PointStyle::Best)
                .map(|p| Cross::new((p.x, p.y), BEST_MARKER_SIZE, GREEN.stroke_width(3))),
        )
        .map_err(plot_err)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|p| Text::new(p.label.clone(), (p.x, p.y), LABEL_FONT)),
        )
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return 0.0..100.0;
    }
    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
    (min - pad)..(max + pad)
}

fn plot_err(err: impl std::fmt::Display) -> PrecRecError {
    PrecRecError::Plot(err.to_string())
}

#[cfg(test)]
#[path = "../../tests/src_inline/plot/tests.rs"]
mod tests;
