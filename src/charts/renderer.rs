//! Static Pair-Grid Renderer Module
//! Renders the current grid to a PNG file for export.

use crate::charts::pair::{HistBin, PairCell, PairGrid};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to render pair plot: {0}")]
    Draw(String),
    #[error("Nothing to render: pair grid is empty")]
    EmptyGrid,
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// RGB mirror of the interactive palette.
const PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),
    RGBColor(46, 204, 113),
    RGBColor(155, 89, 182),
    RGBColor(243, 156, 18),
    RGBColor(26, 188, 156),
    RGBColor(233, 30, 99),
    RGBColor(0, 188, 212),
    RGBColor(255, 87, 34),
    RGBColor(121, 85, 72),
    RGBColor(96, 125, 139),
];
const DEFAULT_COLOR: RGBColor = RGBColor(52, 152, 219);

const HEADER_HEIGHT: u32 = 48;

fn series_color(grid: &PairGrid, series_idx: usize) -> RGBColor {
    if grid.groups.is_empty() {
        DEFAULT_COLOR
    } else {
        PALETTE[series_idx % PALETTE.len()]
    }
}

pub struct StaticPairRenderer;

impl StaticPairRenderer {
    /// Render the grid to a PNG at `path`. The header row carries the title
    /// and, when coloring is active, a swatch legend.
    pub fn render_png(
        grid: &PairGrid,
        title: &str,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let n = grid.size();
        if n == 0 {
            return Err(RenderError::EmptyGrid);
        }

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let (header, body) = root.split_vertically(HEADER_HEIGHT);
        Self::draw_header(&header, grid, title)?;

        let areas = body.split_evenly((n, n));
        for (idx, area) in areas.iter().enumerate() {
            let (row, col) = (idx / n, idx % n);
            match grid.cell(row, col) {
                PairCell::Histogram { bins, .. } => {
                    Self::draw_histogram(area, grid, bins, row, col)?;
                }
                PairCell::Scatter { series, .. } => {
                    Self::draw_scatter(area, grid, series, row, col)?;
                }
            }
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }

    fn draw_header<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        grid: &PairGrid,
        title: &str,
    ) -> Result<(), RenderError> {
        let title_style: TextStyle = ("sans-serif", 22).into_font().into();
        area.draw_text(title, &title_style, (8, 6)).map_err(draw_err)?;

        // Swatch legend to the right of the title.
        let mut x = 8 + 12 * title.len() as i32 + 24;
        let y = 12;
        let label_style: TextStyle = ("sans-serif", 15).into_font().into();
        for (s, name) in grid.groups.iter().enumerate() {
            let color = series_color(grid, s);
            area.draw(&Rectangle::new(
                [(x, y), (x + 14, y + 14)],
                color.filled(),
            ))
            .map_err(draw_err)?;
            area.draw_text(name, &label_style, (x + 18, y)).map_err(draw_err)?;
            x += 18 + 9 * name.len() as i32 + 18;
        }
        Ok(())
    }

    fn draw_histogram<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        grid: &PairGrid,
        bins: &[HistBin],
        row: usize,
        col: usize,
    ) -> Result<(), RenderError> {
        let x_range = hist_x_range(bins);
        let y_max = bins
            .iter()
            .map(|b| b.counts.iter().sum::<usize>())
            .max()
            .unwrap_or(0) as f64;
        let y_range = 0.0..(y_max.max(1.0) * 1.05);

        let mut chart = Self::cell_chart(area, grid, row, col, x_range, y_range)?;

        for s in 0..grid.series_count() {
            let color = series_color(grid, s);
            chart
                .draw_series(bins.iter().filter(|b| b.counts[s] > 0).map(|b| {
                    let half = b.width / 2.0;
                    Rectangle::new(
                        [(b.center - half, 0.0), (b.center + half, b.counts[s] as f64)],
                        color.mix(0.45).filled(),
                    )
                }))
                .map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_scatter<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        grid: &PairGrid,
        series: &[Vec<[f64; 2]>],
        row: usize,
        col: usize,
    ) -> Result<(), RenderError> {
        let x_range = padded_range(series.iter().flatten().map(|p| p[0]));
        let y_range = padded_range(series.iter().flatten().map(|p| p[1]));

        let mut chart = Self::cell_chart(area, grid, row, col, x_range, y_range)?;

        for (s, points) in series.iter().enumerate() {
            let color = series_color(grid, s);
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&[x, y]| Circle::new((x, y), 2, color.filled())),
                )
                .map_err(draw_err)?;
        }
        Ok(())
    }

    /// Shared cell scaffolding: margins, outer-edge-only axis labels, mesh.
    fn cell_chart<'a, DB: DrawingBackend>(
        area: &'a DrawingArea<DB, Shift>,
        grid: &PairGrid,
        row: usize,
        col: usize,
        x_range: Range<f64>,
        y_range: Range<f64>,
    ) -> Result<ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>, RenderError>
    {
        let bottom = row + 1 == grid.size();
        let left = col == 0;

        let mut chart = ChartBuilder::on(area)
            .margin(6)
            .x_label_area_size(if bottom { 28 } else { 12 })
            .y_label_area_size(if left { 40 } else { 12 })
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh()
            .x_labels(4)
            .y_labels(4)
            .label_style(("sans-serif", 11));
        if bottom {
            mesh.x_desc(&grid.columns[col]);
        }
        if left {
            mesh.y_desc(&grid.columns[row]);
        }
        mesh.draw().map_err(draw_err)?;

        Ok(chart)
    }
}

fn hist_x_range(bins: &[HistBin]) -> Range<f64> {
    match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => {
            (first.center - first.width)..(last.center + last.width)
        }
        _ => 0.0..1.0,
    }
}

/// Data range padded by 5%, widened around a point when degenerate.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_infinite() {
        return 0.0..1.0;
    }
    if max > min {
        let pad = (max - min) * 0.05;
        (min - pad)..(max + pad)
    } else {
        (min - 1.0)..(max + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_widens_degenerate_data() {
        let r = padded_range([5.0].into_iter());
        assert_eq!(r, 4.0..6.0);
    }

    #[test]
    fn padded_range_defaults_when_empty() {
        let r = padded_range(std::iter::empty());
        assert_eq!(r, 0.0..1.0);
    }

    #[test]
    fn padded_range_adds_margin() {
        let r = padded_range([0.0, 10.0].into_iter());
        assert_eq!(r, -0.5..10.5);
    }
}
