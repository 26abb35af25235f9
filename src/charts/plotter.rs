//! Pair-Grid Plotter Module
//! Draws the pair grid interactively using egui_plot.

use crate::charts::pair::{PairCell, PairGrid};
use egui::Color32;
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

/// Series color when no color-by column is active.
pub const DEFAULT_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

/// Color palette for groups
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Color for one series of the grid.
pub fn series_color(grid: &PairGrid, series_idx: usize) -> Color32 {
    if grid.groups.is_empty() {
        DEFAULT_COLOR
    } else {
        PALETTE[series_idx % PALETTE.len()]
    }
}

/// Renders a [`PairGrid`] as an N x N matrix of egui_plot cells.
pub struct PairPlotter;

impl PairPlotter {
    /// Draw the full grid. Cell size is derived from the available width;
    /// axis labels only appear on the outer edge of the matrix.
    pub fn draw_grid(ui: &mut egui::Ui, grid: &PairGrid) {
        let n = grid.size();
        if n == 0 {
            return;
        }

        let avail = ui.available_width();
        let cell = ((avail - 40.0) / n as f32).clamp(150.0, 420.0);

        egui::Grid::new("pair_grid")
            .spacing([4.0, 4.0])
            .show(ui, |ui| {
                for row in 0..n {
                    for col in 0..n {
                        ui.allocate_ui(egui::vec2(cell, cell), |ui| {
                            Self::draw_cell(ui, grid, row, col, cell);
                        });
                    }
                    ui.end_row();
                }
            });
    }

    fn draw_cell(ui: &mut egui::Ui, grid: &PairGrid, row: usize, col: usize, size: f32) {
        let mut plot = Plot::new(format!("pair_cell_{row}_{col}"))
            .width(size)
            .height(size)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show_grid(false);

        // Outer-edge labels only, like a pair-plot matrix.
        if row + 1 == grid.size() {
            plot = plot.x_axis_label(grid.columns[col].clone());
        }
        if col == 0 {
            plot = plot.y_axis_label(grid.columns[row].clone());
        }

        plot.show(ui, |plot_ui| match grid.cell(row, col) {
            PairCell::Histogram { bins, .. } => {
                for s in 0..grid.series_count() {
                    let color = series_color(grid, s);
                    let bars: Vec<Bar> = bins
                        .iter()
                        .filter(|b| b.counts[s] > 0)
                        .map(|b| {
                            Bar::new(b.center, b.counts[s] as f64)
                                .width(b.width)
                                .fill(color.gamma_multiply(0.45))
                        })
                        .collect();
                    if bars.is_empty() {
                        continue;
                    }
                    let mut chart = BarChart::new(bars).color(color);
                    if let Some(name) = grid.groups.get(s) {
                        chart = chart.name(name);
                    }
                    plot_ui.bar_chart(chart);
                }
            }
            PairCell::Scatter { series, .. } => {
                for (s, points) in series.iter().enumerate() {
                    if points.is_empty() {
                        continue;
                    }
                    let color = series_color(grid, s);
                    let plot_points: PlotPoints = points.iter().copied().collect();
                    let mut marks = Points::new(plot_points).radius(2.0).color(color);
                    if let Some(name) = grid.groups.get(s) {
                        marks = marks.name(name);
                    }
                    plot_ui.points(marks);
                }
            }
        });
    }
}
