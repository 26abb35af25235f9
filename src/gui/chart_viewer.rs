//! Pair-Plot Viewer Widget
//! Central panel: table summary, preview rows, legend and the pair grid.

use crate::charts::{series_color, PairGrid, PairPlotter};
use crate::data::LoadedTable;
use egui::{Color32, RichText, ScrollArea};
use polars::prelude::*;

const PREVIEW_ROWS: usize = 10;

/// Central display area. The app pushes load/build results in; drawing is
/// read-only.
#[derive(Default)]
pub struct ChartViewer {
    pub table: Option<LoadedTable>,
    pub grid: Option<PairGrid>,
    /// Scoped warning or error for the current selection (load failure,
    /// nothing to plot, degenerate grid).
    pub notice: Option<String>,
}

impl ChartViewer {
    /// Drop everything tied to the previous selection.
    pub fn clear(&mut self) {
        self.table = None;
        self.grid = None;
        self.notice = None;
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let Some(table) = &self.table else {
            ui.centered_and_justified(|ui| {
                let message = self
                    .notice
                    .as_deref()
                    .unwrap_or("Select or upload a dataset to explore it.");
                ui.label(RichText::new(message).size(16.0));
            });
            return;
        };

        ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!(
                    "{} - {} rows, {} columns",
                    table.name,
                    table.df.height(),
                    table.df.width()
                ))
                .size(16.0)
                .strong(),
            );
            ui.add_space(8.0);

            egui::CollapsingHeader::new(RichText::new("Preview").strong())
                .default_open(true)
                .show(ui, |ui| Self::draw_preview(ui, &table.df));

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(6.0);

            ui.label(RichText::new("Pair Plot").size(16.0).strong());
            ui.add_space(6.0);

            if let Some(notice) = &self.notice {
                ui.label(RichText::new(notice).color(Color32::from_rgb(255, 193, 7)));
                ui.add_space(6.0);
            }

            if let Some(grid) = &self.grid {
                Self::draw_legend(ui, grid);
                ui.add_space(6.0);
                PairPlotter::draw_grid(ui, grid);
            }
        });
    }

    /// First rows of the table in a striped grid, headers tagged with the
    /// inferred dtype.
    fn draw_preview(ui: &mut egui::Ui, df: &DataFrame) {
        let head = df.head(Some(PREVIEW_ROWS));

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("preview_table")
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([14.0, 4.0])
                    .show(ui, |ui| {
                        for col in head.get_columns() {
                            ui.label(
                                RichText::new(format!("{} ({})", col.name(), col.dtype()))
                                    .strong()
                                    .size(11.0),
                            );
                        }
                        ui.end_row();

                        for row in 0..head.height() {
                            for col in head.get_columns() {
                                let text = col
                                    .as_materialized_series()
                                    .get(row)
                                    .map(|v| v.to_string().trim_matches('"').to_string())
                                    .unwrap_or_default();
                                ui.label(RichText::new(text).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    /// Swatch legend for the active color groups, drawn once above the grid.
    fn draw_legend(ui: &mut egui::Ui, grid: &PairGrid) {
        if grid.groups.is_empty() {
            return;
        }

        ui.horizontal_wrapped(|ui| {
            if let Some(column) = &grid.color_by {
                ui.label(RichText::new(format!("{column}:")).strong().size(12.0));
                ui.add_space(4.0);
            }
            for (idx, group) in grid.groups.iter().enumerate() {
                let color = series_color(grid, idx);
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 2.0, color);
                ui.label(RichText::new(group).size(12.0));
                ui.add_space(10.0);
            }
        });
    }
}
