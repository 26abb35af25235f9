//! Pairscope Main Application
//! Main window wiring the store, loader, grid builder and panels together.

use crate::charts::{build_pair_grid, PairGrid, StaticPairRenderer};
use crate::config::AppConfig;
use crate::data::{
    categorical_columns, load_dataset, numeric_columns, DatasetStore, LoadedTable, StoreError,
};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use polars::prelude::DataFrame;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Dataset load result from background thread
enum LoadResult {
    Complete { name: String, df: DataFrame },
    Error { name: String, message: String },
}

/// Pair-grid build result from background thread
enum GridResult {
    Complete(Box<PairGrid>),
    Error(String),
}

/// Main application window.
pub struct PairscopeApp {
    store: DatasetStore,
    control_panel: ControlPanel,
    viewer: ChartViewer,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,

    // Async grid building
    grid_rx: Option<Receiver<GridResult>>,
    is_building: bool,
}

impl PairscopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            store: DatasetStore::new(config.store_dir),
            control_panel: ControlPanel::new(),
            viewer: ChartViewer::default(),
            load_rx: None,
            is_loading: false,
            grid_rx: None,
            is_building: false,
        };
        if app.refresh_datasets() {
            app.start_load();
        }
        app
    }

    /// Re-enumerate the store. Returns whether the selection moved (the
    /// caller then reloads).
    fn refresh_datasets(&mut self) -> bool {
        match self.store.list_datasets() {
            Ok(datasets) => {
                if datasets.is_empty() {
                    self.control_panel
                        .set_progress(0.0, "Store is empty - upload a CSV");
                }
                self.control_panel.update_datasets(datasets)
            }
            Err(e) => {
                log::error!("Failed to list datasets: {e}");
                self.control_panel.set_progress(0.0, &format!("Error: {e}"));
                false
            }
        }
    }

    /// Reload the selected dataset from disk in a background thread. The
    /// previous table and grid are dropped immediately; nothing is cached
    /// across selections.
    fn start_load(&mut self) {
        let Some(name) = self.control_panel.settings.dataset.clone() else {
            return;
        };

        self.viewer.clear();
        self.control_panel.update_categorical(Vec::new());
        self.control_panel.export_enabled = false;
        self.control_panel
            .set_progress(10.0, &format!("Loading {name}..."));
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let path = self.store.dataset_path(&name);

        thread::spawn(move || {
            let result = match load_dataset(&path) {
                Ok(df) => LoadResult::Complete { name, df },
                Err(e) => LoadResult::Error {
                    name,
                    message: e.to_string(),
                },
            };
            let _ = tx.send(result);
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete { name, df } => {
                        log::info!(
                            "Loaded dataset '{name}': {} rows, {} columns",
                            df.height(),
                            df.width()
                        );
                        self.control_panel
                            .update_categorical(categorical_columns(&df));
                        self.control_panel.set_progress(
                            50.0,
                            &format!("Loaded {} rows, {} columns", df.height(), df.width()),
                        );
                        self.viewer.table = Some(LoadedTable { name, df });
                        self.is_loading = false;
                        should_keep_receiver = false;
                        self.start_grid_build();
                    }
                    LoadResult::Error { name, message } => {
                        log::error!("Failed to load dataset '{name}': {message}");
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {message}"));
                        self.viewer.notice =
                            Some(format!("Could not load dataset '{name}': {message}"));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Rebuild the pair grid for the current table and selection in a
    /// background thread.
    fn start_grid_build(&mut self) {
        let (df, numeric) = match &self.viewer.table {
            Some(table) => (table.df.clone(), numeric_columns(&table.df)),
            None => return,
        };

        if numeric.is_empty() {
            self.viewer.grid = None;
            self.viewer.notice = Some(
                "This dataset has no numeric columns, so there is nothing to plot.".to_string(),
            );
            self.control_panel.set_progress(100.0, "Nothing to plot");
            self.control_panel.export_enabled = false;
            return;
        }
        self.viewer.notice = if numeric.len() == 1 {
            Some("Only one numeric column; showing its distribution.".to_string())
        } else {
            None
        };

        let color_by = if self.control_panel.settings.color_by_enabled {
            self.control_panel.settings.color_by.clone()
        } else {
            None
        };

        self.control_panel.set_progress(70.0, "Building pair plot...");
        self.control_panel.export_enabled = false;
        self.is_building = true;

        let (tx, rx) = channel();
        self.grid_rx = Some(rx);

        thread::spawn(move || {
            let result = match build_pair_grid(&df, &numeric, color_by.as_deref()) {
                Ok(grid) => GridResult::Complete(Box::new(grid)),
                Err(e) => GridResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for grid building results
    fn check_grid_results(&mut self) {
        let rx = self.grid_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    GridResult::Complete(grid) => {
                        let n = grid.size();
                        self.control_panel
                            .set_progress(100.0, &format!("Pair plot ready ({n}x{n})"));
                        self.viewer.grid = Some(*grid);
                        self.control_panel.export_enabled = true;
                        self.is_building = false;
                        should_keep_receiver = false;
                    }
                    GridResult::Error(message) => {
                        log::error!("Failed to build pair plot: {message}");
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {message}"));
                        self.viewer.notice = Some(message);
                        self.is_building = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.grid_rx = Some(rx);
            }
        }
    }

    /// Handle a CSV upload: pick a file anywhere on disk, copy its bytes
    /// into the store, then select and load the new dataset.
    fn handle_upload(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        let Some(filename) = path.file_name().and_then(|n| n.to_str()).map(str::to_string)
        else {
            self.control_panel
                .set_progress(0.0, "Error: invalid file name");
            return;
        };

        let saved = std::fs::read(&path)
            .map_err(StoreError::Io)
            .and_then(|bytes| self.store.save_upload(&filename, &bytes));

        match saved {
            Ok(stored) => {
                log::info!("Uploaded {} -> {}", path.display(), stored.display());
                self.control_panel
                    .set_progress(100.0, &format!("Uploaded {filename}"));
                self.refresh_datasets();

                // Jump straight to what was just uploaded.
                if let Some(stem) = Path::new(&filename)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
                {
                    if self.control_panel.datasets.contains(&stem) {
                        self.control_panel.settings.dataset = Some(stem);
                        self.control_panel.settings.color_by = None;
                    }
                }
                self.start_load();
            }
            Err(e) => {
                log::error!("Upload failed: {e}");
                self.control_panel.set_progress(0.0, &format!("Error: {e}"));
            }
        }
    }

    /// Handle PNG export of the current pair grid.
    fn handle_export(&mut self) {
        let Some(grid) = &self.viewer.grid else {
            self.control_panel.set_progress(0.0, "No pair plot to export");
            return;
        };

        let title = match &self.viewer.table {
            Some(table) => format!("Pair plot - {}", table.name),
            None => "Pair plot".to_string(),
        };
        let default_name = match &self.viewer.table {
            Some(table) => format!("{}_pairplot.png", table.name),
            None => "pairplot.png".to_string(),
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(&default_name)
            .save_file()
        else {
            return;
        };

        self.control_panel.set_progress(30.0, "Rendering pair plot...");

        let side = (grid.size() as u32 * 320).clamp(640, 2560);
        match StaticPairRenderer::render_png(grid, &title, &path, side, side + 48) {
            Ok(()) => {
                self.control_panel
                    .set_progress(100.0, &format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    log::warn!("Could not open exported file: {e}");
                }
            }
            Err(e) => {
                log::error!("Export failed: {e}");
                self.control_panel.set_progress(0.0, &format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for PairscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();
        self.check_grid_results();

        // Request repaint while loading or building
        if self.is_loading || self.is_building {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::UploadCsv => self.handle_upload(),
                        ControlPanelAction::RefreshDatasets => {
                            if self.refresh_datasets() {
                                self.start_load();
                            }
                        }
                        ControlPanelAction::DatasetSelected => self.start_load(),
                        ControlPanelAction::SelectionChanged => {
                            if !self.is_loading {
                                self.start_grid_build();
                            }
                        }
                        ControlPanelAction::ExportPng => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Pair-Plot Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.viewer.show(ui);
        });
    }
}
