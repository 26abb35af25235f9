//! Control Panel Widget
//! Left side panel with dataset selection, coloring, upload and export.

use egui::{Color32, ComboBox, RichText};

/// The user's current plot selection. Transient widget state; reset rules
/// live in the update methods below.
#[derive(Default, Clone)]
pub struct PlotSettings {
    pub dataset: Option<String>,
    pub color_by_enabled: bool,
    pub color_by: Option<String>,
}

/// Left side control panel.
pub struct ControlPanel {
    pub settings: PlotSettings,
    pub datasets: Vec<String>,
    pub categorical: Vec<String>,
    pub export_enabled: bool,
    pub progress: f32,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: PlotSettings::default(),
            datasets: Vec::new(),
            categorical: Vec::new(),
            export_enabled: false,
            progress: 0.0,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dataset list. The current selection survives when it
    /// still exists; otherwise it falls back to the first entry and the
    /// color choice resets. Returns whether the selection moved.
    pub fn update_datasets(&mut self, datasets: Vec<String>) -> bool {
        self.datasets = datasets;
        let still_there = self
            .settings
            .dataset
            .as_ref()
            .is_some_and(|d| self.datasets.contains(d));
        if !still_there {
            self.settings.dataset = self.datasets.first().cloned();
            self.settings.color_by = None;
            return self.settings.dataset.is_some();
        }
        false
    }

    /// Categorical columns of the currently loaded table. A color choice
    /// left over from the previous dataset is dropped.
    pub fn update_categorical(&mut self, columns: Vec<String>) {
        self.categorical = columns;
        if let Some(col) = &self.settings.color_by {
            if !self.categorical.contains(col) {
                self.settings.color_by = None;
            }
        }
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Pairscope")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("CSV pair-plot explorer")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Datasets Section =====
        ui.label(RichText::new("Datasets").size(14.0).strong());
        ui.add_space(5.0);

        if self.datasets.is_empty() {
            ui.label(
                RichText::new("No datasets in the store yet.\nUpload a CSV to get started.")
                    .size(12.0)
                    .color(Color32::from_rgb(255, 193, 7)),
            );
        } else {
            let selected_text = self.settings.dataset.clone().unwrap_or_default();
            ComboBox::from_id_salt("dataset")
                .width(190.0)
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for name in &self.datasets {
                        let is_selected = self.settings.dataset.as_deref() == Some(name.as_str());
                        if ui.selectable_label(is_selected, name).clicked() && !is_selected {
                            self.settings.dataset = Some(name.clone());
                            self.settings.color_by = None;
                            action = ControlPanelAction::DatasetSelected;
                        }
                    }
                });
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Upload CSV...").clicked() {
                action = ControlPanelAction::UploadCsv;
            }
            if ui.button("Refresh").clicked() {
                action = ControlPanelAction::RefreshDatasets;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Coloring Section =====
        ui.label(RichText::new("Coloring").size(14.0).strong());
        ui.add_space(5.0);

        if ui
            .checkbox(
                &mut self.settings.color_by_enabled,
                "Color by a categorical column",
            )
            .changed()
        {
            if !self.settings.color_by_enabled {
                self.settings.color_by = None;
            }
            action = ControlPanelAction::SelectionChanged;
        }

        if self.settings.color_by_enabled {
            ui.add_space(5.0);
            if self.categorical.is_empty() {
                ui.label(
                    RichText::new("No categorical columns in this dataset.")
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            } else {
                let selected_text = self
                    .settings
                    .color_by
                    .clone()
                    .unwrap_or_else(|| "None".to_string());
                ComboBox::from_id_salt("color_by")
                    .width(190.0)
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        if ui
                            .selectable_label(self.settings.color_by.is_none(), "None")
                            .clicked()
                            && self.settings.color_by.take().is_some()
                        {
                            action = ControlPanelAction::SelectionChanged;
                        }
                        for col in &self.categorical {
                            let is_selected =
                                self.settings.color_by.as_deref() == Some(col.as_str());
                            if ui.selectable_label(is_selected, col).clicked() && !is_selected {
                                self.settings.color_by = Some(col.clone());
                                action = ControlPanelAction::SelectionChanged;
                            }
                        }
                    });
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.progress >= 100.0 {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    UploadCsv,
    RefreshDatasets,
    DatasetSelected,
    SelectionChanged,
    ExportPng,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_dataset_selected_by_default() {
        let mut panel = ControlPanel::new();
        assert!(panel.update_datasets(names(&["cars", "iris"])));
        assert_eq!(panel.settings.dataset.as_deref(), Some("cars"));
    }

    #[test]
    fn existing_selection_survives_refresh() {
        let mut panel = ControlPanel::new();
        panel.update_datasets(names(&["cars", "iris"]));
        panel.settings.dataset = Some("iris".to_string());

        assert!(!panel.update_datasets(names(&["cars", "iris", "wine"])));
        assert_eq!(panel.settings.dataset.as_deref(), Some("iris"));
    }

    #[test]
    fn removed_selection_falls_back_and_resets_color() {
        let mut panel = ControlPanel::new();
        panel.update_datasets(names(&["cars", "iris"]));
        panel.settings.dataset = Some("iris".to_string());
        panel.settings.color_by = Some("species".to_string());

        assert!(panel.update_datasets(names(&["cars"])));
        assert_eq!(panel.settings.dataset.as_deref(), Some("cars"));
        assert!(panel.settings.color_by.is_none());
    }

    #[test]
    fn empty_store_clears_selection() {
        let mut panel = ControlPanel::new();
        panel.update_datasets(names(&["cars"]));

        assert!(!panel.update_datasets(Vec::new()));
        assert!(panel.settings.dataset.is_none());
    }

    #[test]
    fn stale_color_choice_is_dropped() {
        let mut panel = ControlPanel::new();
        panel.settings.color_by = Some("species".to_string());

        panel.update_categorical(names(&["region", "kind"]));
        assert!(panel.settings.color_by.is_none());

        panel.settings.color_by = Some("region".to_string());
        panel.update_categorical(names(&["region", "kind"]));
        assert_eq!(panel.settings.color_by.as_deref(), Some("region"));
    }
}
