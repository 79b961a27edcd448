//! Control Panel Widget
//! Left side panel with the data source, the cancer-type selector and the
//! protein class multi-select.

use crate::data::{ProteinDataset, Selection};
use egui::{Color32, ComboBox, RichText, ScrollArea};

/// Data source, status line and the two selection widgets.
pub struct ControlPanel {
    pub source: String,
    /// Source being loaded; shown as `source` only once the load succeeds.
    pending_source: Option<String>,
    pub progress: f32,
    pub status: String,
    pub busy: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            source: String::new(),
            pending_source: None,
            progress: 0.0,
            status: "Ready".to_string(),
            busy: false,
        }
    }
}

impl ControlPanel {
    pub fn new(source: String) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    /// Draw the panel. Selection edits are written straight into `selection`
    /// and reported as [`ControlPanelAction::SelectionChanged`].
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        dataset: Option<&ProteinDataset>,
        selection: &mut Selection,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🧬 GCapricorn")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Human Protein Atlas prognostics")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new(&self.source).size(11.0));
        ui.add_space(5.0);

        ui.add_enabled_ui(!self.busy, |ui| {
            ui.horizontal(|ui| {
                if ui.button("🔄 Reload").clicked() {
                    action = ControlPanelAction::Reload;
                }
                if ui.button("📂 Open file").clicked() {
                    action = ControlPanelAction::OpenFile;
                }
            });
        });

        ui.add_space(10.0);
        ui.separator();

        let Some(dataset) = dataset else {
            self.show_status(ui);
            return action;
        };

        // ===== Cancer Type Section =====
        ui.label(RichText::new("🎯 Select Cancer Type").size(14.0).strong());
        ui.add_space(5.0);

        let selected_text = selection.cancer_type.clone().unwrap_or_default();
        ComboBox::from_id_salt("cancer_type")
            .width(ui.available_width() - 10.0)
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for cancer in dataset.cancer_types() {
                    let is_selected = selection.cancer_type.as_deref() == Some(cancer.as_str());
                    if ui.selectable_label(is_selected, cancer.as_str()).clicked() && !is_selected {
                        selection.cancer_type = Some(cancer.clone());
                        action = ControlPanelAction::SelectionChanged;
                    }
                }
            });

        ui.add_space(10.0);
        ui.separator();

        // ===== Protein Class Section =====
        ui.label(RichText::new("🏷 Select Protein Classes").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
                    for class in dataset.class_options() {
                        let mut checked = selection.protein_classes.contains(class);
                        if ui.checkbox(&mut checked, class.as_str()).changed() {
                            toggle_class(selection, class, checked);
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Clear All").clicked() && !selection.protein_classes.is_empty() {
                selection.protein_classes.clear();
                action = ControlPanelAction::SelectionChanged;
            }
        });
        if selection.protein_classes.is_empty() {
            ui.label(RichText::new("No class selected: showing all").size(11.0).color(Color32::GRAY));
        }

        ui.add_space(10.0);
        ui.separator();
        self.show_status(ui);

        action
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        if self.busy {
            ui.add(egui::ProgressBar::new(self.progress).animate(true));
        }

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));
    }

    /// Remember `source` until the load started for it finishes.
    pub fn begin_source_switch(&mut self, source: String) {
        self.pending_source = Some(source);
    }

    /// Commit the pending source after a successful load, drop it otherwise.
    pub fn finish_load(&mut self, succeeded: bool) {
        self.busy = false;
        if let Some(source) = self.pending_source.take() {
            if succeeded {
                self.source = source;
            }
        }
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Add or remove `class` from the selection, keeping first-selected order.
pub fn toggle_class(selection: &mut Selection, class: &str, checked: bool) {
    if checked {
        if !selection.protein_classes.iter().any(|c| c == class) {
            selection.protein_classes.push(class.to_string());
        }
    } else {
        selection.protein_classes.retain(|c| c != class);
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Reload,
    OpenFile,
    SelectionChanged,
}
