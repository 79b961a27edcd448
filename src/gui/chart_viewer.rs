//! Chart Viewer Widget
//! Central area: cancer view and chromosome view side by side, protein view
//! below. Every view is computed from the dataset and the selection passed in.

use crate::charts::{ChartData, ChartPlotter};
use crate::data::{DataProcessor, ProteinDataset, ProteinRow, Selection};
use egui::RichText;

const CHART_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 320.0;

/// Cached view data for one selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewData {
    pub cancer: ChartData,
    pub chromosome: ChartData,
    pub proteins: Vec<ProteinRow>,
}

impl ViewData {
    pub fn build(dataset: &ProteinDataset, selection: &Selection) -> Self {
        let cancer_type = selection.cancer_type.clone().unwrap_or_default();
        Self {
            cancer: ChartData {
                title: format!("{cancer_type}: prognostic proteins by class"),
                x_label: "Protein class".to_string(),
                counts: DataProcessor::cancer_view(dataset, selection),
            },
            chromosome: ChartData {
                title: format!("{cancer_type}: prognostic proteins by chromosome"),
                x_label: "Chromosome".to_string(),
                counts: DataProcessor::chromosome_view(dataset, selection),
            },
            proteins: DataProcessor::protein_view(dataset, selection),
        }
    }
}

/// Renders the three views; recomputes them only when the selection changes.
#[derive(Default)]
pub struct ChartViewer {
    views: Option<ViewData>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop cached views, e.g. after the dataset or selection changed.
    pub fn clear(&mut self) {
        self.views = None;
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        dataset: Option<&ProteinDataset>,
        selection: &Selection,
    ) {
        let Some(dataset) = dataset else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let views = self
            .views
            .get_or_insert_with(|| ViewData::build(dataset, selection));

        let half_width = ((ui.available_width() - CHART_SPACING) / 2.0).max(200.0);

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.set_width(half_width);
                ChartPlotter::draw_count_chart(ui, &views.cancer, CHART_HEIGHT);
            });
            ui.add_space(CHART_SPACING);
            ui.vertical(|ui| {
                ui.set_width(half_width);
                ChartPlotter::draw_count_chart(ui, &views.chromosome, CHART_HEIGHT);
            });
        });

        ui.add_space(CHART_SPACING);
        ui.separator();

        let table_height = ui.available_height().max(CHART_HEIGHT);
        ChartPlotter::draw_protein_table(ui, &views.proteins, table_height);
    }
}
