//! Chart Plotter Module
//! Draws the cancer, chromosome and protein views using egui_plot.

use crate::data::{Polarity, Prognosis, PrognosticCount, ProteinRow};
use egui::{Color32, RichText, ScrollArea};
use egui_plot::{Bar, BarChart, Legend, Plot};

pub const FAVORABLE_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green
pub const UNFAVORABLE_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
pub const BOTH_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange

const BAR_WIDTH: f64 = 0.38;
const TABLE_ROW_HEIGHT: f32 = 18.0;

/// Chart data for one count chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub x_label: String,
    pub counts: Vec<PrognosticCount>,
}

/// Renders the dashboard views.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn polarity_color(polarity: Polarity) -> Color32 {
        match polarity {
            Polarity::Favorable => FAVORABLE_COLOR,
            Polarity::Unfavorable => UNFAVORABLE_COLOR,
        }
    }

    pub fn prognosis_color(prognosis: Prognosis) -> Color32 {
        match prognosis {
            Prognosis::Favorable => FAVORABLE_COLOR,
            Prognosis::Unfavorable => UNFAVORABLE_COLOR,
            Prognosis::Both => BOTH_COLOR,
        }
    }

    /// X offset of a polarity's bar within its group, so the two bars sit
    /// side by side around the category position.
    pub fn bar_offset(polarity: Polarity) -> f64 {
        match polarity {
            Polarity::Favorable => -BAR_WIDTH / 2.0,
            Polarity::Unfavorable => BAR_WIDTH / 2.0,
        }
    }

    /// One bar per category for the given polarity.
    pub fn polarity_bars(counts: &[PrognosticCount], polarity: Polarity) -> Vec<Bar> {
        counts
            .iter()
            .enumerate()
            .map(|(i, count)| {
                Bar::new(i as f64 + Self::bar_offset(polarity), count.get(polarity) as f64)
                    .width(BAR_WIDTH)
                    .name(&count.label)
            })
            .collect()
    }

    /// Grouped favorable/unfavorable bar chart.
    pub fn draw_count_chart(ui: &mut egui::Ui, chart: &ChartData, height: f32) {
        ui.label(RichText::new(&chart.title).size(14.0).strong());

        if chart.counts.is_empty() {
            ui.label(RichText::new("No prognostic proteins for this selection").color(Color32::GRAY));
            return;
        }

        let x_labels: Vec<String> = chart.counts.iter().map(|c| c.label.clone()).collect();

        Plot::new(format!("bars_{}", chart.title))
            .height(height)
            .legend(Legend::default())
            .allow_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label("Proteins")
            .x_axis_formatter(move |mark, _range| {
                let rounded = mark.value.round();
                if (mark.value - rounded).abs() > f64::EPSILON || rounded < 0.0 {
                    return String::new();
                }
                x_labels.get(rounded as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for polarity in Polarity::ALL {
                    let name = match polarity {
                        Polarity::Favorable => "Favorable",
                        Polarity::Unfavorable => "Unfavorable",
                    };
                    plot_ui.bar_chart(
                        BarChart::new(Self::polarity_bars(&chart.counts, polarity))
                            .color(Self::polarity_color(polarity))
                            .name(name),
                    );
                }
            });
    }

    /// Scrollable protein table.
    pub fn draw_protein_table(ui: &mut egui::Ui, rows: &[ProteinRow], max_height: f32) {
        ui.label(
            RichText::new(format!("Proteins ({})", rows.len()))
                .size(14.0)
                .strong(),
        );

        if rows.is_empty() {
            ui.label(RichText::new("No prognostic proteins for this selection").color(Color32::GRAY));
            return;
        }

        ScrollArea::vertical()
            .max_height(max_height)
            .auto_shrink([false, true])
            .show_rows(ui, TABLE_ROW_HEIGHT, rows.len(), |ui, row_range| {
                egui::Grid::new("protein_table")
                    .striped(true)
                    .num_columns(5)
                    .min_col_width(70.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Gene", "Uniprot", "Chromosome", "Class", "Prognosis"] {
                            ui.label(RichText::new(header).strong().size(12.0));
                        }
                        ui.end_row();

                        for row in &rows[row_range] {
                            ui.label(RichText::new(&row.gene).size(12.0));
                            ui.label(RichText::new(&row.uniprot).size(12.0));
                            ui.label(RichText::new(&row.chromosome).size(12.0));
                            ui.label(RichText::new(&row.classes).size(12.0));
                            ui.label(
                                RichText::new(row.prognosis.label())
                                    .size(12.0)
                                    .color(Self::prognosis_color(row.prognosis)),
                            );
                            ui.end_row();
                        }
                    });
            });
    }
}
