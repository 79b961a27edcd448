//! Data Processor Module
//! Turns the derived dataset and the current selection into the rows behind
//! the cancer, chromosome and protein views.

use crate::data::dataset::{Prognosis, ProteinDataset, ProteinEntry};
use crate::data::prognostics::Polarity;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Label used for proteins without a chromosome annotation.
pub const UNKNOWN_CHROMOSOME: &str = "Unknown";

/// Values of the two selection widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Empty means every class.
    pub protein_classes: Vec<String>,
    pub cancer_type: Option<String>,
}

impl Selection {
    pub fn new(protein_classes: Vec<String>, cancer_type: Option<String>) -> Self {
        Self {
            protein_classes,
            cancer_type,
        }
    }

    /// Initial selection for a freshly loaded dataset: the configured default
    /// classes and the first cancer type.
    pub fn initial(dataset: &ProteinDataset, default_classes: &[String]) -> Self {
        Self {
            protein_classes: default_classes.to_vec(),
            cancer_type: dataset.cancer_types().first().cloned(),
        }
    }

    /// Whether one of the protein's prioritized classes is selected.
    pub fn matches_classes(&self, entry: &ProteinEntry) -> bool {
        self.protein_classes.is_empty()
            || self
                .protein_classes
                .iter()
                .any(|class| entry.has_prioritized_class(class))
    }

    /// Drop selected classes and cancer type the dataset does not know.
    pub fn retain_known(&mut self, dataset: &ProteinDataset) {
        self.protein_classes
            .retain(|c| dataset.class_options().iter().any(|o| o == c));
        if let Some(cancer) = &self.cancer_type {
            if !dataset.cancer_types().iter().any(|c| c == cancer) {
                self.cancer_type = dataset.cancer_types().first().cloned();
            }
        }
    }
}

/// Favorable/unfavorable protein counts under one label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrognosticCount {
    pub label: String,
    pub favorable: usize,
    pub unfavorable: usize,
}

impl PrognosticCount {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Default::default()
        }
    }

    pub fn total(&self) -> usize {
        self.favorable + self.unfavorable
    }

    pub fn get(&self, polarity: Polarity) -> usize {
        match polarity {
            Polarity::Favorable => self.favorable,
            Polarity::Unfavorable => self.unfavorable,
        }
    }

    fn add(&mut self, prognosis: Prognosis) {
        if prognosis.includes(Polarity::Favorable) {
            self.favorable += 1;
        }
        if prognosis.includes(Polarity::Unfavorable) {
            self.unfavorable += 1;
        }
    }
}

/// One row of the protein view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinRow {
    pub gene: String,
    pub uniprot: String,
    pub chromosome: String,
    pub classes: String,
    pub prognosis: Prognosis,
}

/// Builds view data from the dataset; all functions are pure.
pub struct DataProcessor;

impl DataProcessor {
    /// Class-filtered proteins with a prognosis for the selected cancer type.
    fn prognostic_entries<'a>(
        dataset: &'a ProteinDataset,
        selection: &'a Selection,
    ) -> impl Iterator<Item = (&'a ProteinEntry, Prognosis)> + 'a {
        let cancer = selection.cancer_type.as_deref();
        dataset
            .entries()
            .iter()
            .filter(move |e| selection.matches_classes(e))
            .filter_map(move |e| Some((e, e.prognosis(cancer?)?)))
    }

    /// Cancer view: prognostic protein counts per prioritized class.
    ///
    /// Only classes inside the class filter are reported. Sorted by total
    /// descending, then class name.
    pub fn cancer_view(dataset: &ProteinDataset, selection: &Selection) -> Vec<PrognosticCount> {
        let mut counts: HashMap<&str, PrognosticCount> = HashMap::new();

        for (entry, prognosis) in Self::prognostic_entries(dataset, selection) {
            for class in &entry.prioritized_classes {
                let selected = selection.protein_classes.is_empty()
                    || selection.protein_classes.contains(class);
                if selected {
                    counts
                        .entry(class.as_str())
                        .or_insert_with(|| PrognosticCount::new(class))
                        .add(prognosis);
                }
            }
        }

        let mut rows: Vec<PrognosticCount> = counts.into_values().collect();
        rows.sort_by(|a, b| b.total().cmp(&a.total()).then_with(|| a.label.cmp(&b.label)));
        rows
    }

    /// Chromosome view: prognostic protein counts per chromosome, in
    /// chromosome order.
    pub fn chromosome_view(
        dataset: &ProteinDataset,
        selection: &Selection,
    ) -> Vec<PrognosticCount> {
        let mut counts: HashMap<&str, PrognosticCount> = HashMap::new();

        for (entry, prognosis) in Self::prognostic_entries(dataset, selection) {
            let chromosome = entry.chromosome.as_deref().unwrap_or(UNKNOWN_CHROMOSOME);
            counts
                .entry(chromosome)
                .or_insert_with(|| PrognosticCount::new(chromosome))
                .add(prognosis);
        }

        let mut rows: Vec<PrognosticCount> = counts.into_values().collect();
        rows.sort_by(|a, b| compare_chromosomes(&a.label, &b.label));
        rows
    }

    /// Protein view: one row per prognostic protein, sorted by gene.
    pub fn protein_view(dataset: &ProteinDataset, selection: &Selection) -> Vec<ProteinRow> {
        let mut rows: Vec<ProteinRow> = Self::prognostic_entries(dataset, selection)
            .map(|(entry, prognosis)| ProteinRow {
                gene: entry.gene.clone(),
                uniprot: entry.uniprot.clone(),
                chromosome: entry
                    .chromosome
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_CHROMOSOME.to_string()),
                classes: entry.prioritized_classes.join(", "),
                prognosis,
            })
            .collect();
        rows.sort_by(|a, b| a.gene.cmp(&b.gene).then_with(|| a.uniprot.cmp(&b.uniprot)));
        rows
    }
}

fn chromosome_rank(label: &str) -> (u8, u32) {
    if let Ok(n) = label.parse::<u32>() {
        return (0, n);
    }
    match label {
        "X" => (1, 0),
        "Y" => (2, 0),
        "MT" => (3, 0),
        UNKNOWN_CHROMOSOME => (5, 0),
        _ => (4, 0),
    }
}

/// Natural chromosome order: 1..22, X, Y, MT, others alphabetically, Unknown.
pub fn compare_chromosomes(a: &str, b: &str) -> Ordering {
    chromosome_rank(a)
        .cmp(&chromosome_rank(b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataFrame;

    fn entry(
        gene: &str,
        chromosome: Option<&str>,
        classes: &[&str],
        favorable: &[&str],
        unfavorable: &[&str],
    ) -> ProteinEntry {
        let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        ProteinEntry {
            gene: gene.to_string(),
            uniprot: format!("U-{gene}"),
            chromosome: chromosome.map(str::to_string),
            prioritized_classes: owned(classes),
            favorable: owned(favorable),
            unfavorable: owned(unfavorable),
        }
    }

    fn dataset() -> ProteinDataset {
        let entries = vec![
            entry("CYP3A4", Some("7"), &["Enzymes"], &["Liver cancer"], &[]),
            entry("SLC2A1", Some("1"), &["Enzymes", "Transporters"], &[], &["Liver cancer"]),
            entry("ABCB1", Some("7"), &["Transporters"], &["Liver cancer"], &["Liver cancer"]),
            entry("ALB", Some("X"), &["Plasma proteins"], &["Liver cancer"], &[]),
            entry("GFAP", Some("17"), &["Enzymes"], &[], &["Glioma"]),
            entry("NOPOS", None, &["Enzymes"], &["Liver cancer"], &[]),
        ];
        ProteinDataset::new(
            DataFrame::default(),
            entries,
            vec!["Liver cancer".to_string(), "Glioma".to_string()],
            vec![
                "Enzymes".to_string(),
                "Plasma proteins".to_string(),
                "Transporters".to_string(),
            ],
        )
    }

    fn selection(classes: &[&str], cancer: &str) -> Selection {
        Selection::new(
            classes.iter().map(|s| s.to_string()).collect(),
            Some(cancer.to_string()),
        )
    }

    #[test]
    fn test_cancer_view_counts_per_selected_class() {
        let rows = DataProcessor::cancer_view(&dataset(), &selection(&["Enzymes", "Transporters"], "Liver cancer"));
        assert_eq!(
            rows,
            vec![
                PrognosticCount { label: "Enzymes".into(), favorable: 2, unfavorable: 1 },
                PrognosticCount { label: "Transporters".into(), favorable: 1, unfavorable: 2 },
            ]
        );
    }

    #[test]
    fn test_empty_class_selection_matches_everything() {
        let rows = DataProcessor::cancer_view(&dataset(), &selection(&[], "Liver cancer"));
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Enzymes", "Transporters", "Plasma proteins"]);
    }

    #[test]
    fn test_chromosome_view_order() {
        let rows = DataProcessor::chromosome_view(&dataset(), &selection(&[], "Liver cancer"));
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "7", "X", UNKNOWN_CHROMOSOME]);
        assert_eq!(rows[1].favorable, 2);
        assert_eq!(rows[1].unfavorable, 1);
    }

    #[test]
    fn test_protein_view_rows() {
        let rows = DataProcessor::protein_view(&dataset(), &selection(&["Transporters"], "Liver cancer"));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].gene, "ABCB1");
        assert_eq!(rows[0].prognosis, Prognosis::Both);
        assert_eq!(rows[1].gene, "SLC2A1");
        assert_eq!(rows[1].classes, "Enzymes, Transporters");
        assert_eq!(rows[1].prognosis, Prognosis::Unfavorable);
    }

    #[test]
    fn test_no_cancer_type_selected_yields_empty_views() {
        let selection = Selection::new(vec![], None);
        assert!(DataProcessor::protein_view(&dataset(), &selection).is_empty());
        assert!(DataProcessor::chromosome_view(&dataset(), &selection).is_empty());
    }

    #[test]
    fn test_initial_and_retained_selection() {
        let dataset = dataset();
        let mut selection = Selection::initial(&dataset, &["Enzymes".to_string(), "Secreted".to_string()]);
        assert_eq!(selection.cancer_type.as_deref(), Some("Liver cancer"));

        selection.cancer_type = Some("Melanoma".to_string());
        selection.retain_known(&dataset);
        assert_eq!(selection.protein_classes, vec!["Enzymes"]);
        assert_eq!(selection.cancer_type.as_deref(), Some("Liver cancer"));
    }

    #[test]
    fn test_compare_chromosomes() {
        let mut labels = vec!["X", "10", "Unknown", "2", "MT", "Y", "1"];
        labels.sort_by(|a, b| compare_chromosomes(a, b));
        assert_eq!(labels, vec!["1", "2", "10", "X", "Y", "MT", "Unknown"]);
    }
}
