//! Protein Dataset Module
//! The derived protein atlas table plus a typed projection of its rows.

use crate::data::prognostics::Polarity;
use polars::prelude::*;

pub const GENE_COLUMN: &str = "Gene";
pub const UNIPROT_COLUMN: &str = "Uniprot";
pub const CHROMOSOME_COLUMN: &str = "Chromosome";

/// Prognosis of one protein for one cancer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prognosis {
    Favorable,
    Unfavorable,
    Both,
}

impl Prognosis {
    pub fn label(self) -> &'static str {
        match self {
            Prognosis::Favorable => "Favorable",
            Prognosis::Unfavorable => "Unfavorable",
            Prognosis::Both => "Both",
        }
    }

    pub fn includes(self, polarity: Polarity) -> bool {
        matches!(
            (self, polarity),
            (Prognosis::Both, _)
                | (Prognosis::Favorable, Polarity::Favorable)
                | (Prognosis::Unfavorable, Polarity::Unfavorable)
        )
    }
}

/// One derived row of the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProteinEntry {
    pub gene: String,
    pub uniprot: String,
    pub chromosome: Option<String>,
    pub prioritized_classes: Vec<String>,
    pub favorable: Vec<String>,
    pub unfavorable: Vec<String>,
}

impl ProteinEntry {
    pub fn cancer_types(&self, polarity: Polarity) -> &[String] {
        match polarity {
            Polarity::Favorable => &self.favorable,
            Polarity::Unfavorable => &self.unfavorable,
        }
    }

    pub fn prognosis(&self, cancer_type: &str) -> Option<Prognosis> {
        let favorable = self.favorable.iter().any(|c| c == cancer_type);
        let unfavorable = self.unfavorable.iter().any(|c| c == cancer_type);
        match (favorable, unfavorable) {
            (true, true) => Some(Prognosis::Both),
            (true, false) => Some(Prognosis::Favorable),
            (false, true) => Some(Prognosis::Unfavorable),
            (false, false) => None,
        }
    }

    pub fn has_prioritized_class(&self, class: &str) -> bool {
        self.prioritized_classes.iter().any(|c| c == class)
    }
}

/// Fully derived dataset, immutable once built.
#[derive(Debug, Clone)]
pub struct ProteinDataset {
    frame: DataFrame,
    entries: Vec<ProteinEntry>,
    cancer_types: Vec<String>,
    class_options: Vec<String>,
}

impl ProteinDataset {
    pub fn new(
        frame: DataFrame,
        entries: Vec<ProteinEntry>,
        cancer_types: Vec<String>,
        class_options: Vec<String>,
    ) -> Self {
        Self {
            frame,
            entries,
            cancer_types,
            class_options,
        }
    }

    /// Original columns plus the derived prognostics and class columns.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn entries(&self) -> &[ProteinEntry] {
        &self.entries
    }

    /// Cancer types in source column order.
    pub fn cancer_types(&self) -> &[String] {
        &self.cancer_types
    }

    /// Every class label found in the `Protein class` column, sorted.
    pub fn class_options(&self) -> &[String] {
        &self.class_options
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_by_uniprot(&self, uniprot: &str) -> Option<&ProteinEntry> {
        self.entries.iter().find(|e| e.uniprot == uniprot)
    }
}
