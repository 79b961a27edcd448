//! Prognostic Summary Module
//! Derives per-protein favorable/unfavorable cancer-type lists from the
//! wide-format pathology columns.

use std::fmt;

/// Marker shared by every pathology prognostics column name.
pub const PROGNOSTICS_MARKER: &str = "Pathology prognostics";

pub const FAVORABLE_COLUMN: &str = "Favorable prognostics";
pub const UNFAVORABLE_COLUMN: &str = "Unfavorable prognostics";

/// Direction of the survival association reported for a cancer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Favorable,
    Unfavorable,
}

impl Polarity {
    pub const ALL: [Polarity; 2] = [Polarity::Favorable, Polarity::Unfavorable];

    /// Token searched for in the pathology cells.
    pub fn token(self) -> &'static str {
        match self {
            Polarity::Favorable => "favorable",
            Polarity::Unfavorable => "unfavorable",
        }
    }

    /// Name of the derived summary column.
    pub fn column_name(self) -> &'static str {
        match self {
            Polarity::Favorable => FAVORABLE_COLUMN,
            Polarity::Unfavorable => UNFAVORABLE_COLUMN,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Extract the cancer type from a pathology prognostics column name.
///
/// The name is split on its first `-` and the second segment is taken
/// (`"Pathology prognostics - Breast cancer"` gives `"Breast cancer"`).
/// If the second segment is the marker itself, the first segment is the
/// cancer type (`"Liver cancer-Pathology prognostics"`).
/// Returns `None` for any column that is not a well-formed prognostics column.
pub fn cancer_type_from_column(column: &str) -> Option<&str> {
    if !column.contains(PROGNOSTICS_MARKER) {
        return None;
    }

    let (head, tail) = column.split_once('-')?;
    let tail = tail.trim();
    let cancer_type = if tail.contains(PROGNOSTICS_MARKER) {
        head.trim()
    } else {
        tail
    };

    if cancer_type.is_empty() {
        None
    } else {
        Some(cancer_type)
    }
}

/// Whether a pathology cell carries the polarity as a whole token.
pub fn cell_has_polarity(cell: &str, polarity: Polarity) -> bool {
    cell.to_lowercase()
        .split_whitespace()
        .any(|token| token == polarity.token())
}

/// Cancer types of one record whose pathology cell carries `polarity`,
/// in column order.
///
/// `cells` yields the `(column name, cell value)` pairs of the record;
/// non-prognostics columns and missing cells are skipped.
pub fn matching_cancer_types<'a, I>(cells: I, polarity: Polarity) -> Vec<&'a str>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    cells
        .into_iter()
        .filter_map(|(column, cell)| {
            let cancer_type = cancer_type_from_column(column)?;
            let cell = cell?;
            cell_has_polarity(cell, polarity).then_some(cancer_type)
        })
        .collect()
}

/// Comma-joined (no spaces) summary of [`matching_cancer_types`].
pub fn summarize_prognostics<'a, I>(cells: I, polarity: Polarity) -> String
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    matching_cancer_types(cells, polarity).join(",")
}

/// Cancer types named by the prognostics columns, in column order, without
/// duplicates.
pub fn cancer_types<'a, I>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut types: Vec<String> = Vec::new();
    for cancer_type in columns.into_iter().filter_map(cancer_type_from_column) {
        if !types.iter().any(|t| t == cancer_type) {
            types.push(cancer_type.to_string());
        }
    }
    types
}
