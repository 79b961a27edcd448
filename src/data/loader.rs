//! Dataset Loader Module
//! Fetches the protein atlas table, parses it with Polars and derives the
//! prognostics and prioritized class columns.

use crate::data::classes::{
    class_options, prioritize_protein_class, PRIORITIZED_CLASS_COLUMN, PROTEIN_CLASS_COLUMN,
};
use crate::data::dataset::{
    ProteinDataset, ProteinEntry, CHROMOSOME_COLUMN, GENE_COLUMN, UNIPROT_COLUMN,
};
use crate::data::prognostics::{
    cancer_type_from_column, cancer_types, matching_cancer_types, summarize_prognostics, Polarity,
};
use crate::data::source::DataSource;
use polars::prelude::*;
use rayon::prelude::*;
use std::io::{Cursor, Read};
use thiserror::Error;
use tracing::{debug, info};
use ::zip::ZipArchive;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to download dataset: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Dataset download from {url} failed with HTTP status {status}")]
    HttpStatus { status: u16, url: String },
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to unpack dataset archive: {0}")]
    Archive(#[from] ::zip::result::ZipError),
    #[error("Dataset archive contains no files")]
    EmptyArchive,
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] PolarsError),
    #[error("Dataset has no '{0}' column")]
    MissingColumn(String),
}

/// Fetch, parse and derive the full dataset from `source`.
pub fn load_dataset(
    source: &dyn DataSource,
    priority_list: &[String],
) -> Result<ProteinDataset, LoaderError> {
    let bytes = source.fetch()?;
    let table = unpack_archive(bytes)?;
    let df = parse_table(table)?;
    info!(
        rows = df.height(),
        columns = df.width(),
        source = %source.describe(),
        "parsed dataset"
    );
    derive_dataset(df, priority_list)
}

/// Extract the table from a zip archive. Bytes that are not a zip archive
/// are returned unchanged.
///
/// The first `.tsv` entry is preferred, then the first file entry.
pub fn unpack_archive(bytes: Vec<u8>) -> Result<Vec<u8>, LoaderError> {
    if !bytes.starts_with(ZIP_MAGIC) {
        return Ok(bytes);
    }

    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let index = (0..archive.len())
        .find(|&i| {
            archive
                .by_index(i)
                .map(|f| !f.is_dir() && f.name().ends_with(".tsv"))
                .unwrap_or(false)
        })
        .or_else(|| {
            (0..archive.len()).find(|&i| archive.by_index(i).map(|f| !f.is_dir()).unwrap_or(false))
        })
        .ok_or(LoaderError::EmptyArchive)?;

    let mut entry = archive.by_index(index)?;
    debug!(entry = entry.name(), size = entry.size(), "unpacking archive entry");
    let mut table = Vec::new();
    entry.read_to_end(&mut table)?;
    Ok(table)
}

/// Parse tab-separated bytes with a header row. Every column is read as a
/// string so that identifiers and tokens are kept verbatim.
pub fn parse_table(bytes: Vec<u8>) -> Result<DataFrame, LoaderError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_separator(b'\t'))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;
    Ok(df)
}

fn string_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, LoaderError> {
    let column = df
        .column(name)
        .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
    Ok(column.as_materialized_series().str()?)
}

fn optional_string_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a StringChunked> {
    df.column(name)
        .ok()
        .and_then(|c| c.as_materialized_series().str().ok())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Drop rows without identifier, then add `Favorable prognostics`,
/// `Unfavorable prognostics` and `Prioritized Protein Class`.
pub fn derive_dataset(
    df: DataFrame,
    priority_list: &[String],
) -> Result<ProteinDataset, LoaderError> {
    string_column(&df, PROTEIN_CLASS_COLUMN)?;
    let uniprot = string_column(&df, UNIPROT_COLUMN)?;

    let mask: BooleanChunked = uniprot
        .into_iter()
        .map(|v| non_blank(v).is_some())
        .collect();
    let before = df.height();
    let mut df = df.filter(&mask)?;
    if df.height() < before {
        debug!(dropped = before - df.height(), "dropped rows without Uniprot");
    }

    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut prognostic_columns: Vec<(&str, &StringChunked)> = Vec::new();
    for name in column_names.iter().filter(|n| cancer_type_from_column(n).is_some()) {
        prognostic_columns.push((name.as_str(), string_column(&df, name)?));
    }

    let uniprot = string_column(&df, UNIPROT_COLUMN)?;
    let classes = string_column(&df, PROTEIN_CLASS_COLUMN)?;
    let genes = optional_string_column(&df, GENE_COLUMN);
    let chromosomes = optional_string_column(&df, CHROMOSOME_COLUMN);

    let rows: Vec<(ProteinEntry, [String; 2])> = (0..df.height())
        .into_par_iter()
        .map(|i| {
            let cells = || prognostic_columns.iter().map(|(name, ca)| (*name, ca.get(i)));
            let raw_classes = classes.get(i).unwrap_or("");

            let entry = ProteinEntry {
                gene: genes.and_then(|g| g.get(i)).unwrap_or("").to_string(),
                uniprot: uniprot.get(i).unwrap_or("").trim().to_string(),
                chromosome: chromosomes
                    .and_then(|c| non_blank(c.get(i)))
                    .map(|c| c.trim().to_string()),
                prioritized_classes: prioritize_protein_class(raw_classes, priority_list),
                favorable: to_owned(matching_cancer_types(cells(), Polarity::Favorable)),
                unfavorable: to_owned(matching_cancer_types(cells(), Polarity::Unfavorable)),
            };
            let summaries = Polarity::ALL.map(|polarity| summarize_prognostics(cells(), polarity));
            (entry, summaries)
        })
        .collect();

    let options = class_options(classes.into_iter().flatten());
    let types = cancer_types(column_names.iter().map(String::as_str));

    let (entries, summaries): (Vec<ProteinEntry>, Vec<[String; 2]>) = rows.into_iter().unzip();
    for (slot, polarity) in Polarity::ALL.into_iter().enumerate() {
        let column: Vec<&str> = summaries.iter().map(|s| s[slot].as_str()).collect();
        df.with_column(Column::new(polarity.column_name().into(), column))?;
    }

    let prioritized: Vec<Series> = entries
        .iter()
        .map(|e| Series::new("".into(), &e.prioritized_classes))
        .collect();
    df.with_column(Series::new(PRIORITIZED_CLASS_COLUMN.into(), prioritized))?;

    info!(
        proteins = entries.len(),
        cancer_types = types.len(),
        classes = options.len(),
        "derived dataset"
    );

    Ok(ProteinDataset::new(df, entries, types, options))
}

fn to_owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}
