//! Data module - dataset loading, derivation and view queries

mod cache;
mod classes;
mod dataset;
mod loader;
mod processor;
mod prognostics;
mod source;

pub use cache::DatasetCache;
pub use classes::{
    class_options, default_class_priority, prioritize_protein_class, split_classes,
    DEFAULT_CLASS_PRIORITY, PRIORITIZED_CLASS_COLUMN, PROTEIN_CLASS_COLUMN,
};
pub use dataset::{
    Prognosis, ProteinDataset, ProteinEntry, CHROMOSOME_COLUMN, GENE_COLUMN, UNIPROT_COLUMN,
};
pub use loader::{derive_dataset, load_dataset, parse_table, unpack_archive, LoaderError};
pub use processor::{
    compare_chromosomes, DataProcessor, PrognosticCount, ProteinRow, Selection,
    UNKNOWN_CHROMOSOME,
};
pub use prognostics::{
    cancer_type_from_column, cancer_types, summarize_prognostics, Polarity,
    FAVORABLE_COLUMN, PROGNOSTICS_MARKER, UNFAVORABLE_COLUMN,
};
pub use source::{DataSource, FileSource, MemorySource, RemoteSource, HPA_DATASET_URL};
