use gcapricorn::data::{
    cancer_type_from_column, default_class_priority, load_dataset, prioritize_protein_class,
    DataProcessor, DatasetCache, FileSource, MemorySource, Prognosis, Selection,
};
use std::io::{Cursor, Write};
use std::sync::Arc;
use zip::write::FileOptions;
use zip::ZipWriter;

const HEADER: &str = "Gene\tGene synonym\tUniprot\tChromosome\tProtein class\t\
Pathology prognostics - Breast cancer\tPathology prognostics - Liver cancer\t\
Pathology prognostics - Renal cancer";

const ROWS: [&str; 6] = [
    "CYP3A4\tCYP3A3\tP08684\t7\tEnzymes, Predicted intracellular proteins\tunprognostic (3.1e-1)\tprognostic favorable (8.3e-5)\t",
    "SLC2A1\tGLUT1\tP11166\t1\tTransporters, Enzymes, Cancer-related genes\tprognostic unfavorable (1.1e-4)\tprognostic unfavorable (2.0e-7)\tprognostic unfavorable (4.5e-5)",
    "ABCB1\tMDR1\tP08183\t7\tTransporters, FDA approved drug targets\t\tprognostic favorable (1.9e-4)\tprognostic unfavorable (6.0e-4)",
    "ALB\t\tP02768\t4\tPlasma proteins, Predicted secreted proteins\t\tprognostic favorable (5.5e-6)\t",
    "LINC01\t\t\t2\tPredicted intracellular proteins\tprognostic favorable (1.0e-4)\t\t",
    "MT-CO1\tCOX1\tP00395\tMT\tEnzymes, Predicted membrane proteins\t\t\tprognostic favorable (2.2e-4)",
];

fn table() -> String {
    let mut table = String::from(HEADER);
    table.push('\n');
    for row in ROWS {
        table.push_str(row);
        table.push('\n');
    }
    table
}

fn zipped_table() -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("proteinatlas.tsv", FileOptions::default())
        .unwrap();
    zip.write_all(table().as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

#[test]
fn test_zipped_dataset_from_file() {
    let path = std::env::temp_dir().join("gcapricorn_pipeline_test.tsv.zip");
    std::fs::write(&path, zipped_table()).unwrap();

    let cache = DatasetCache::new(
        Box::new(FileSource::new(&path)),
        default_class_priority(),
    );
    let dataset = cache.get().unwrap();
    let _ = std::fs::remove_file(&path);

    // LINC01 has no Uniprot identifier
    assert_eq!(dataset.len(), 5);
    assert_eq!(dataset.frame().height(), 5);
    assert_eq!(
        dataset.cancer_types(),
        ["Breast cancer", "Liver cancer", "Renal cancer"]
    );

    let slc = dataset.find_by_uniprot("P11166").unwrap();
    assert_eq!(
        slc.unfavorable,
        vec!["Breast cancer", "Liver cancer", "Renal cancer"]
    );
    assert_eq!(slc.prioritized_classes, vec!["Enzymes", "Transporters"]);

    let again = cache.get().unwrap();
    assert!(Arc::ptr_eq(&dataset, &again));
}

#[test]
fn test_summaries_only_name_matching_pathology_columns() {
    let source = MemorySource::new("fixture", table().into_bytes());
    let dataset = load_dataset(&source, &default_class_priority()).unwrap();
    let frame = dataset.frame();
    let column_names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for (polarity, column) in [
        ("favorable", "Favorable prognostics"),
        ("unfavorable", "Unfavorable prognostics"),
    ] {
        let summaries = frame
            .column(column)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .clone();

        for row in 0..frame.height() {
            let summary = summaries.get(row).unwrap_or("");
            for cancer in summary.split(',').filter(|s| !s.is_empty()) {
                let source_column = column_names
                    .iter()
                    .find(|name| cancer_type_from_column(name) == Some(cancer))
                    .expect("summary names an existing pathology column");
                let cell = frame
                    .column(source_column)
                    .unwrap()
                    .as_materialized_series()
                    .str()
                    .unwrap()
                    .get(row)
                    .unwrap();
                assert!(cell.to_lowercase().split_whitespace().any(|t| t == polarity));
            }
        }
    }
}

#[test]
fn test_views_follow_selection() {
    let source = MemorySource::new("fixture", zipped_table());
    let dataset = load_dataset(&source, &default_class_priority()).unwrap();

    let selection = Selection::initial(&dataset, &["Enzymes".to_string()]);
    assert_eq!(selection.cancer_type.as_deref(), Some("Breast cancer"));

    let liver = Selection::new(
        vec!["Enzymes".to_string(), "Transporters".to_string()],
        Some("Liver cancer".to_string()),
    );
    let proteins = DataProcessor::protein_view(&dataset, &liver);
    let genes: Vec<&str> = proteins.iter().map(|p| p.gene.as_str()).collect();
    assert_eq!(genes, vec!["ABCB1", "CYP3A4", "SLC2A1"]);
    assert_eq!(proteins[2].prognosis, Prognosis::Unfavorable);

    let chromosomes = DataProcessor::chromosome_view(&dataset, &liver);
    let labels: Vec<&str> = chromosomes.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "7"]);
    assert_eq!(chromosomes[1].favorable, 2);

    let renal = Selection::new(vec![], Some("Renal cancer".to_string()));
    let classes = DataProcessor::cancer_view(&dataset, &renal);
    let enzymes = classes.iter().find(|c| c.label == "Enzymes").unwrap();
    assert_eq!((enzymes.favorable, enzymes.unfavorable), (1, 1));
}

#[test]
fn test_prioritizer_examples() {
    let priority = ["Enzymes", "Transporters"];
    assert_eq!(
        prioritize_protein_class(
            "Transporters, Enzymes, Predicted intracellular proteins",
            &priority
        ),
        vec!["Enzymes", "Transporters"]
    );
    assert_eq!(
        prioritize_protein_class("Predicted intracellular proteins", &priority),
        vec!["Predicted intracellular proteins"]
    );
}
