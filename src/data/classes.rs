//! Protein Class Module
//! Picks the representative classes of proteins belonging to several classes.

pub const PROTEIN_CLASS_COLUMN: &str = "Protein class";
pub const PRIORITIZED_CLASS_COLUMN: &str = "Prioritized Protein Class";

/// Classes preferred when a protein carries several, highest priority first.
pub const DEFAULT_CLASS_PRIORITY: [&str; 2] = ["Enzymes", "Transporters"];

pub fn default_class_priority() -> Vec<String> {
    DEFAULT_CLASS_PRIORITY.iter().map(|s| s.to_string()).collect()
}

/// Split a comma-separated class string into trimmed labels.
///
/// An empty string yields a single empty label.
pub fn split_classes(protein_classes: &str) -> Vec<String> {
    protein_classes
        .split(',')
        .map(|label| label.trim().to_string())
        .collect()
}

/// Prioritized classes of one protein.
///
/// Returns the members of `priority_list` present in `protein_classes`, in
/// priority order. Falls back to every class of the protein, in input order,
/// when none of them is prioritized.
pub fn prioritize_protein_class<S: AsRef<str>>(
    protein_classes: &str,
    priority_list: &[S],
) -> Vec<String> {
    let class_list = split_classes(protein_classes);

    let prioritized: Vec<String> = priority_list
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| class_list.iter().any(|c| c == p))
        .map(str::to_string)
        .collect();

    if prioritized.is_empty() {
        class_list
    } else {
        prioritized
    }
}

/// Sorted, de-duplicated class labels offered by the class selector.
pub fn class_options<'a, I>(raw_classes: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut options: Vec<String> = raw_classes
        .into_iter()
        .flat_map(split_classes)
        .filter(|label| !label.is_empty())
        .collect();
    options.sort();
    options.dedup();
    options
}
