//! Subtable count and naming.

use statbank_model::{Category, Dataset, Finding, TableDescription};

pub(crate) fn check(dataset: &Dataset, description: &TableDescription) -> Option<Finding> {
    let expected = description.subtables.len();
    if dataset.len() != expected {
        return Some(
            Finding::error(
                Category::SubtableCount,
                format!(
                    "Expected {expected} subtable(s) ({}), got {}",
                    description.subtable_names().join(", "),
                    dataset.len()
                ),
            )
            .with_values(dataset.names().map(str::to_string).collect()),
        );
    }

    let unknown: Vec<String> = dataset
        .names()
        .filter(|name| description.subtable(name).is_none())
        .map(str::to_string)
        .collect();
    if unknown.is_empty() {
        return None;
    }
    Some(
        Finding::error(
            Category::SubtableCount,
            format!(
                "Subtable(s) {} are not part of table {}; expected {}",
                unknown.join(", "),
                description.table_id,
                description.subtable_names().join(", ")
            ),
        )
        .with_values(unknown),
    )
}
