//! Column count per subtable.

use polars::prelude::DataFrame;
use statbank_model::{Category, Finding, Subtable};

pub(crate) fn check(subtable: &Subtable, frame: &DataFrame) -> Option<Finding> {
    let expected = subtable.expected_column_count;
    let found = frame.width();
    if found == expected {
        return None;
    }
    Some(
        Finding::error(
            Category::ColumnCount,
            format!("Expected {expected} columns, got {found}"),
        )
        .in_subtable(&subtable.file_name),
    )
}
