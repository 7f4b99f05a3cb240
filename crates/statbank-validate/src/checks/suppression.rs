//! Suppression markers.
//!
//! A suppression column may be empty or hold one of the valid marker codes.
//! When the statistic it covers is empty, the marker is required.

use polars::prelude::DataFrame;
use statbank_common::is_blank;
use statbank_model::{Category, Finding, Subtable};

use super::{MAX_INVALID_VALUES, column_label, quote_values};
use crate::column_reader::ColumnReader;

pub(crate) fn check(subtable: &Subtable, frame: &DataFrame) -> Vec<Finding> {
    let reader = ColumnReader::new(frame);
    let mut findings = Vec::new();

    for column in &subtable.variables.suppression {
        let label = column_label(subtable, column.column_number);

        let (count, invalid) = reader.collect_matching(
            column.column_number,
            |v| !v.is_empty() && !column.codes.contains(v),
            usize::MAX,
        );
        if count > 0 {
            let allowed: Vec<&str> = column.codes.iter().map(String::as_str).collect();
            findings.push(
                Finding::error(
                    Category::SuppressionCode,
                    format!(
                        "{count} marker(s) in {label} are not valid suppression codes ({}): {}",
                        allowed.join(", "),
                        quote_values(&invalid, count)
                    ),
                )
                .in_subtable(&subtable.file_name)
                .on_column(&column.text)
                .with_values(invalid),
            );
        }

        let missing: Vec<usize> = (0..reader.height())
            .filter(|&row| {
                is_blank(&reader.get_string(column.applies_to, row))
                    && is_blank(&reader.get_string(column.column_number, row))
            })
            .collect();
        if !missing.is_empty() {
            let rows: Vec<String> = missing
                .iter()
                .take(MAX_INVALID_VALUES)
                .map(|row| (row + 1).to_string())
                .collect();
            findings.push(
                Finding::error(
                    Category::SuppressionCode,
                    format!(
                        "{} row(s) have no value in {} and no marker in {label} (rows {}{})",
                        missing.len(),
                        column_label(subtable, column.applies_to),
                        rows.join(", "),
                        if missing.len() > rows.len() { ", ..." } else { "" }
                    ),
                )
                .in_subtable(&subtable.file_name)
                .on_column(&column.text),
            );
        }
    }

    findings
}
