//! Time columns against their declared pattern.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use statbank_model::{Category, Finding, Subtable};

use super::{MAX_INVALID_VALUES, column_label};
use crate::column_reader::ColumnReader;

pub(crate) fn check(subtable: &Subtable, frame: &DataFrame) -> Vec<Finding> {
    let reader = ColumnReader::new(frame);
    let mut findings = Vec::new();

    for (variable, format) in subtable.time_variables() {
        let values = reader.distinct_values(variable.column_number);
        let invalid: Vec<(String, String)> = values
            .iter()
            .filter_map(|value| {
                format
                    .check(value)
                    .err()
                    .map(|reason| (value.clone(), reason.to_string()))
            })
            .collect();
        if invalid.is_empty() {
            continue;
        }

        let shown: Vec<String> = invalid
            .iter()
            .take(MAX_INVALID_VALUES)
            .map(|(value, reason)| format!("\"{value}\" ({reason})"))
            .collect();
        let mut message = format!(
            "{} value(s) in {} do not match time format {format}: {}",
            invalid.len(),
            column_label(subtable, variable.column_number),
            shown.join(", ")
        );
        if invalid.len() > shown.len() {
            message.push_str(&format!(", and {} more", invalid.len() - shown.len()));
        }
        let lengths: BTreeSet<usize> = values.iter().map(|v| v.chars().count()).collect();
        if lengths.len() > 1 {
            let lengths: Vec<String> = lengths.iter().map(usize::to_string).collect();
            message.push_str(&format!(
                "; the column mixes value lengths {}",
                lengths.join(", ")
            ));
        }

        findings.push(
            Finding::error(Category::TimeFormat, message)
                .in_subtable(&subtable.file_name)
                .on_column(&variable.name)
                .with_values(
                    invalid
                        .into_iter()
                        .take(MAX_INVALID_VALUES)
                        .map(|(value, _)| value)
                        .collect(),
                ),
        );
    }

    findings
}
