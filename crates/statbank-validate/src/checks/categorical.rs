//! Categorical codes against codelists.
//!
//! Every distinct value outside the codelist is an error, empty cells
//! included. Codes of the codelist that never occur are reported as info,
//! since leaving out a category is often intentional.

use polars::prelude::DataFrame;
use statbank_model::{Category, Finding, Subtable, TableDescription};

use super::{column_label, quote_values};
use crate::column_reader::ColumnReader;

pub(crate) fn check(
    subtable: &Subtable,
    frame: &DataFrame,
    description: &TableDescription,
) -> Vec<Finding> {
    let reader = ColumnReader::new(frame);
    let mut findings = Vec::new();

    for variable in &subtable.variables.categorical {
        let Some(codelist) = variable
            .codelist_id
            .as_deref()
            .and_then(|id| description.codelist(id))
        else {
            continue;
        };

        let present = reader.distinct_values(variable.column_number);
        let label = column_label(subtable, variable.column_number);

        let outside: Vec<String> = present
            .iter()
            .filter(|value| !codelist.contains(value))
            .cloned()
            .collect();
        if !outside.is_empty() {
            let mut message = format!(
                "{} code(s) in {label} are not in codelist {}: {}",
                outside.len(),
                codelist.id,
                quote_values(&outside, outside.len())
            );
            if outside.iter().any(|v| v.contains(char::is_whitespace)) {
                message.push_str(" (some codes contain spaces)");
            }
            findings.push(
                Finding::error(Category::CategoricalCode, message)
                    .in_subtable(&subtable.file_name)
                    .on_column(&variable.name)
                    .with_values(outside),
            );
        }

        let unused = codelist.unused_codes(&present);
        if !unused.is_empty() {
            findings.push(
                Finding::info(
                    Category::CategoricalCode,
                    format!(
                        "{} code(s) of codelist {} do not occur in {label}",
                        unused.len(),
                        codelist.id
                    ),
                )
                .in_subtable(&subtable.file_name)
                .on_column(&variable.name)
                .with_values(unused),
            );
        }
    }

    findings
}
