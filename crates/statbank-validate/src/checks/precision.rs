//! Decimal precision of statistic columns. Warnings only: rounding fixes it.

use polars::prelude::DataFrame;
use statbank_common::fraction_digits;
use statbank_model::{Category, Finding, Subtable};

use super::{MAX_INVALID_VALUES, column_label, quote_values};
use crate::column_reader::ColumnReader;

pub(crate) fn check(subtable: &Subtable, frame: &DataFrame) -> Vec<Finding> {
    let reader = ColumnReader::new(frame);
    let mut findings = Vec::new();

    for statistic in &subtable.variables.statistics {
        let decimals = statistic.stored_decimals as usize;
        let (count, values) = reader.collect_matching(
            statistic.column_number,
            |v| fraction_digits(v).is_some_and(|digits| digits > decimals),
            MAX_INVALID_VALUES,
        );
        if count == 0 {
            continue;
        }
        findings.push(
            Finding::warning(
                Category::NumericPrecision,
                format!(
                    "{count} value(s) in {} have more than {decimals} decimal(s): {}; round the data before transfer",
                    column_label(subtable, statistic.column_number),
                    quote_values(&values, count)
                ),
            )
            .in_subtable(&subtable.file_name)
            .on_column(&statistic.text)
            .with_values(values),
        );
    }

    findings
}
