//! Check runner. Categories run in a fixed order; see the crate docs.

mod categorical;
mod columns;
mod precision;
mod subtables;
mod suppression;
mod time_format;

use polars::prelude::DataFrame;
use statbank_model::{
    Category, Dataset, Finding, Severity, Subtable, TableDescription, ValidationReport,
};

/// Offending values quoted in a finding message.
pub(crate) const MAX_INVALID_VALUES: usize = 5;

pub(crate) fn run_all(dataset: &Dataset, description: &TableDescription) -> ValidationReport {
    let span = tracing::info_span!("validate", table_id = %description.table_id);
    let _guard = span.enter();

    let mut report = ValidationReport::new(&description.table_id);

    // 1. Subtable count. Nothing else can be checked without a pairing.
    if let Some(finding) = subtables::check(dataset, description) {
        record(&mut report, Category::SubtableCount, vec![finding]);
        return report;
    }
    record(&mut report, Category::SubtableCount, Vec::new());

    // 2. Column count. Mismatched subtables are skipped from here on.
    let mut checkable: Vec<(&Subtable, &DataFrame)> = Vec::new();
    let mut column_findings = Vec::new();
    for subtable in &description.subtables {
        let Some(frame) = dataset.get(&subtable.file_name) else {
            continue;
        };
        match columns::check(subtable, frame) {
            Some(finding) => column_findings.push(finding),
            None => checkable.push((subtable, frame)),
        }
    }
    record(&mut report, Category::ColumnCount, column_findings);

    // 3. Categorical codes
    let findings = checkable
        .iter()
        .flat_map(|(subtable, frame)| categorical::check(subtable, frame, description))
        .collect();
    record(&mut report, Category::CategoricalCode, findings);

    // 4. Suppression codes
    let findings = checkable
        .iter()
        .flat_map(|(subtable, frame)| suppression::check(subtable, frame))
        .collect();
    record(&mut report, Category::SuppressionCode, findings);

    // 5. Time format
    let findings = checkable
        .iter()
        .flat_map(|(subtable, frame)| time_format::check(subtable, frame))
        .collect();
    record(&mut report, Category::TimeFormat, findings);

    // 6. Numeric precision (warnings only)
    let findings = checkable
        .iter()
        .flat_map(|(subtable, frame)| precision::check(subtable, frame))
        .collect();
    record(&mut report, Category::NumericPrecision, findings);

    tracing::info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validation finished"
    );
    report
}

fn record(report: &mut ValidationReport, category: Category, findings: Vec<Finding>) {
    if findings.is_empty() {
        tracing::debug!(category = %category, "check passed");
    }
    for finding in findings {
        if finding.severity == Severity::Error {
            tracing::warn!(
                category = %category,
                subtable = finding.subtable.as_deref().unwrap_or("-"),
                "{}",
                finding.message
            );
        }
        report.add(finding);
    }
}

/// `column 3 (Antall)`
pub(crate) fn column_label(subtable: &Subtable, number: usize) -> String {
    match subtable.variables.column_name(number) {
        Some(name) => format!("column {number} ({name})"),
        None => format!("column {number}"),
    }
}

/// Quotes up to [`MAX_INVALID_VALUES`] values for a message, noting the rest.
pub(crate) fn quote_values(values: &[String], total: usize) -> String {
    let mut quoted: Vec<String> = values
        .iter()
        .take(MAX_INVALID_VALUES)
        .map(|v| format!("\"{v}\""))
        .collect();
    if total > quoted.len() {
        quoted.push(format!("and {} more", total - quoted.len()));
    }
    quoted.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_values_notes_remainder() {
        let values: Vec<String> = (1..=7).map(|n| n.to_string()).collect();
        assert_eq!(
            quote_values(&values, 7),
            "\"1\", \"2\", \"3\", \"4\", \"5\", and 2 more"
        );
        assert_eq!(quote_values(&values[..2], 2), "\"1\", \"2\"");
    }
}
