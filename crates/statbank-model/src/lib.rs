pub mod codelist;
pub mod dataset;
pub mod description;
pub mod error;
pub mod report;
pub mod time_format;

pub use codelist::{Codelist, SuppressionMarker};
pub use dataset::Dataset;
pub use description::{
    CategoricalVariable, DecimalSpec, StatisticVariable, Subtable, SuppressionColumn,
    TableDescription, VariableGroup,
};
pub use error::{ModelError, Result};
pub use report::{Category, Finding, Severity, ValidationReport};
pub use time_format::{TimeFormat, TimeToken};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_report_counts() {
        let mut report = ValidationReport::new("10000");
        report.add(
            Finding::error(Category::CategoricalCode, "Codes outside codelist")
                .in_subtable("delfil1.dat")
                .on_column("Region"),
        );
        report.add(Finding::warning(
            Category::NumericPrecision,
            "Too many decimals",
        ));
        report.add(Finding::info(Category::CategoricalCode, "Codes not used"));
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.info_count(), 1);
        assert!(report.has_errors());
        assert!(!report.is_passable());
    }

    #[test]
    fn report_serializes() {
        let mut report = ValidationReport::new("10000");
        report.add(
            Finding::error(Category::TimeFormat, "Bad time value")
                .in_subtable("delfil1.dat")
                .with_values(vec!["22".to_string()]),
        );
        let json = serde_json::to_string(&report).expect("serialize report");
        assert!(json.contains("\"time-format\""));
        assert!(json.contains("\"error\""));
        let round: ValidationReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round.findings.len(), 1);
        assert_eq!(round.findings[0].values, vec!["22".to_string()]);
    }
}
