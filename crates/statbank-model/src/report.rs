use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Validation category. Checks run in the order listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SubtableCount,
    ColumnCount,
    CategoricalCode,
    SuppressionCode,
    TimeFormat,
    NumericPrecision,
}

impl Category {
    pub const fn all() -> &'static [Self] {
        &[
            Self::SubtableCount,
            Self::ColumnCount,
            Self::CategoricalCode,
            Self::SuppressionCode,
            Self::TimeFormat,
            Self::NumericPrecision,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SubtableCount => "subtable-count",
            Self::ColumnCount => "column-count",
            Self::CategoricalCode => "categorical-code",
            Self::SuppressionCode => "suppression-code",
            Self::TimeFormat => "time-format",
            Self::NumericPrecision => "numeric-precision",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::SubtableCount => "Number of subtables supplied",
            Self::ColumnCount => "Number of columns per subtable",
            Self::CategoricalCode => "Categorical values against codelists",
            Self::SuppressionCode => "Suppression markers against valid codes",
            Self::TimeFormat => "Time values against the time format",
            Self::NumericPrecision => "Decimals against the declared precision",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: Category,
    /// Subtable file name. Absent for table-level findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub message: String,
    /// Offending (or unused) values, deduplicated and sorted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl Finding {
    pub fn new(severity: Severity, category: Category, message: impl Into<String>) -> Self {
        Self {
            severity,
            category,
            subtable: None,
            column: None,
            message: message.into(),
            values: Vec::new(),
        }
    }

    pub fn error(category: Category, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, category, message)
    }

    pub fn warning(category: Category, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, message)
    }

    pub fn info(category: Category, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, category, message)
    }

    pub fn in_subtable(mut self, subtable: impl Into<String>) -> Self {
        self.subtable = Some(subtable.into());
        self
    }

    pub fn on_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }
}

/// Validation result for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub table_id: String,
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            findings: Vec::new(),
        }
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// No error findings. Warnings and info never block a transfer.
    pub fn is_passable(&self) -> bool {
        !self.has_errors()
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.category == category)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }
}
