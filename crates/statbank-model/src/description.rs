//! Parsed table description.
//!
//! A [`TableDescription`] is the typed form of the extraction description
//! the statbank publishes for a table. It lists the subtables (one file each)
//! in their canonical order, the columns of every subtable by 1-based
//! position, the codelists categorical columns draw from and the markers
//! allowed in suppression columns.
//!
//! Descriptions are built once and never mutated. Use
//! [`TableDescription::check_consistency`] after constructing one by hand.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::codelist::{Codelist, SuppressionMarker};
use crate::error::{ModelError, Result};
use crate::time_format::TimeFormat;

/// A classification column (region, time, sex, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalVariable {
    /// 1-based column position within the subtable.
    pub column_number: usize,
    pub name: String,
    pub text: String,
    /// Codelist the column's values must come from. Time columns have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codelist_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_format: Option<TimeFormat>,
}

/// A measured value column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticVariable {
    pub column_number: usize,
    pub text: String,
    pub unit: String,
    /// Decimals the statbank stores. This is the decimal spec for the column.
    pub stored_decimals: u32,
    pub shown_decimals: u32,
}

/// A column of suppression markers for one statistic column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuppressionColumn {
    pub column_number: usize,
    /// Column number of the statistic this marker applies to.
    pub applies_to: usize,
    pub text: String,
    /// Valid marker codes for this column.
    pub codes: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableGroup {
    pub categorical: Vec<CategoricalVariable>,
    pub statistics: Vec<StatisticVariable>,
    #[serde(default)]
    pub suppression: Vec<SuppressionColumn>,
}

impl VariableGroup {
    /// Number of columns declared across all three groups.
    pub fn column_count(&self) -> usize {
        self.categorical.len() + self.statistics.len() + self.suppression.len()
    }

    /// All declared column numbers, in declaration order.
    pub fn column_numbers(&self) -> Vec<usize> {
        self.categorical
            .iter()
            .map(|v| v.column_number)
            .chain(self.statistics.iter().map(|v| v.column_number))
            .chain(self.suppression.iter().map(|v| v.column_number))
            .collect()
    }

    /// Display name of a column, by 1-based position.
    pub fn column_name(&self, column_number: usize) -> Option<&str> {
        if let Some(v) = self
            .categorical
            .iter()
            .find(|v| v.column_number == column_number)
        {
            return Some(&v.name);
        }
        if let Some(v) = self.statistic(column_number) {
            return Some(&v.text);
        }
        self.suppression
            .iter()
            .find(|v| v.column_number == column_number)
            .map(|v| v.text.as_str())
    }

    pub fn statistic(&self, column_number: usize) -> Option<&StatisticVariable> {
        self.statistics
            .iter()
            .find(|v| v.column_number == column_number)
    }

    /// Suppression column covering the given statistic column, if any.
    pub fn suppression_for(&self, statistic_column: usize) -> Option<&SuppressionColumn> {
        self.suppression
            .iter()
            .find(|v| v.applies_to == statistic_column)
    }
}

/// One file of a table submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtable {
    pub file_name: String,
    pub title: String,
    pub expected_column_count: usize,
    pub variables: VariableGroup,
    /// Sample row as published in the description, e.g. `01;2022;100`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_line: Option<String>,
}

impl Subtable {
    pub fn decimals_for(&self, column_number: usize) -> Option<u32> {
        self.variables
            .statistic(column_number)
            .map(|v| v.stored_decimals)
    }

    /// Categorical columns that carry a time format.
    pub fn time_variables(&self) -> impl Iterator<Item = (&CategoricalVariable, &TimeFormat)> {
        self.variables
            .categorical
            .iter()
            .filter_map(|v| v.time_format.as_ref().map(|f| (v, f)))
    }
}

/// Required decimal count for one statistic column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalSpec {
    pub subtable: String,
    pub column_number: usize,
    pub column: String,
    pub decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescription {
    pub table_id: String,
    pub table_name: String,
    pub retrieved_at: NaiveDateTime,
    /// Subtables in canonical order.
    pub subtables: Vec<Subtable>,
    pub codelists: BTreeMap<String, Codelist>,
    #[serde(default)]
    pub suppression_markers: Vec<SuppressionMarker>,
    /// Load user the description was fetched for. Never persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_user: Option<String>,
}

impl TableDescription {
    pub fn subtable(&self, file_name: &str) -> Option<&Subtable> {
        self.subtables.iter().find(|s| s.file_name == file_name)
    }

    pub fn subtable_names(&self) -> Vec<&str> {
        self.subtables.iter().map(|s| s.file_name.as_str()).collect()
    }

    pub fn codelist(&self, id: &str) -> Option<&Codelist> {
        self.codelists.get(id)
    }

    /// Decimal spec of every statistic column, in subtable order.
    pub fn decimal_specs(&self) -> Vec<DecimalSpec> {
        self.subtables
            .iter()
            .flat_map(|subtable| {
                subtable.variables.statistics.iter().map(|v| DecimalSpec {
                    subtable: subtable.file_name.clone(),
                    column_number: v.column_number,
                    column: v.text.clone(),
                    decimals: v.stored_decimals,
                })
            })
            .collect()
    }

    /// Codelist id -> aggregate ("total") code, for codelists that have one.
    pub fn total_codes(&self) -> BTreeMap<String, String> {
        self.codelists
            .values()
            .filter_map(|c| c.total_code.clone().map(|code| (c.id.clone(), code)))
            .collect()
    }

    /// Number of rows a fully crossed subtable would have: the product of
    /// the sizes of its codelists. Time columns are not counted.
    pub fn expanded_cell_count(&self, file_name: &str) -> Option<u64> {
        let subtable = self.subtable(file_name)?;
        let count: u64 = subtable
            .variables
            .categorical
            .iter()
            .filter_map(|v| v.codelist_id.as_deref())
            .filter_map(|id| self.codelist(id))
            .map(|c| c.len() as u64)
            .product();
        Some(count)
    }

    /// A description goes stale once the calendar year changes.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        today.year() != self.retrieved_at.year()
    }

    /// Copy of this description with credential material removed.
    pub fn scrubbed(&self) -> Self {
        Self {
            load_user: None,
            ..self.clone()
        }
    }

    /// Checks the cross-field invariants every description must hold.
    pub fn check_consistency(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for subtable in &self.subtables {
            if !seen.insert(subtable.file_name.as_str()) {
                return Err(inconsistent(format!(
                    "subtable {} is declared twice",
                    subtable.file_name
                )));
            }
            check_subtable(subtable, &self.codelists)?;
        }
        Ok(())
    }
}

fn check_subtable(subtable: &Subtable, codelists: &BTreeMap<String, Codelist>) -> Result<()> {
    let name = &subtable.file_name;
    let vars = &subtable.variables;
    if vars.column_count() != subtable.expected_column_count {
        return Err(inconsistent(format!(
            "{name} declares {} columns but expects {}",
            vars.column_count(),
            subtable.expected_column_count
        )));
    }

    let mut numbers = vars.column_numbers();
    numbers.sort_unstable();
    let expected: Vec<usize> = (1..=subtable.expected_column_count).collect();
    if numbers != expected {
        return Err(inconsistent(format!(
            "{name} column numbers {numbers:?} are not 1..={}",
            subtable.expected_column_count
        )));
    }

    for variable in &vars.categorical {
        if let Some(id) = &variable.codelist_id
            && !codelists.contains_key(id)
        {
            return Err(inconsistent(format!(
                "{name} column {} references missing codelist {id}",
                variable.column_number
            )));
        }
    }

    for column in &vars.suppression {
        if vars.statistic(column.applies_to).is_none() {
            return Err(inconsistent(format!(
                "{name} suppression column {} points at column {}, which is not a statistic",
                column.column_number, column.applies_to
            )));
        }
    }
    Ok(())
}

fn inconsistent(message: String) -> ModelError {
    ModelError::Inconsistent(message)
}
