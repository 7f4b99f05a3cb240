//! Raw extraction description -> [`TableDescription`].

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDateTime;
use statbank_model::{
    CategoricalVariable, Codelist, StatisticVariable, Subtable, SuppressionColumn,
    SuppressionMarker, TableDescription, TimeFormat, VariableGroup,
};

use crate::error::{Result, SchemaError};
use crate::raw::{RawCodelist, RawSchema, RawSubtable};

/// Timestamp layout of `Uttaksbeskrivelse_lagd`, e.g. `29.09.2022 klokka 18:51`.
const CREATED_FORMAT: &str = "%d.%m.%Y klokka %H:%M";

/// Codelist id meaning "no codelist".
const NO_CODELIST: &str = "-";

/// Parses the JSON text of an extraction description.
///
/// Tab characters are stripped first; the statbank emits them inside string
/// values where JSON does not allow them.
pub fn parse_schema(text: &str) -> Result<TableDescription> {
    let cleaned = text.replace('\t', "");
    let raw: RawSchema = serde_json::from_str(&cleaned)?;
    parse_raw(raw)
}

/// Builds a description from an already deserialized schema.
pub fn parse_raw(raw: RawSchema) -> Result<TableDescription> {
    let retrieved_at = NaiveDateTime::parse_from_str(raw.created.trim(), CREATED_FORMAT)
        .map_err(|e| {
            SchemaError::malformed(format!(
                "unreadable retrieval time '{}': {e}",
                raw.created
            ))
        })?;

    if raw.subtable_titles.is_empty() {
        return Err(SchemaError::malformed("no subtables declared"));
    }
    if raw.subtable_titles.len() != raw.subtables.len() {
        return Err(SchemaError::malformed(format!(
            "{} subtable titles but {} subtable definitions",
            raw.subtable_titles.len(),
            raw.subtables.len()
        )));
    }

    let codelists = merge_codelists(raw.codelists.iter().chain(&raw.ir_codelists));
    let suppression_markers: Vec<SuppressionMarker> = raw
        .suppression_codes
        .iter()
        .map(|c| SuppressionMarker {
            code: c.code.clone(),
            shown_as: c.shown_as.clone(),
            description: c.description.clone(),
        })
        .collect();
    let marker_codes: BTreeSet<String> =
        suppression_markers.iter().map(|m| m.code.clone()).collect();

    let mut subtables = Vec::with_capacity(raw.subtable_titles.len());
    for title in &raw.subtable_titles {
        let definition = raw
            .subtables
            .iter()
            .find(|s| s.name == title.file_name)
            .ok_or_else(|| {
                SchemaError::malformed(format!(
                    "subtable {} has a title but no definition",
                    title.file_name
                ))
            })?;
        let variables = build_variables(definition, &marker_codes)?;
        let expected_column_count = variables.column_numbers().into_iter().max().unwrap_or(0);
        subtables.push(Subtable {
            file_name: title.file_name.clone(),
            title: title.text.clone(),
            expected_column_count,
            variables,
            example_line: definition.example_line.clone(),
        });
    }

    let description = TableDescription {
        table_id: raw.table_id.trim().to_string(),
        table_name: raw.main_table.trim().to_string(),
        retrieved_at,
        subtables,
        codelists,
        suppression_markers,
        load_user: None,
    };
    description.check_consistency()?;

    tracing::info!(
        table_id = %description.table_id,
        table_name = %description.table_name,
        subtables = description.subtables.len(),
        codelists = description.codelists.len(),
        "parsed table description"
    );
    Ok(description)
}

fn build_variables(raw: &RawSubtable, marker_codes: &BTreeSet<String>) -> Result<VariableGroup> {
    let mut categorical = Vec::with_capacity(raw.variables.len());
    for variable in &raw.variables {
        let codelist_id = variable.codelist_id.trim();
        categorical.push(CategoricalVariable {
            column_number: column_number(&raw.name, &variable.column_number)?,
            name: variable.name.clone(),
            text: variable.text.clone(),
            codelist_id: (!codelist_id.is_empty() && codelist_id != NO_CODELIST)
                .then(|| codelist_id.to_string()),
            time_format: TimeFormat::from_codelist_text(&variable.codelist_text),
        });
    }

    let mut statistics = Vec::with_capacity(raw.statistics.len());
    for statistic in &raw.statistics {
        statistics.push(StatisticVariable {
            column_number: column_number(&raw.name, &statistic.column_number)?,
            text: statistic.text.clone(),
            unit: statistic.unit.clone(),
            stored_decimals: decimals(&raw.name, &statistic.stored_decimals)?,
            shown_decimals: decimals(&raw.name, &statistic.shown_decimals)?,
        });
    }

    let mut suppression = Vec::with_capacity(raw.suppression.len());
    for column in &raw.suppression {
        suppression.push(SuppressionColumn {
            column_number: column_number(&raw.name, &column.column_number)?,
            applies_to: column_number(&raw.name, &column.applies_to)?,
            text: column.applies_to_text.clone(),
            codes: marker_codes.clone(),
        });
    }

    Ok(VariableGroup {
        categorical,
        statistics,
        suppression,
    })
}

/// Codelists keyed by id. The first definition of an id wins.
fn merge_codelists<'a>(raw: impl Iterator<Item = &'a RawCodelist>) -> BTreeMap<String, Codelist> {
    let mut codelists = BTreeMap::new();
    for list in raw {
        if codelists.contains_key(&list.id) {
            tracing::debug!(codelist = %list.id, "skipping duplicate codelist");
            continue;
        }
        let codes = list
            .codes
            .iter()
            .map(|c| (c.code.clone(), c.text.clone()))
            .collect();
        codelists.insert(
            list.id.clone(),
            Codelist {
                id: list.id.clone(),
                total_code: list
                    .total_code
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string),
                codes,
            },
        );
    }
    codelists
}

fn column_number(subtable: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(SchemaError::malformed(format!(
            "{subtable}: invalid column number '{value}'"
        ))),
    }
}

fn decimals(subtable: &str, value: &str) -> Result<u32> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse::<u32>().map_err(|_| {
        SchemaError::malformed(format!("{subtable}: invalid decimal count '{value}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_number_rejects_zero_and_text() {
        assert_eq!(column_number("t", " 3 ").ok(), Some(3));
        assert!(column_number("t", "0").is_err());
        assert!(column_number("t", "x").is_err());
    }

    #[test]
    fn empty_decimals_mean_zero() {
        assert_eq!(decimals("t", "").ok(), Some(0));
        assert_eq!(decimals("t", "2").ok(), Some(2));
        assert!(decimals("t", "-1").is_err());
    }
}
