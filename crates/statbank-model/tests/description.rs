use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use statbank_model::{
    CategoricalVariable, Codelist, Dataset, ModelError, StatisticVariable, Subtable,
    SuppressionColumn, TableDescription, TimeFormat, VariableGroup,
};

fn retrieved(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 9, 29)
        .and_then(|d| d.and_hms_opt(18, 51, 0))
        .expect("valid timestamp")
}

fn description() -> TableDescription {
    let variables = VariableGroup {
        categorical: vec![
            CategoricalVariable {
                column_number: 1,
                name: "Region".to_string(),
                text: "region".to_string(),
                codelist_id: Some("Region".to_string()),
                time_format: None,
            },
            CategoricalVariable {
                column_number: 2,
                name: "Tid".to_string(),
                text: "tid".to_string(),
                codelist_id: None,
                time_format: Some(TimeFormat::parse("åååå")),
            },
        ],
        statistics: vec![StatisticVariable {
            column_number: 3,
            text: "Antall".to_string(),
            unit: "personer".to_string(),
            stored_decimals: 1,
            shown_decimals: 1,
        }],
        suppression: vec![SuppressionColumn {
            column_number: 4,
            applies_to: 3,
            text: "Prikking Antall".to_string(),
            codes: BTreeSet::from(["1".to_string(), "2".to_string()]),
        }],
    };
    TableDescription {
        table_id: "10000".to_string(),
        table_name: "HovedTabellNavn".to_string(),
        retrieved_at: retrieved(2022),
        subtables: vec![Subtable {
            file_name: "delfil1.dat".to_string(),
            title: "10000: Fake table".to_string(),
            expected_column_count: 4,
            variables,
            example_line: None,
        }],
        codelists: [(
            "Region".to_string(),
            Codelist::new("Region")
                .with_code("01", "Oslo")
                .with_code("02", "Bergen")
                .with_code("999", "I alt"),
        )]
        .into_iter()
        .collect(),
        suppression_markers: Vec::new(),
        load_user: Some("LAST360".to_string()),
    }
}

#[test]
fn consistent_description_passes() {
    description().check_consistency().expect("consistent");
}

#[test]
fn column_gap_is_inconsistent() {
    let mut desc = description();
    desc.subtables[0].variables.statistics[0].column_number = 5;
    let err = desc.check_consistency().unwrap_err();
    assert!(matches!(err, ModelError::Inconsistent(_)));
}

#[test]
fn missing_codelist_is_inconsistent() {
    let mut desc = description();
    desc.codelists.clear();
    let err = desc.check_consistency().unwrap_err();
    assert!(err.to_string().contains("missing codelist Region"));
}

#[test]
fn suppression_must_target_statistic() {
    let mut desc = description();
    desc.subtables[0].variables.suppression[0].applies_to = 1;
    assert!(desc.check_consistency().is_err());
}

#[test]
fn decimal_specs_follow_statistics() {
    let specs = description().decimal_specs();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].subtable, "delfil1.dat");
    assert_eq!(specs[0].column_number, 3);
    assert_eq!(specs[0].decimals, 1);
}

#[test]
fn staleness_follows_calendar_year() {
    let desc = description();
    let same_year = NaiveDate::from_ymd_opt(2022, 12, 31).expect("date");
    let next_year = NaiveDate::from_ymd_opt(2023, 1, 1).expect("date");
    assert!(!desc.is_stale(same_year));
    assert!(desc.is_stale(next_year));
}

#[test]
fn scrubbed_drops_load_user_only() {
    let desc = description();
    let scrubbed = desc.scrubbed();
    assert_eq!(scrubbed.load_user, None);
    assert_eq!(scrubbed.retrieved_at, desc.retrieved_at);
    assert_eq!(scrubbed.subtables, desc.subtables);
}

#[test]
fn expanded_cell_count_ignores_time() {
    let desc = description();
    assert_eq!(desc.expanded_cell_count("delfil1.dat"), Some(3));
    assert_eq!(desc.expanded_cell_count("nope.dat"), None);
}

#[test]
fn positional_dataset_uses_subtable_order() {
    let desc = description();
    let frame = df!("a" => ["01"], "b" => ["2022"], "c" => ["1.5"], "d" => [""])
        .expect("frame");
    let dataset = Dataset::from_positional(&desc, vec![frame]).expect("dataset");
    assert_eq!(dataset.names().collect::<Vec<_>>(), vec!["delfil1.dat"]);

    let err = Dataset::from_positional(&desc, Vec::new()).unwrap_err();
    assert!(matches!(
        err,
        ModelError::SubtableCount {
            expected: 1,
            found: 0
        }
    ));
}
