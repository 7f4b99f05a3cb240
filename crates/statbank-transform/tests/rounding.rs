use polars::prelude::*;
use proptest::prelude::*;
use statbank_common::cell_text;
use statbank_model::{Dataset, TableDescription};
use statbank_schema::parse_schema;
use statbank_transform::{round_dataset, round_text};

const TABLE_10000: &str = include_str!("../../statbank-schema/tests/fixtures/table_10000.json");

fn description() -> TableDescription {
    parse_schema(TABLE_10000).expect("parse description")
}

fn column_texts(dataset: &Dataset, name: &str, number: usize) -> Vec<String> {
    let frame = dataset.get(name).expect("subtable present");
    let column = &frame.get_columns()[number - 1];
    (0..column.len()).map(|row| cell_text(column, row)).collect()
}

#[test]
fn statistic_columns_are_rounded_to_comma_text() {
    let desc = description();
    let frame = df!(
        "1" => ["999", "01", "02"],
        "2" => ["2022", "2022", "2000"],
        "3" => [1.5, 2.5, 3.5],
        "4" => [1.15, 2.25, 3.35],
    )
    .expect("frame");
    let dataset = Dataset::new().with("delfil1.dat", frame);

    let rounded = round_dataset(&dataset, &desc).expect("round");
    assert_eq!(column_texts(&rounded, "delfil1.dat", 3), vec!["2", "3", "4"]);
    assert_eq!(
        column_texts(&rounded, "delfil1.dat", 4),
        vec!["1,2", "2,3", "3,4"]
    );
    // Categorical columns are untouched.
    assert_eq!(
        column_texts(&rounded, "delfil1.dat", 1),
        vec!["999", "01", "02"]
    );
}

#[test]
fn input_dataset_is_not_modified() {
    let desc = description();
    let frame = df!(
        "1" => ["01"],
        "2" => ["2022"],
        "3" => [2.5],
        "4" => [1.15],
    )
    .expect("frame");
    let dataset = Dataset::new().with("delfil1.dat", frame.clone());
    let _ = round_dataset(&dataset, &desc).expect("round");
    assert!(dataset.get("delfil1.dat").expect("frame").equals(&frame));
}

#[test]
fn nulls_and_placeholders_pass_through() {
    let desc = description();
    let frame = df!(
        "1" => ["01", "02"],
        "2" => ["2022", "2022"],
        "3" => [Some("4"), None],
        "4" => [Some(".."), Some("0.05")],
    )
    .expect("frame");
    let dataset = Dataset::new().with("delfil1.dat", frame);
    let rounded = round_dataset(&dataset, &desc).expect("round");
    assert_eq!(column_texts(&rounded, "delfil1.dat", 3), vec!["4", ""]);
    assert_eq!(column_texts(&rounded, "delfil1.dat", 4), vec!["..", "0,1"]);
}

#[test]
fn rounding_is_idempotent_on_a_dataset() {
    let desc = description();
    let frame = df!(
        "1" => ["01", "02"],
        "2" => ["2022", "2022"],
        "3" => [10.5, -0.5],
        "4" => [9.95, 0.04],
    )
    .expect("frame");
    let dataset = Dataset::new().with("delfil1.dat", frame);
    let once = round_dataset(&dataset, &desc).expect("round once");
    let twice = round_dataset(&once, &desc).expect("round twice");
    assert!(
        once.get("delfil1.dat")
            .expect("frame")
            .equals(twice.get("delfil1.dat").expect("frame"))
    );
    assert_eq!(column_texts(&once, "delfil1.dat", 3), vec!["11", "-1"]);
    assert_eq!(column_texts(&once, "delfil1.dat", 4), vec!["10,0", "0,0"]);
}

#[test]
fn unknown_subtables_are_copied() {
    let desc = description();
    let frame = df!("x" => [1.25]).expect("frame");
    let dataset = Dataset::new().with("annen.dat", frame.clone());
    let rounded = round_dataset(&dataset, &desc).expect("round");
    assert!(rounded.get("annen.dat").expect("frame").equals(&frame));
}

proptest! {
    #[test]
    fn round_text_is_idempotent(value in -1.0e9f64..1.0e9, decimals in 0u32..6) {
        let once = round_text(&value.to_string(), decimals).expect("plain decimal");
        let twice = round_text(&once, decimals).expect("comma decimal");
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn exact_halves_round_up(whole in 0u64..1_000_000) {
        let text = format!("{whole}.5");
        let expected = (whole + 1).to_string();
        prop_assert_eq!(round_text(&text, 0), Some(expected));
    }

    #[test]
    fn rendered_text_has_exact_decimals(value in -1.0e6f64..1.0e6, decimals in 0u32..6) {
        let rendered = round_text(&value.to_string(), decimals).expect("plain decimal");
        let fraction = rendered.split_once(',').map_or(0, |(_, f)| f.len());
        prop_assert_eq!(fraction, decimals as usize);
    }
}
