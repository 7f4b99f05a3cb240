use chrono::NaiveDate;
use statbank_schema::{SchemaError, parse_schema};

const TABLE_10000: &str = include_str!("fixtures/table_10000.json");
const TABLE_05300: &str = include_str!("fixtures/table_05300.json");

#[test]
fn parses_single_subtable_description() {
    let desc = parse_schema(TABLE_10000).expect("parse description");
    assert_eq!(desc.table_id, "10000");
    assert_eq!(desc.table_name, "HovedTabellNavn");
    assert_eq!(
        desc.retrieved_at,
        NaiveDate::from_ymd_opt(2022, 9, 29)
            .and_then(|d| d.and_hms_opt(18, 51, 0))
            .expect("timestamp")
    );
    assert_eq!(desc.subtable_names(), vec!["delfil1.dat"]);

    let subtable = &desc.subtables[0];
    assert_eq!(subtable.expected_column_count, 4);
    assert_eq!(subtable.variables.column_count(), 4);
    assert_eq!(subtable.example_line.as_deref(), Some("01;2022;100"));

    let region = &subtable.variables.categorical[0];
    assert_eq!(region.codelist_id.as_deref(), Some("Kodeliste1"));
    assert!(region.time_format.is_none());

    let time = &subtable.variables.categorical[1];
    assert_eq!(time.codelist_id, None);
    assert_eq!(time.time_format.as_ref().map(|f| f.pattern()), Some("åååå"));

    let decimals: Vec<u32> = desc.decimal_specs().iter().map(|s| s.decimals).collect();
    assert_eq!(decimals, vec![0, 1]);
    assert_eq!(
        desc.total_codes().get("Kodeliste1").map(String::as_str),
        Some("999")
    );
}

#[test]
fn parses_multi_subtable_description_in_title_order() {
    let desc = parse_schema(TABLE_05300).expect("parse description");
    assert_eq!(desc.table_id, "5300");
    assert_eq!(desc.subtable_names(), vec!["fylke.dat", "land.dat"]);

    for subtable in &desc.subtables {
        assert_eq!(
            subtable.variables.column_count(),
            subtable.expected_column_count
        );
    }

    let fylke = &desc.subtables[0];
    assert_eq!(fylke.expected_column_count, 4);
    let suppression = &fylke.variables.suppression[0];
    assert_eq!(suppression.applies_to, 3);
    assert_eq!(
        suppression.codes.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["1", "2", "3"]
    );
    assert_eq!(desc.suppression_markers.len(), 3);

    let (_, format) = fylke.time_variables().next().expect("time column");
    assert!(!format.is_numeric());
    assert!(format.matches("2022M10"));
}

#[test]
fn empty_codelist_is_accepted() {
    let desc = parse_schema(TABLE_05300).expect("parse description");
    let empty = desc.codelist("Tom").expect("IR codelist merged");
    assert!(empty.is_empty());
}

#[test]
fn tabs_are_stripped_before_parsing() {
    let text = TABLE_10000.replace("HovedTabellNavn", "HovedTabell\tNavn");
    let desc = parse_schema(&text).expect("parse description");
    assert_eq!(desc.table_name, "HovedTabellNavn");
}

#[test]
fn missing_codelist_is_malformed() {
    let text = TABLE_10000.replace(
        "\"Kodeliste_id\":\"Kodeliste1\"",
        "\"Kodeliste_id\":\"Ukjent\"",
    );
    let err = parse_schema(&text).unwrap_err();
    assert!(matches!(err, SchemaError::MalformedSchema(_)), "{err}");
    assert!(err.to_string().contains("Ukjent"));
}

#[test]
fn column_gap_is_malformed() {
    let text = TABLE_10000.replace("\"kolonnenummer\":\"4\"", "\"kolonnenummer\":\"5\"");
    let err = parse_schema(&text).unwrap_err();
    assert!(matches!(err, SchemaError::MalformedSchema(_)), "{err}");
}

#[test]
fn duplicate_column_number_is_malformed() {
    let text = TABLE_10000.replace("\"kolonnenummer\":\"4\"", "\"kolonnenummer\":\"3\"");
    let err = parse_schema(&text).unwrap_err();
    assert!(matches!(err, SchemaError::MalformedSchema(_)), "{err}");
}

#[test]
fn title_without_definition_is_malformed() {
    let text = TABLE_10000.replace(
        "\"deltabell\":\"delfil1.dat\"",
        "\"deltabell\":\"annen.dat\"",
    );
    let err = parse_schema(&text).unwrap_err();
    assert!(err.to_string().contains("delfil1.dat"), "{err}");
}

#[test]
fn unreadable_timestamp_is_malformed() {
    let text = TABLE_10000.replace("29.09.2022 klokka 18:51", "i går");
    let err = parse_schema(&text).unwrap_err();
    assert!(matches!(err, SchemaError::MalformedSchema(_)), "{err}");
}

#[test]
fn invalid_json_is_reported() {
    let err = parse_schema("{\"TabellId\":").unwrap_err();
    assert!(matches!(err, SchemaError::Json(_)));
}
