//! Integration tests for reading and writing data files.

use std::fs;
use std::path::{Path, PathBuf};

use statbank_cli::ingest::{
    CsvLayout, read_dataset, read_description, write_dataset, write_templates,
};
use statbank_schema::save_description;
use statbank_transform::round_dataset;
use tempfile::TempDir;

const TABLE_05300: &str = include_str!("../../statbank-schema/tests/fixtures/table_05300.json");

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn data_files(dir: &Path) -> Vec<PathBuf> {
    vec![
        write_file(
            dir,
            "fylke.csv",
            "region;tid;personer;prikk\n03;2022M10;12.254;\n46;2022M10;;3\n",
        ),
        write_file(dir, "land.csv", "tid;personer\n2022M10;5488984.5\n"),
    ]
}

#[test]
fn reads_raw_and_saved_descriptions() {
    let dir = TempDir::new().unwrap();
    let raw = write_file(dir.path(), "raw.json", TABLE_05300);

    let parsed = read_description(&raw).unwrap();
    assert_eq!(parsed.table_id, "5300");

    let saved = dir.path().join("saved.json");
    save_description(&parsed, &saved).unwrap();
    let loaded = read_description(&saved).unwrap();
    assert_eq!(loaded, parsed);
}

#[test]
fn unreadable_description_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "broken.json", "{ not json");

    let err = read_description(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.json"));
}

#[test]
fn data_files_pair_with_subtables_in_order() {
    let dir = TempDir::new().unwrap();
    let description = read_description(&write_file(dir.path(), "t.json", TABLE_05300)).unwrap();

    let dataset = read_dataset(&description, &data_files(dir.path()), CsvLayout::default()).unwrap();

    let names: Vec<&str> = dataset.names().collect();
    assert_eq!(names, vec!["fylke.dat", "land.dat"]);
    let fylke = dataset.get("fylke.dat").unwrap();
    assert_eq!(fylke.height(), 2);
    assert_eq!(statbank_common::cell_text(&fylke.get_columns()[0], 0), "03");

    let report = statbank_validate::validate(&dataset, &description);
    assert!(!report.has_errors(), "{:?}", report.findings);
}

#[test]
fn wrong_number_of_files_is_an_error() {
    let dir = TempDir::new().unwrap();
    let description = read_description(&write_file(dir.path(), "t.json", TABLE_05300)).unwrap();
    let files = data_files(dir.path());

    let err = read_dataset(&description, &files[..1], CsvLayout::default()).unwrap_err();
    assert!(format!("{err:#}").contains("fylke.dat, land.dat"));
    assert!(read_dataset(&description, &[], CsvLayout::default()).is_err());
}

#[test]
fn headerless_files_with_other_separator() {
    let dir = TempDir::new().unwrap();
    let description = read_description(&write_file(dir.path(), "t.json", TABLE_05300)).unwrap();
    let files = vec![
        write_file(dir.path(), "a.csv", "03,2022M10,1,\n"),
        write_file(dir.path(), "b.csv", "2022M10,7\n"),
    ];
    let layout = CsvLayout {
        separator: b',',
        has_header: false,
    };

    let dataset = read_dataset(&description, &files, layout).unwrap();

    assert_eq!(dataset.get("fylke.dat").unwrap().height(), 1);
    assert_eq!(dataset.get("land.dat").unwrap().width(), 2);
}

#[test]
fn rounded_files_are_written_per_subtable() {
    let dir = TempDir::new().unwrap();
    let description = read_description(&write_file(dir.path(), "t.json", TABLE_05300)).unwrap();
    let dataset = read_dataset(&description, &data_files(dir.path()), CsvLayout::default()).unwrap();
    let rounded = round_dataset(&dataset, &description).unwrap();

    let out = dir.path().join("out");
    let written = write_dataset(&rounded, &out, b';').unwrap();

    assert_eq!(written, vec![out.join("fylke.dat"), out.join("land.dat")]);
    assert_eq!(
        fs::read_to_string(out.join("fylke.dat")).unwrap(),
        "03;2022M10;12,25;\n46;2022M10;;3\n"
    );
    assert_eq!(fs::read_to_string(out.join("land.dat")).unwrap(), "2022M10;5488985\n");
}

#[test]
fn templates_have_one_header_per_column() {
    let dir = TempDir::new().unwrap();
    let description = read_description(&write_file(dir.path(), "t.json", TABLE_05300)).unwrap();

    let written = write_templates(&description, dir.path(), b';').unwrap();

    assert_eq!(written.len(), 2);
    let fylke = fs::read_to_string(dir.path().join("fylke.csv")).unwrap();
    assert_eq!(fylke, "region;tid;personer;personer_4\n");
    let land = fs::read_to_string(dir.path().join("land.csv")).unwrap();
    assert_eq!(land, "tid;personer\n");
}
