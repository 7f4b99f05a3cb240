//! Reading datasets from delimited text files and writing them back.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use polars::prelude::*;
use statbank_common::cell_text;
use statbank_model::{Dataset, TableDescription};
use statbank_schema::{description_from_json, parse_schema};

/// How data files are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvLayout {
    pub separator: u8,
    pub has_header: bool,
}

impl Default for CsvLayout {
    fn default() -> Self {
        Self {
            separator: b';',
            has_header: true,
        }
    }
}

/// Loads a description from either a saved description or a raw schema file.
pub fn read_description(path: &Path) -> Result<TableDescription> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    if let Ok(description) = description_from_json(&text) {
        tracing::debug!(path = %path.display(), "loaded saved description");
        return Ok(description);
    }
    parse_schema(&text).with_context(|| format!("parse schema {}", path.display()))
}

/// Reads one file into a frame with every column as text.
pub fn read_frame(path: &Path, layout: CsvLayout) -> Result<DataFrame> {
    let frame = CsvReadOptions::default()
        .with_has_header(layout.has_header)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_separator(layout.separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open {}", path.display()))?
        .finish()
        .with_context(|| format!("read {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "read data file"
    );
    Ok(frame)
}

/// Reads data files and pairs them with the subtables in declared order.
pub fn read_dataset(
    description: &TableDescription,
    paths: &[PathBuf],
    layout: CsvLayout,
) -> Result<Dataset> {
    if paths.is_empty() {
        bail!("no data files given");
    }
    let frames = paths
        .iter()
        .map(|path| read_frame(path, layout))
        .collect::<Result<Vec<_>>>()?;
    Dataset::from_positional(description, frames).with_context(|| {
        format!(
            "table {} has subtables {}",
            description.table_id,
            description.subtable_names().join(", ")
        )
    })
}

/// Writes every frame as `<output_dir>/<subtable name>`, without a header.
pub fn write_dataset(dataset: &Dataset, output_dir: &Path, separator: u8) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let mut written = Vec::with_capacity(dataset.len());
    for (name, frame) in dataset.iter() {
        let path = output_dir.join(name);
        write_frame(frame, &path, separator)?;
        written.push(path);
    }
    Ok(written)
}

fn write_frame(frame: &DataFrame, path: &Path, separator: u8) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(separator)
        .has_headers(false)
        .from_writer(file);
    let columns = frame.get_columns();
    for row in 0..frame.height() {
        writer
            .write_record(columns.iter().map(|column| cell_text(column, row)))
            .with_context(|| format!("write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Writes one header-only file per subtable, named by column.
pub fn write_templates(
    description: &TableDescription,
    output_dir: &Path,
    separator: u8,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let mut written = Vec::with_capacity(description.subtables.len());
    for subtable in &description.subtables {
        let mut header: Vec<String> = Vec::with_capacity(subtable.expected_column_count);
        for number in 1..=subtable.expected_column_count {
            let name = subtable
                .variables
                .column_name(number)
                .map_or_else(|| format!("column_{number}"), template_column_name);
            // Suppression columns share their statistic's text.
            if header.contains(&name) {
                header.push(format!("{name}_{number}"));
            } else {
                header.push(name);
            }
        }
        let path = output_dir.join(template_file_name(&subtable.file_name));
        let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
        let mut writer = csv::WriterBuilder::new()
            .delimiter(separator)
            .from_writer(file);
        writer
            .write_record(&header)
            .with_context(|| format!("write {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

fn template_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(char::is_whitespace, "_")
}

/// `fylke.dat` becomes `fylke.csv`.
fn template_file_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or(file_name);
    format!("{stem}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_names() {
        assert_eq!(template_file_name("fylke.dat"), "fylke.csv");
        assert_eq!(template_file_name("data"), "data.csv");
        assert_eq!(template_column_name(" Hele Landet "), "hele_landet");
    }
}
