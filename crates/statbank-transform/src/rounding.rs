//! Dataset-level rounding.

use polars::prelude::{AnyValue, Column, DataFrame};
use statbank_common::any_to_string;
use statbank_model::{Dataset, Subtable, TableDescription};

use crate::decimal::round_text;
use crate::error::{Result, TransformError};

/// Returns a new dataset with every statistic column rounded to its
/// declared decimals and rendered as comma text.
///
/// Null cells become empty text. Cells that are not plain numbers, such as
/// suppression placeholders, are kept as text unchanged. Subtables the
/// description does not know are copied as they are.
///
/// Rounding an already rounded dataset returns the same values.
pub fn round_dataset(dataset: &Dataset, description: &TableDescription) -> Result<Dataset> {
    let mut rounded = Dataset::new();
    for (name, frame) in dataset.iter() {
        let frame = match description.subtable(name) {
            Some(subtable) => round_frame(subtable, frame)?,
            None => {
                tracing::debug!(subtable = name, "no description for subtable, copying as is");
                frame.clone()
            }
        };
        rounded.insert(name, frame);
    }
    Ok(rounded)
}

fn round_frame(subtable: &Subtable, frame: &DataFrame) -> Result<DataFrame> {
    let columns: Vec<Column> = frame
        .get_columns()
        .iter()
        .enumerate()
        .map(|(index, column)| match subtable.decimals_for(index + 1) {
            Some(decimals) => {
                tracing::debug!(
                    subtable = %subtable.file_name,
                    column = index + 1,
                    decimals,
                    "rounding statistic column"
                );
                round_column(column, decimals)
            }
            None => column.clone(),
        })
        .collect();
    DataFrame::new(columns).map_err(|source| TransformError::Frame {
        subtable: subtable.file_name.clone(),
        source,
    })
}

fn round_column(column: &Column, decimals: u32) -> Column {
    let values: Vec<String> = (0..column.len())
        .map(|row| match column.get(row).unwrap_or(AnyValue::Null) {
            AnyValue::Null => String::new(),
            value => {
                let text = any_to_string(value);
                round_text(&text, decimals).unwrap_or(text)
            }
        })
        .collect();
    Column::new(column.name().clone(), values)
}
